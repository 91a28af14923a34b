use std::process::{Command, Output};

fn visibility(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_visibility"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_unknown_site_exits_with_failure() {
    let out = visibility(&["HD20010:49.982:-28.857", "-d", "2021-01-01", "-s", "mauna"]);

    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("mauna"));
    for code in ["esolasilla", "esoparanal", "lapalma", "keck"] {
        assert!(stderr.contains(code), "{code} missing from: {stderr}");
    }
}

#[test]
fn test_staralt_coordinates() {
    let out = visibility(&["-c", "HD20010:49.982:-28.857,Polaris:37.95:89.26"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines,
        vec![
            "Coordinates for HD20010:49.982:-28.857,Polaris:37.95:89.26",
            "HD20010 03 19 55.680 -28 51 25.200",
            "Polaris 02 31 48.000 +89 15 36.000",
        ]
    );
}

#[test]
fn test_night_table() {
    let out = visibility(&["HD20010:49.982:-28.857", "-d", "2021-01-01", "-s", "esolasilla"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("HD20010"));
    assert!(stdout.contains("Min Moon dist"));
}
