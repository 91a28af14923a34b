mod common;

use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rvcurve::{
    constants::SUN_JUPITER_MASS,
    orbital_elements::OrbitalElements,
    parameters::ParamValue,
    report::{CurveOptions, DisplayMode, PhaseCurve},
    rv_errors::RvError,
    rv_model::RvModel,
    time::strtimes_to_jd,
};

use common::{assert_elements_close, write_temp, HD4747_PARAMS};

#[test]
fn test_model_from_file() {
    let file = write_temp(HD4747_PARAMS);
    let model = RvModel::from_file(file.path()).unwrap();

    let expected = OrbitalElements::new(0.7554, 12115.7, 0.7334, 2450403.1, 0.0, 264.5);
    assert_elements_close(model.elements(), &expected, 1e-12);

    assert_eq!(
        model.elements().extra_params["name"],
        ParamValue::Text("HD 4747".into())
    );
    assert_relative_eq!(
        model.elements().extra("k2").unwrap(),
        -0.7554 * 0.82 * SUN_JUPITER_MASS / 63.1,
        epsilon = 1e-12
    );
}

#[test]
fn test_param_dict_round_trip() {
    let file = write_temp(HD4747_PARAMS);
    let model = RvModel::from_file(file.path()).unwrap();

    let rebuilt = RvModel::from_params(&model.param_dict()).unwrap();
    assert_eq!(rebuilt, model);
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        RvModel::from_file("does/not/exist.txt"),
        Err(RvError::IoError(_))
    ));
}

#[test]
fn test_typo_in_numeric_parameter() {
    let file = write_temp("k1 = 0.75\nperiod = 12115.7d\n");
    assert_eq!(
        RvModel::from_file(file.path()),
        Err(RvError::UnconvertedParameter {
            key: "period".into(),
            value: "12115.7d".into()
        })
    );
}

#[test]
fn test_misspelled_orbital_key() {
    let file = write_temp(
        "k1 = 5\nperiod = 100\neccentricty = 0.6\ntau = 10\nmean_val = 2\nomega = 45\n",
    );
    assert_eq!(
        RvModel::from_file(file.path()),
        Err(RvError::MissingParameter("eccentricity".into()))
    );
}

#[test]
fn test_malformed_file() {
    let file = write_temp("k1 = 0.75\nperiod: 12115.7\n");
    assert!(matches!(
        RvModel::from_file(file.path()),
        Err(RvError::ParseError { line: 2, .. })
    ));
}

#[test]
fn test_periodicity_in_time() {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);

    for _ in 0..50 {
        let elem = OrbitalElements::new(
            rng.random_range(-20.0..20.0),
            rng.random_range(0.5..500.0),
            rng.random_range(0.0..0.9),
            rng.random_range(-100.0..100.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(0.0..360.0),
        );
        let model = RvModel::new(elem.clone());
        let times: Vec<f64> = (0..20).map(|_| rng.random_range(-1000.0..1000.0)).collect();
        let shifted: Vec<f64> = times.iter().map(|t| t + elem.period).collect();

        let rv = model.rv_at_times(&times).unwrap();
        let rv_shifted = model.rv_at_times(&shifted).unwrap();

        let scale = elem.semi_amplitude.abs().max(1.0);
        for (a, b) in rv.iter().zip(rv_shifted.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-4 * scale);
        }
    }
}

#[test]
fn test_curve_stays_within_max_amplitude() {
    let file = write_temp(HD4747_PARAMS);
    let model = RvModel::from_file(file.path()).unwrap();

    let rv = model.rv_full_phase(0.0, 500).unwrap();
    let gamma = model.elements().gamma;
    let max_amp = model.max_amplitude();

    assert!(rv.iter().all(|v| (v - gamma).abs() <= max_amp + 1e-9));
    assert_relative_eq!(rv[0], rv[499], epsilon = 1e-6);
}

#[test]
fn test_phase_curve_with_observations() {
    let file = write_temp(HD4747_PARAMS);
    let model = RvModel::from_file(file.path()).unwrap();
    let obs_jd = strtimes_to_jd(&["2012-08-14 03:12:00", "2013-01-01 00:00:00"], false).unwrap();

    let options = CurveOptions {
        companion: true,
        ..CurveOptions::default()
    };
    let curve = PhaseCurve::build(&model, &options, &obs_jd).unwrap();

    assert_eq!(curve.rows.len(), 100);
    assert!(curve.rows.iter().all(|r| r.rv_companion.is_some()));
    assert_eq!(curve.observations.len(), 2);
    assert!(curve
        .observations
        .iter()
        .all(|o| (0.0..1.0).contains(&o.phase)));

    let time_mode = CurveOptions {
        mode: DisplayMode::Time,
        ..CurveOptions::default()
    };
    assert!(matches!(
        PhaseCurve::build(&model, &time_mode, &obs_jd),
        Err(RvError::NotImplemented(_))
    ));
}
