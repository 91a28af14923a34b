use std::{fs::File, io::BufWriter, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use rvcurve::{
    logger,
    rv_errors::RvError,
    time::{now, JulianDate},
    visibility::{night_tracks, parse_targets, summary_table, write_tracks_csv, Observatory},
};

/// Plot altitudes of objects against time for a specific night
#[derive(Parser, Debug)]
#[command(name = "visibility", version, about)]
struct Cli {
    /// Targets as NAME:RA_DEG:DEC_DEG, e.g. HD20010:49.982:-28.857 (comma separated allowed)
    #[arg(required = true, num_args = 1..)]
    targets: Vec<String>,

    /// Date in format YYYY-MM-DD. Default is today
    #[arg(short, long, default_value = "today")]
    date: String,

    /// Observatory code, e.g. esolasilla, esoparanal, lapalma, keck, lco, palomar
    #[arg(short, long, default_value = "esolasilla")]
    site: String,

    /// Just print "target hh mm ss ±dd mm ss" lines (to use in STARALT)
    #[arg(short = 'c')]
    coordinates_only: bool,

    /// Write every sample to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn night_jd(date: &str) -> Result<f64, RvError> {
    if date.eq_ignore_ascii_case("today") {
        let (y, m, d, ..) = now()?.to_gregorian_utc();
        JulianDate::parse(&format!("{y:04}-{m:02}-{d:02}"), false).map(|jd| jd.jd)
    } else {
        JulianDate::parse(date, false).map(|jd| jd.jd)
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let targets = parse_targets(&cli.targets)?;

    if cli.coordinates_only {
        println!("Coordinates for {}\n", cli.targets.first().map(String::as_str).unwrap_or_default());
        for t in &targets {
            println!("{}", t.staralt_line());
        }
        return Ok(());
    }

    let site = Observatory::from_code(&cli.site)?;
    let jd = night_jd(&cli.date)?;
    info!(site = site.name, jd, "computing visibility");

    let tracks = night_tracks(jd, &targets, site);

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        write_tracks_csv(&tracks, BufWriter::new(file))?;
    }

    println!("{} ({}), night of JD {jd}", site.name, site.code);
    println!("{}", summary_table(&tracks));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("visibility: {e:#}");
            ExitCode::FAILURE
        }
    }
}
