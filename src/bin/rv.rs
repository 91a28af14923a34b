use std::{fs::File, io::BufWriter, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use rvcurve::{
    logger,
    parameters::join_times,
    report::{CurveOptions, DisplayMode, PhaseCurve},
    rv_model::RvModel,
    time::strtimes_to_jd,
};

/// Radial velocity plotting
#[derive(Parser, Debug)]
#[command(name = "rv", version, about)]
struct Cli {
    /// RV parameters filename ("key = value" lines)
    params: PathBuf,

    /// Display mode
    #[arg(short, long, default_value = "phase", value_parser = ["phase", "time"])]
    mode: String,

    /// Number of phase samples over one orbit
    #[arg(long, default_value_t = 100)]
    points: usize,

    /// Phase offset of the sampled orbit
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    center: f64,

    /// Times of previous observations, "YYYY-MM-DD HH:MM:SS"
    #[arg(short, long = "obs", num_args = 1..)]
    obs_times: Vec<String>,

    /// File listing previous observation times, one per line
    #[arg(short = 'l', long)]
    obs_list: Option<PathBuf>,

    /// Observation times are compared with a reduced tau (JD − 2400000)
    #[arg(long)]
    reduced: bool,

    /// Also compute the companion curve
    #[arg(long)]
    companion: bool,

    /// Write the sampled curve to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mode: DisplayMode = cli.mode.parse()?;

    let model = RvModel::from_file(&cli.params)
        .with_context(|| format!("unable to load parameters from {}", cli.params.display()))?;
    info!(%model, "model loaded");

    let obs_jd = match join_times(&cli.obs_times, cli.obs_list.as_ref())? {
        Some(times) => strtimes_to_jd(&times, cli.reduced)?,
        None => Vec::new(),
    };

    let options = CurveOptions {
        mode,
        center: cli.center,
        points: cli.points,
        companion: cli.companion,
    };
    let curve = PhaseCurve::build(&model, &options, &obs_jd)?;

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        curve.write_csv(BufWriter::new(file))?;
        info!(path = %path.display(), rows = curve.rows.len(), "curve written");
    }

    println!("{curve}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("rv: {e:#}");
            ExitCode::FAILURE
        }
    }
}
