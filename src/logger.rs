use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the terminal subscriber of the binaries.
///
/// `RUST_LOG` takes precedence; otherwise `rvcurve` logs at `info`, or `debug`
/// when `verbose` is set.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose { "rvcurve=debug,info" } else { "rvcurve=info,warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
