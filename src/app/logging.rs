//! Log output for the CLI.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level selected by the `-v`/`-q` flags.
pub fn level(verbose: u8, quiet: bool) -> Level {
    match verbose {
        0 if quiet => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("jellyserv={}", level(verbose, quiet).to_string().to_lowercase()))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
