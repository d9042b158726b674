pub mod input;
pub mod summary;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. Stdout carries image data only.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
