pub mod cli;
pub mod codec;
pub mod probes;
pub mod report;
pub mod scan;
pub mod types;

pub use scan::run;

use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber. Repeated calls are no-ops so
/// tests can share it.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
