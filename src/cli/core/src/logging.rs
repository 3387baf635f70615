/* src/cli/core/src/logging.rs */

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Environment variable holding the log filter, e.g. `TRUTH_LOG=truth_helpers=trace`.
pub const LOG_ENV: &str = "TRUTH_LOG";

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// transformed output.
pub fn init(verbose: bool) -> Result<()> {
  let env_filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true).without_time();

  Registry::default().with(env_filter).with(fmt_layer).try_init()?;
  Ok(())
}
