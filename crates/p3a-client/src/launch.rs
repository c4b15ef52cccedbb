//! Reporter startup.

use std::path::PathBuf;

use log::{debug, info};
use p3a_core::config::{self, Config};
use p3a_core::logging;

use crate::error::ClientError;
use crate::reporter::Reporter;

/// Loads configuration, sets up logging and builds a [`Reporter`].
///
/// This is the primary entry point for a reporting process. Configuration is
/// resolved here, once; the returned reporter never consults it again.
///
/// # Arguments
/// * `config_path` - Explicit configuration file. If None, an optional
///   `p3a.toml` in the working directory is used.
///
/// # Returns
/// The reporter together with the configuration it was built from.
pub fn start(config_path: Option<PathBuf>) -> Result<(Reporter, Config), ClientError> {
    // 1. Load configuration
    let cfg = config::load_config(config_path)?;

    // 2. Setup logging
    if let Err(e) = logging::setup_logging(&cfg.global.log_level) {
        // Another logger may already be installed by the host process.
        debug!("Logging setup skipped: {}", e);
    }

    info!("P3A client starting...");
    debug!("Loaded configuration: {:?}", cfg);

    // 3. Build the reporter
    let reporter = Reporter::from_config(&cfg)?;
    Ok((reporter, cfg))
}
