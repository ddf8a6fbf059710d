//! Handler for the `run` command.

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime;

/// Execute the run command.
pub async fn execute(config: Config) -> Result<()> {
    output::section(concat!("tokenwatch ", env!("CARGO_PKG_VERSION")));
    output::field("State", config.storage.path.display());
    output::field(
        "Interval",
        format!("{}s", config.reconcile.interval_secs),
    );
    output::field("Throttle", format!("{}ms", config.etherscan.throttle_ms));

    runtime::run(config).await
}
