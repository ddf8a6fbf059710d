//! Handler for the `tick` command.

use crate::adapter::inbound::cli::command::TickArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime;

/// Execute one reconciliation pass and print its report.
pub async fn execute(config: &Config, args: &TickArgs) -> Result<()> {
    let report = runtime::tick_once(config, args.dry_run).await?;

    output::section("Reconciliation");
    output::field("Checked", report.checked);
    output::field("Failed", report.failed);
    output::field("Notified", report.notified);

    if args.dry_run {
        output::warning("Dry run: state not saved, users not notified");
    } else {
        match &report.commit {
            Ok(()) => output::success("State saved"),
            Err(e) => output::error(&format!("State not saved: {e}")),
        }
    }

    Ok(())
}
