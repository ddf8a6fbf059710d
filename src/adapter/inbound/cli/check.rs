//! Handler for the `check-config` command.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, ENV_API_KEY, ENV_BOT_TOKEN};

/// Validate configuration without starting the bot.
pub fn execute_config(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    output::section("Configuration Check");
    if path.exists() {
        output::field("Config", path.display());
    } else {
        output::field("Config", "defaults (file not found)");
    }
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("API", &config.etherscan.api_url);
    output::field("State", config.storage.path.display());
    output::field(
        "Interval",
        format!("{}s", config.reconcile.interval_secs),
    );
    output::field("Throttle", format!("{}ms", config.etherscan.throttle_ms));
    output::field("Timeout", format!("{}ms", config.etherscan.timeout_ms));
    output::field(
        "Proxy",
        config.etherscan.proxy.as_deref().unwrap_or("none"),
    );

    for (name, present) in secret_status(&config) {
        if present {
            output::success(&format!("{name} is set"));
        } else {
            output::warning(&format!("{name} is not set"));
        }
    }

    Ok(())
}

/// Presence of each secret the bot needs.
fn secret_status(config: &Config) -> [(&'static str, bool); 2] {
    [
        (ENV_BOT_TOKEN, config.require_bot_token().is_ok()),
        (ENV_API_KEY, config.require_api_key().is_ok()),
    ]
}
