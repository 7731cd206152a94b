// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./driplet.toml` > `~/.config/driplet/driplet.toml`
//! > `/etc/driplet/driplet.toml` with environment variable overrides via the
//! `DRIPLET_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DripletConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/driplet/driplet.toml` (system-wide)
/// 3. `~/.config/driplet/driplet.toml` (user XDG config)
/// 4. `./driplet.toml` (local directory)
/// 5. `DRIPLET_*` environment variables
pub fn load_config() -> Result<DripletConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DripletConfig::default()))
        .merge(Toml::file("/etc/driplet/driplet.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("driplet/driplet.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("driplet.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<DripletConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DripletConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DripletConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DripletConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `DRIPLET_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("DRIPLET_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("telegram_", "telegram.", 1)
            .replacen("node_", "node.", 1)
            .replacen("faucet_", "faucet.", 1)
            .replacen("limits_", "limits.", 1)
            .replacen("tasks_", "tasks.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert!(config.telegram.bot_token.is_none());
        assert_eq!(config.limits.max_daily_successes, 2);
        assert_eq!(config.tasks.invoice_poll_interval_secs, 20);
        assert_eq!(config.node.timeout_secs, 15);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[telegram]
bot_token = "123:abc"

[node]
url = "http://localhost:3001"
asset_id = "rgb:asset"
announcement_addr = "1.2.3.4:9735"

[limits]
max_daily_successes = 5
"#,
        )
        .unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.node.url, "http://localhost:3001");
        assert_eq!(config.limits.max_daily_successes, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.faucet.htlc_min_msat, 3_000_000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
[telegram]
bot_tokne = "typo"
"#,
        );
        assert!(result.is_err());
    }
}
