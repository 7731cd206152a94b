// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: required credentials, URL shape, positive amounts and
//! intervals.

use crate::error::ConfigError;
use crate::model::DripletConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all violations instead of failing fast so the operator sees
/// every problem in one run.
pub fn validate_config(config: &DripletConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match &config.telegram.bot_token {
        None => errors.push(ConfigError::validation("telegram.bot_token is required")),
        Some(token) if token.trim().is_empty() => {
            errors.push(ConfigError::validation("telegram.bot_token must not be empty"));
        }
        Some(_) => {}
    }

    let url = config.node.url.trim();
    if url.is_empty() {
        errors.push(ConfigError::validation("node.url is required"));
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(ConfigError::validation(format!(
            "node.url `{url}` must start with http:// or https://"
        )));
    }

    if config.node.asset_id.trim().is_empty() {
        errors.push(ConfigError::validation("node.asset_id is required"));
    }

    if config.node.announcement_addr.trim().is_empty() {
        errors.push(ConfigError::validation("node.announcement_addr is required"));
    }

    if config.faucet.asset_amount == 0 {
        errors.push(ConfigError::validation("faucet.asset_amount must be positive"));
    }

    if config.faucet.sat_amount == 0 {
        errors.push(ConfigError::validation("faucet.sat_amount must be positive"));
    }

    if config.faucet.invoice_price == 0 {
        errors.push(ConfigError::validation("faucet.invoice_price must be positive"));
    }

    if config.limits.max_daily_successes == 0 {
        errors.push(ConfigError::validation(
            "limits.max_daily_successes must be at least 1",
        ));
    }

    if config.tasks.invoice_poll_interval_secs == 0 {
        errors.push(ConfigError::validation(
            "tasks.invoice_poll_interval_secs must be positive",
        ));
    }

    if config.tasks.node_check_interval_secs == 0 {
        errors.push(ConfigError::validation(
            "tasks.node_check_interval_secs must be positive",
        ));
    }

    if config.storage.data_dir.trim().is_empty() {
        errors.push(ConfigError::validation("storage.data_dir must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
