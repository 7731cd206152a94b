// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Driplet faucet bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Driplet configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Immutable after load; components receive it (or a
/// section of it) by reference and never mutate it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DripletConfig {
    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// RGB Lightning node client settings.
    #[serde(default)]
    pub node: NodeConfig,

    /// Faucet payout amounts and thresholds.
    #[serde(default)]
    pub faucet: FaucetConfig,

    /// Rate limiting policy.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Background task scheduling.
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required to run the bot.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Chat to receive operator diagnostics. `None` disables operator
    /// notifications.
    #[serde(default)]
    pub operator_chat_id: Option<String>,

    /// Sticker file identifiers sent as purchase rewards, one chosen at
    /// random per delivered purchase.
    #[serde(default)]
    pub reward_stickers: Vec<String>,

    /// Timeout applied to Telegram API calls, in seconds.
    #[serde(default = "default_telegram_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            operator_chat_id: None,
            reward_stickers: Vec::new(),
            timeout_secs: default_telegram_timeout_secs(),
        }
    }
}

fn default_telegram_timeout_secs() -> u64 {
    30
}

/// RGB Lightning node client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Base URL of the node's REST API. Required.
    #[serde(default)]
    pub url: String,

    /// Publicly announced `host:port` of the node's LN listener, combined
    /// with the node pubkey into the connection URI shown to users. Required.
    #[serde(default)]
    pub announcement_addr: String,

    /// Identifier of the asset the faucet distributes. Required.
    #[serde(default)]
    pub asset_id: String,

    /// Timeout applied to every node API call, in seconds.
    #[serde(default = "default_node_timeout_secs")]
    pub timeout_secs: u64,

    /// Fee rate, in sat/vB, used for on-chain operations.
    #[serde(default = "default_fee_rate")]
    pub fee_rate: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            announcement_addr: String::new(),
            asset_id: String::new(),
            timeout_secs: default_node_timeout_secs(),
            fee_rate: default_fee_rate(),
        }
    }
}

fn default_node_timeout_secs() -> u64 {
    15
}

fn default_fee_rate() -> u64 {
    5
}

/// Payout amounts, invoice pricing, and balance thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FaucetConfig {
    /// Asset units sent per successful asset request.
    #[serde(default = "default_asset_amount")]
    pub asset_amount: u64,

    /// Sats sent per successful bitcoin request.
    #[serde(default = "default_sat_amount")]
    pub sat_amount: u64,

    /// Minimum HTLC size, in msat, for issued invoices.
    #[serde(default = "default_htlc_min_msat")]
    pub htlc_min_msat: u64,

    /// Asset units a purchase invoice asks for.
    #[serde(default = "default_invoice_price")]
    pub invoice_price: u64,

    /// Validity window of issued invoices, in seconds.
    #[serde(default = "default_invoice_expiration_secs")]
    pub invoice_expiration_secs: u32,

    /// Spendable outputs to keep provisioned on the node.
    #[serde(default = "default_utxos_to_create")]
    pub utxos_to_create: u8,

    /// Asset balance below which the operator is warned.
    #[serde(default = "default_min_asset_balance")]
    pub min_asset_balance: u64,

    /// BTC balance (sats) below which the operator is warned.
    #[serde(default = "default_min_btc_balance")]
    pub min_btc_balance: u64,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            asset_amount: default_asset_amount(),
            sat_amount: default_sat_amount(),
            htlc_min_msat: default_htlc_min_msat(),
            invoice_price: default_invoice_price(),
            invoice_expiration_secs: default_invoice_expiration_secs(),
            utxos_to_create: default_utxos_to_create(),
            min_asset_balance: default_min_asset_balance(),
            min_btc_balance: default_min_btc_balance(),
        }
    }
}

fn default_asset_amount() -> u64 {
    100
}

fn default_sat_amount() -> u64 {
    50_000
}

fn default_htlc_min_msat() -> u64 {
    3_000_000
}

fn default_invoice_price() -> u64 {
    10
}

fn default_invoice_expiration_secs() -> u32 {
    3600
}

fn default_utxos_to_create() -> u8 {
    10
}

fn default_min_asset_balance() -> u64 {
    10_000
}

fn default_min_btc_balance() -> u64 {
    100_000
}

/// Rate limiting policy for send requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum successful requests per kind per user in a rolling 24 hours.
    #[serde(default = "default_max_daily_successes")]
    pub max_daily_successes: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_daily_successes: default_max_daily_successes(),
        }
    }
}

fn default_max_daily_successes() -> u32 {
    2
}

/// Background task scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TasksConfig {
    /// Seconds between invoice reconciliation passes.
    #[serde(default = "default_invoice_poll_interval_secs")]
    pub invoice_poll_interval_secs: u64,

    /// Seconds between node health checks.
    #[serde(default = "default_node_check_interval_secs")]
    pub node_check_interval_secs: u64,

    /// Delay before the first pass of each periodic task.
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            invoice_poll_interval_secs: default_invoice_poll_interval_secs(),
            node_check_interval_secs: default_node_check_interval_secs(),
            initial_delay_secs: default_initial_delay_secs(),
        }
    }
}

fn default_invoice_poll_interval_secs() -> u64 {
    20
}

fn default_node_check_interval_secs() -> u64 {
    120
}

fn default_initial_delay_secs() -> u64 {
    10
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding the SQLite database; created if missing.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("driplet"))
        .unwrap_or_else(|| std::path::PathBuf::from("driplet-data"))
        .to_string_lossy()
        .into_owned()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` takes
    /// precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
