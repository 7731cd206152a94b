// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records and message vocabulary shared across Driplet crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which faucet flow a send request belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum RequestKind {
    /// RGB on-chain asset delivery against a blinded invoice.
    Asset,
    /// Plain on-chain bitcoin payout to an address.
    Btc,
}

/// Status of a send request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum SendStatus {
    /// Waiting for a recipient descriptor from the user.
    Pending,
    /// The supplied descriptor was rejected as already consumed; terminal.
    AlreadyUsed,
    /// The transfer was dispatched and a txid recorded; terminal.
    Success,
}

/// Status of an invoice purchase ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum PurchaseStatus {
    /// Invoice issued, payment not yet observed.
    Pending,
    /// Payment observed and reward delivered; terminal.
    Delivered,
    /// Invoice expired unpaid; terminal.
    Expired,
    /// Invoice ended in an unexpected state; terminal.
    Failed,
}

/// A bot user, created on first interaction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Chat-platform identity, unique per user.
    pub external_id: String,
    pub created_at: DateTime<Utc>,
}

/// One attempt to deliver assets or bitcoin to a user.
///
/// Records are append-only: superseded requests keep their terminal status
/// and a fresh `Pending` record is spawned instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub id: i64,
    pub user_id: i64,
    pub kind: RequestKind,
    /// The recipient descriptor the user submitted, once known.
    pub descriptor: Option<String>,
    pub status: SendStatus,
    /// Transaction reference, set on `Success`.
    pub txid: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An outstanding "invoice issued, awaiting payment" ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub id: i64,
    /// Opaque invoice string, unique per issuance.
    pub invoice: String,
    pub status: PurchaseStatus,
    /// Chat identifier to notify; not necessarily tied to a `User`.
    pub chat_id: String,
    pub created_at: DateTime<Utc>,
}

/// Payment state of an issued invoice as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceState {
    Pending,
    Succeeded,
    Expired,
    /// Any status outside the known vocabulary, preserved verbatim.
    Other(String),
}

impl InvoiceState {
    /// Parses the node's status string, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => InvoiceState::Pending,
            "succeeded" => InvoiceState::Succeeded,
            "expired" => InvoiceState::Expired,
            _ => InvoiceState::Other(raw.to_string()),
        }
    }
}

/// Current and projected balance of the configured asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetBalance {
    pub settled: u64,
    /// Balance once in-flight transfers settle.
    pub future: u64,
}

/// Current and projected on-chain bitcoin balance, in sats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BtcBalance {
    pub settled: u64,
    pub future: u64,
}

/// Bitcoin network the node is running on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Network {
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

/// Static identity of the ledger node, fetched once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub pubkey: String,
}

/// Immutable runtime facts resolved once by the startup probe and passed
/// explicitly to whoever needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// `pubkey@host:port` users connect their channels to.
    pub node_uri: String,
    pub network: Network,
    pub asset_id: String,
    pub asset_ticker: String,
}

/// One asset known to the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub asset_id: String,
    pub ticker: String,
}

/// A syntactically valid asset invoice, decomposed for the send call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInvoice {
    /// Blinded recipient identifier embedded in the invoice.
    pub recipient_id: String,
    /// Proxy endpoints the sender must use to consign the transfer.
    pub transport_endpoints: Vec<String>,
}

/// A user-visible notification instruction.
///
/// The engine produces these; the chat transport renders each variant into
/// channel-specific text. Keeping the vocabulary closed here means the
/// engine never formats user-facing strings itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Welcome,
    AskAssetInvoice,
    AskBtcAddress,
    /// Too many successful requests of `kind` in the rolling window.
    RateLimited {
        kind: RequestKind,
        retry_after: DateTime<Utc>,
    },
    InvalidAssetInvoice,
    InvalidBtcAddress,
    /// Free text matched neither open flow's grammar.
    UnrecognizedInput,
    AssetInvoiceAlreadyUsed,
    InvalidTransportEndpoints,
    SendingAsset,
    SendingBtc,
    AssetSent {
        txid: String,
    },
    BtcSent {
        txid: String,
    },
    InvoiceIssued {
        invoice: String,
    },
    InvoicePending {
        invoice: String,
    },
    InvoicePaid,
    InvoiceExpired,
    /// Generic failure; details already reported to the operator.
    SomethingWentWrong,
    /// Operator-only diagnostic line.
    Operator {
        text: String,
    },
}
