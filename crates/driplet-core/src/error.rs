// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Driplet faucet bot.

use thiserror::Error;

/// The primary error type used across Driplet components.
#[derive(Debug, Error)]
pub enum DripletError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat channel errors (connection failure, message format, delivery rejection).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Ledger node errors, carrying the closed node error vocabulary.
    #[error("node error: {0}")]
    Node(#[from] NodeError),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Closed error vocabulary of the ledger node client.
///
/// The node reports recoverable and unrecoverable conditions as distinct
/// kinds so the request state machine can match on them explicitly instead
/// of inspecting strings.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Spendable allocations already exist; UTXO provisioning is a no-op.
    #[error("allocations already available")]
    AllocationsAlreadyAvailable,

    /// The invoice embeds transport endpoints the node cannot use.
    #[error("invalid transport endpoints")]
    InvalidTransportEndpoints,

    /// The recipient identifier has already received a transfer.
    #[error("recipient already used")]
    RecipientAlreadyUsed,

    /// Any other error reported by the node itself.
    #[error("node rejected request: {0}")]
    Api(String),

    /// The node returned a body that could not be decoded.
    #[error("malformed node response: {0}")]
    Decode(String),

    /// Connection failure or timeout before a node response arrived.
    #[error("node unreachable: {source}")]
    Transport {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl NodeError {
    /// Whether the call may be retried without any state transition.
    ///
    /// Transport failures and decode failures carry no verdict from the
    /// node; everything else is an authoritative node response.
    pub fn is_transient(&self) -> bool {
        matches!(self, NodeError::Transport { .. } | NodeError::Decode(_))
    }
}

/// Rejection of a user-supplied recipient descriptor by the syntactic validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDescriptor {
    #[error("not a valid asset invoice")]
    AssetInvoice,
    #[error("not a valid bitcoin address")]
    BtcAddress,
}
