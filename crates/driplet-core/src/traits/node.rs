// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ledger node client contract.

use async_trait::async_trait;

use crate::error::NodeError;
use crate::types::{AssetBalance, AssetInfo, BtcBalance, InvoiceState, NodeInfo};

/// Typed call contract against the RGB Lightning node.
///
/// The node is the source of truth for transfer completion; callers treat
/// its rejections as authoritative and its [`NodeError`] kinds as the only
/// error vocabulary.
#[async_trait]
pub trait LedgerNode: Send + Sync {
    /// Issues a fresh LN invoice for the configured asset and price.
    async fn issue_invoice(&self) -> Result<String, NodeError>;

    /// Payment state of a previously issued invoice.
    async fn invoice_status(&self, invoice: &str) -> Result<InvoiceState, NodeError>;

    /// Sends the configured asset amount to a blinded recipient. Returns
    /// the transaction reference.
    async fn send_asset(
        &self,
        recipient_id: &str,
        transport_endpoints: &[String],
    ) -> Result<String, NodeError>;

    /// Sends the configured sat amount on-chain. Returns the transaction
    /// reference.
    async fn send_btc(&self, address: &str) -> Result<String, NodeError>;

    async fn asset_balance(&self) -> Result<AssetBalance, NodeError>;

    async fn btc_balance(&self) -> Result<BtcBalance, NodeError>;

    /// Provisions additional spendable outputs.
    async fn create_utxos(&self) -> Result<(), NodeError>;

    /// Asks the node to refresh transfer state after a send; best-effort.
    async fn refresh_transfers(&self) -> Result<(), NodeError>;

    /// Node identity, for the startup probe.
    async fn node_info(&self) -> Result<NodeInfo, NodeError>;

    /// Network name as reported by the node, for the startup probe.
    async fn network_info(&self) -> Result<String, NodeError>;

    /// Assets known to the node, for ticker resolution at startup.
    async fn list_assets(&self) -> Result<Vec<AssetInfo>, NodeError>;
}
