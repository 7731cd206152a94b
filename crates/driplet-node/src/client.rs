// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the RGB Lightning node REST API.
//!
//! Every call carries the configured fixed timeout. Node-reported errors
//! arrive as an `"error"` field in the body and are mapped onto the closed
//! [`NodeError`] vocabulary by substring, matching the node's own phrasing.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use driplet_config::model::{FaucetConfig, NodeConfig};
use driplet_core::types::{AssetBalance, AssetInfo, BtcBalance, InvoiceState, NodeInfo};
use driplet_core::{LedgerNode, NodeError};

use crate::wire::{
    AssetBalanceRequest, AssetBalanceResponse, Assignment, BtcBalanceRequest,
    BtcBalanceResponse, CreateUtxosRequest, EmptyResponse, InvoiceStatusRequest,
    InvoiceStatusResponse, IssueInvoiceRequest, IssueInvoiceResponse, ListAssetsRequest,
    ListAssetsResponse, NetworkInfoResponse, NodeInfoResponse, RefreshTransfersRequest,
    SendAssetRequest, SendBtcRequest, SendResponse,
};

/// reqwest-backed implementation of [`LedgerNode`].
#[derive(Debug, Clone)]
pub struct RlnClient {
    client: reqwest::Client,
    base_url: String,
    asset_id: String,
    fee_rate: u64,
    asset_amount: u64,
    sat_amount: u64,
    htlc_min_msat: u64,
    invoice_price: u64,
    invoice_expiration_secs: u32,
    utxos_to_create: u8,
}

impl RlnClient {
    /// Creates a new node client from the node and faucet configuration.
    pub fn new(node: &NodeConfig, faucet: &FaucetConfig) -> Result<Self, NodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(node.timeout_secs))
            .build()
            .map_err(|e| NodeError::Transport {
                source: Box::new(e),
            })?;

        Ok(Self {
            client,
            base_url: node.url.trim_end_matches('/').to_string(),
            asset_id: node.asset_id.clone(),
            fee_rate: node.fee_rate,
            asset_amount: faucet.asset_amount,
            sat_amount: faucet.sat_amount,
            htlc_min_msat: faucet.htlc_min_msat,
            invoice_price: faucet.invoice_price,
            invoice_expiration_secs: faucet.invoice_expiration_secs,
            utxos_to_create: faucet.utxos_to_create,
        })
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, NodeError> {
        let url = format!("{}{path}", self.base_url);
        debug!(path, "node call");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| NodeError::Transport {
                source: Box::new(e),
            })?;
        let body = response.text().await.map_err(|e| NodeError::Transport {
            source: Box::new(e),
        })?;
        decode_response(&body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, NodeError> {
        let url = format!("{}{path}", self.base_url);
        debug!(path, "node call");
        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| NodeError::Transport {
                    source: Box::new(e),
                })?;
        let body = response.text().await.map_err(|e| NodeError::Transport {
            source: Box::new(e),
        })?;
        decode_response(&body)
    }
}

#[async_trait]
impl LedgerNode for RlnClient {
    async fn issue_invoice(&self) -> Result<String, NodeError> {
        let response: IssueInvoiceResponse = self
            .post(
                "/lninvoice",
                &IssueInvoiceRequest {
                    amt_msat: self.htlc_min_msat,
                    expiry_sec: self.invoice_expiration_secs,
                    asset_id: self.asset_id.clone(),
                    asset_amount: self.invoice_price,
                },
            )
            .await?;
        Ok(response.invoice)
    }

    async fn invoice_status(&self, invoice: &str) -> Result<InvoiceState, NodeError> {
        let response: InvoiceStatusResponse = self
            .post(
                "/invoicestatus",
                &InvoiceStatusRequest {
                    invoice: invoice.to_string(),
                },
            )
            .await?;
        Ok(InvoiceState::parse(&response.status))
    }

    async fn send_asset(
        &self,
        recipient_id: &str,
        transport_endpoints: &[String],
    ) -> Result<String, NodeError> {
        let response: SendResponse = self
            .post(
                "/sendasset",
                &SendAssetRequest {
                    asset_id: self.asset_id.clone(),
                    assignment: Assignment::fungible(self.asset_amount),
                    recipient_id: recipient_id.to_string(),
                    donation: true,
                    fee_rate: self.fee_rate,
                    min_confirmations: 0,
                    transport_endpoints: transport_endpoints.to_vec(),
                    skip_sync: false,
                },
            )
            .await?;
        Ok(response.txid)
    }

    async fn send_btc(&self, address: &str) -> Result<String, NodeError> {
        let response: SendResponse = self
            .post(
                "/sendbtc",
                &SendBtcRequest {
                    amount: self.sat_amount,
                    address: address.to_string(),
                    fee_rate: self.fee_rate,
                    skip_sync: false,
                },
            )
            .await?;
        Ok(response.txid)
    }

    async fn asset_balance(&self) -> Result<AssetBalance, NodeError> {
        let response: AssetBalanceResponse = self
            .post(
                "/assetbalance",
                &AssetBalanceRequest {
                    asset_id: self.asset_id.clone(),
                },
            )
            .await?;
        Ok(AssetBalance {
            settled: response.settled,
            future: response.future,
        })
    }

    async fn btc_balance(&self) -> Result<BtcBalance, NodeError> {
        let response: BtcBalanceResponse = self
            .post("/btcbalance", &BtcBalanceRequest { skip_sync: false })
            .await?;
        Ok(BtcBalance {
            settled: response.vanilla.settled,
            future: response.vanilla.future,
        })
    }

    async fn create_utxos(&self) -> Result<(), NodeError> {
        let _: EmptyResponse = self
            .post(
                "/createutxos",
                &CreateUtxosRequest {
                    up_to: true,
                    num: self.utxos_to_create,
                    size: None,
                    fee_rate: self.fee_rate,
                    skip_sync: false,
                },
            )
            .await?;
        Ok(())
    }

    async fn refresh_transfers(&self) -> Result<(), NodeError> {
        let _: EmptyResponse = self
            .post(
                "/refreshtransfers",
                &RefreshTransfersRequest { skip_sync: false },
            )
            .await?;
        Ok(())
    }

    async fn node_info(&self) -> Result<NodeInfo, NodeError> {
        let response: NodeInfoResponse = self.get("/nodeinfo").await?;
        Ok(NodeInfo {
            pubkey: response.pubkey,
        })
    }

    async fn network_info(&self) -> Result<String, NodeError> {
        let response: NetworkInfoResponse = self.get("/networkinfo").await?;
        Ok(response.network)
    }

    async fn list_assets(&self) -> Result<Vec<AssetInfo>, NodeError> {
        let response: ListAssetsResponse = self
            .post(
                "/listassets",
                &ListAssetsRequest {
                    filter_asset_schemas: Vec::new(),
                },
            )
            .await?;
        Ok(response
            .nia
            .into_iter()
            .map(|asset| AssetInfo {
                asset_id: asset.asset_id,
                ticker: asset.ticker,
            })
            .collect())
    }
}

/// Decodes a node response body, surfacing a node-reported `"error"` field
/// as the matching [`NodeError`] kind.
fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, NodeError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| NodeError::Decode(e.to_string()))?;
    if let Some(err) = value.get("error").and_then(|v| v.as_str()) {
        return Err(map_node_error(err));
    }
    serde_json::from_value(value).map_err(|e| NodeError::Decode(e.to_string()))
}

/// Maps the node's error phrasing onto the closed error vocabulary.
fn map_node_error(err: &str) -> NodeError {
    if err.contains("Allocations already available") {
        NodeError::AllocationsAlreadyAvailable
    } else if err.contains("Invalid transport endpoints") {
        NodeError::InvalidTransportEndpoints
    } else if err.contains("Recipient ID already used") {
        NodeError::RecipientAlreadyUsed
    } else {
        NodeError::Api(err.to_string())
    }
}
