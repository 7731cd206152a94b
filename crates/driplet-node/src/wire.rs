// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response payloads of the node's REST API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct IssueInvoiceRequest {
    pub amt_msat: u64,
    pub expiry_sec: u32,
    pub asset_id: String,
    pub asset_amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct IssueInvoiceResponse {
    pub invoice: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceStatusRequest {
    pub invoice: String,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceStatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct SendAssetRequest {
    pub asset_id: String,
    pub assignment: Assignment,
    pub recipient_id: String,
    pub donation: bool,
    pub fee_rate: u64,
    pub min_confirmations: u8,
    pub transport_endpoints: Vec<String>,
    pub skip_sync: bool,
}

#[derive(Debug, Serialize)]
pub struct Assignment {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: u64,
}

impl Assignment {
    pub fn fungible(value: u64) -> Self {
        Self {
            kind: "Fungible".to_string(),
            value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendResponse {
    pub txid: String,
}

#[derive(Debug, Serialize)]
pub struct SendBtcRequest {
    pub amount: u64,
    pub address: String,
    pub fee_rate: u64,
    pub skip_sync: bool,
}

#[derive(Debug, Serialize)]
pub struct AssetBalanceRequest {
    pub asset_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetBalanceResponse {
    pub settled: u64,
    pub future: u64,
}

#[derive(Debug, Serialize)]
pub struct BtcBalanceRequest {
    pub skip_sync: bool,
}

#[derive(Debug, Deserialize)]
pub struct BtcBalanceResponse {
    pub vanilla: BtcBalanceBucket,
}

#[derive(Debug, Deserialize)]
pub struct BtcBalanceBucket {
    pub settled: u64,
    pub future: u64,
}

#[derive(Debug, Serialize)]
pub struct CreateUtxosRequest {
    pub up_to: bool,
    pub num: u8,
    pub size: Option<u64>,
    pub fee_rate: u64,
    pub skip_sync: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshTransfersRequest {
    pub skip_sync: bool,
}

#[derive(Debug, Deserialize)]
pub struct NodeInfoResponse {
    pub pubkey: String,
}

#[derive(Debug, Deserialize)]
pub struct NetworkInfoResponse {
    pub network: String,
}

#[derive(Debug, Serialize)]
pub struct ListAssetsRequest {
    pub filter_asset_schemas: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListAssetsResponse {
    #[serde(default)]
    pub nia: Vec<NiaAsset>,
}

#[derive(Debug, Deserialize)]
pub struct NiaAsset {
    pub asset_id: String,
    pub ticker: String,
}

/// Empty response body for calls that only signal success.
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}
