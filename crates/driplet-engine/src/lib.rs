// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request lifecycle and reconciliation engine.
//!
//! The [`Engine`] owns the faucet's bookkeeping: it creates and transitions
//! send requests driven by chat input, enforces the rate limit, excludes
//! consumed asset invoices, and issues purchase invoices. The periodic
//! tasks in [`reconcile`] and [`health`] share the same engine handle.
//!
//! Two writers never touch the same record: the interactive path is the
//! only writer of send requests, and the reconciliation loop is the only
//! writer of purchase transitions. The local invoice-reuse check is an
//! optimization; two racing submissions of one invoice are settled by the
//! node rejecting the loser with `RecipientAlreadyUsed`.

pub mod health;
pub mod rate_limit;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use tracing::{error, info, warn};

use driplet_config::DripletConfig;
use driplet_core::types::{AssetInvoice, Notice, RequestKind, SendRequest, SendStatus, User};
use driplet_core::{
    DescriptorValidator, DripletError, LedgerNode, NodeError, NotificationSink, Store,
};

use crate::rate_limit::Decision;

/// Engine knobs snapshotted from the configuration at startup.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub max_daily_successes: u32,
    pub reward_stickers: Vec<String>,
    pub operator_chat_id: Option<String>,
    pub min_asset_balance: u64,
    pub min_btc_balance: u64,
}

impl EngineSettings {
    pub fn from_config(config: &DripletConfig) -> Self {
        Self {
            max_daily_successes: config.limits.max_daily_successes,
            reward_stickers: config.telegram.reward_stickers.clone(),
            operator_chat_id: config.telegram.operator_chat_id.clone(),
            min_asset_balance: config.faucet.min_asset_balance,
            min_btc_balance: config.faucet.min_btc_balance,
        }
    }
}

/// The request state machine and its collaborators.
pub struct Engine {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) node: Arc<dyn LedgerNode>,
    pub(crate) sink: Arc<dyn NotificationSink>,
    pub(crate) validator: Arc<dyn DescriptorValidator>,
    pub(crate) settings: EngineSettings,
}

impl Engine {
    pub fn new(
        store: Arc<dyn Store>,
        node: Arc<dyn LedgerNode>,
        sink: Arc<dyn NotificationSink>,
        validator: Arc<dyn DescriptorValidator>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            store,
            node,
            sink,
            validator,
            settings,
        }
    }

    /// First-contact command: registers the user and greets them.
    pub async fn on_start(&self, user_ref: &str) -> Result<Notice, DripletError> {
        self.store.get_or_create_user(user_ref).await?;
        Ok(Notice::Welcome)
    }

    /// Ask command for the asset flow.
    pub async fn on_asset_ask(
        &self,
        user_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<Notice, DripletError> {
        self.on_send_ask(RequestKind::Asset, user_ref, now).await
    }

    /// Ask command for the bitcoin flow.
    pub async fn on_btc_ask(
        &self,
        user_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<Notice, DripletError> {
        self.on_send_ask(RequestKind::Btc, user_ref, now).await
    }

    /// Ask command for either send flow.
    ///
    /// Re-issuing the command while a request is already open does not
    /// create a second one; the user is simply asked again.
    pub async fn on_send_ask(
        &self,
        kind: RequestKind,
        user_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<Notice, DripletError> {
        let user = self.store.get_or_create_user(user_ref).await?;

        let successes = self
            .store
            .recent_successes(kind, user.id, now - rate_limit::WINDOW)
            .await?;
        if let Decision::Denied { retry_after } =
            rate_limit::check(self.settings.max_daily_successes, &successes)
        {
            return Ok(Notice::RateLimited { kind, retry_after });
        }

        if self.store.latest_open_request(kind, user.id).await?.is_none() {
            self.store.create_request(kind, user.id).await?;
        }

        Ok(match kind {
            RequestKind::Asset => Notice::AskAssetInvoice,
            RequestKind::Btc => Notice::AskBtcAddress,
        })
    }

    /// Non-command text from a user.
    ///
    /// With no open request the message is unsolicited and ignored
    /// (`None`). Otherwise the text is trial-parsed as an asset invoice
    /// first, then as a bitcoin address, and routed to the matching open
    /// flow; a grammar match whose flow is not open is reported back
    /// without touching any record.
    pub async fn on_free_text(
        &self,
        user_ref: &str,
        text: &str,
    ) -> Result<Option<Notice>, DripletError> {
        let user = self.store.get_or_create_user(user_ref).await?;
        let asset_open = self
            .store
            .latest_open_request(RequestKind::Asset, user.id)
            .await?;
        let btc_open = self
            .store
            .latest_open_request(RequestKind::Btc, user.id)
            .await?;
        if asset_open.is_none() && btc_open.is_none() {
            return Ok(None);
        }

        let trimmed = text.trim();
        if let Ok(parsed) = self.validator.parse_asset_invoice(trimmed) {
            return match asset_open {
                Some(open) => self
                    .submit_asset(&user, open, trimmed, parsed, user_ref)
                    .await
                    .map(Some),
                None => Ok(Some(Notice::UnrecognizedInput)),
            };
        }
        if let Ok(address) = self.validator.parse_btc_address(trimmed) {
            return match btc_open {
                Some(open) => self.submit_btc(open, &address, user_ref).await.map(Some),
                None => Ok(Some(Notice::UnrecognizedInput)),
            };
        }

        Ok(Some(match (asset_open.is_some(), btc_open.is_some()) {
            (true, false) => Notice::InvalidAssetInvoice,
            (false, true) => Notice::InvalidBtcAddress,
            _ => Notice::UnrecognizedInput,
        }))
    }

    /// Invoice purchase command for a chat.
    pub async fn on_invoice_request(&self, chat_ref: &str) -> Result<Notice, DripletError> {
        if let Some(purchase) = self.store.pending_purchase(chat_ref).await? {
            return Ok(Notice::InvoicePending {
                invoice: purchase.invoice,
            });
        }

        info!(chat = chat_ref, "issuing invoice");
        match self.node.issue_invoice().await {
            Ok(invoice) => {
                self.store.create_purchase(&invoice, chat_ref).await?;
                Ok(Notice::InvoiceIssued { invoice })
            }
            Err(e) => {
                error!(error = %e, "invoice issuance failed");
                self.operator_report(format!("invoice issuance failed: {e}"))
                    .await;
                Ok(Notice::SomethingWentWrong)
            }
        }
    }

    async fn submit_asset(
        &self,
        user: &User,
        open: SendRequest,
        raw: &str,
        parsed: AssetInvoice,
        chat: &str,
    ) -> Result<Notice, DripletError> {
        // Screen against locally known consumed invoices before bothering
        // the node. The node re-checks; its verdict is authoritative.
        if self.store.descriptor_consumed(raw).await? {
            return Ok(Notice::AssetInvoiceAlreadyUsed);
        }

        // The open record may already carry a terminal status from a prior
        // rejected invoice; it stays as audit trail and a fresh record
        // takes over.
        let request = if open.status == SendStatus::AlreadyUsed {
            self.store
                .create_request(RequestKind::Asset, user.id)
                .await?
        } else {
            open
        };

        self.store.set_request_descriptor(request.id, raw).await?;
        self.notify(chat, Notice::SendingAsset).await;

        info!(
            user = user.external_id.as_str(),
            request_id = request.id,
            "sending asset"
        );
        match self
            .node
            .send_asset(&parsed.recipient_id, &parsed.transport_endpoints)
            .await
        {
            Ok(txid) => {
                self.store.complete_request(request.id, &txid).await?;
                if let Err(e) = self.node.refresh_transfers().await {
                    warn!(error = %e, "transfer refresh after send failed");
                }
                Ok(Notice::AssetSent { txid })
            }
            Err(NodeError::RecipientAlreadyUsed) => {
                warn!(request_id = request.id, "send rejected: recipient already used");
                self.store.mark_request_descriptor_used(request.id).await?;
                Ok(Notice::AssetInvoiceAlreadyUsed)
            }
            Err(NodeError::InvalidTransportEndpoints) => {
                warn!(
                    request_id = request.id,
                    "send rejected: invalid transport endpoints"
                );
                Ok(Notice::InvalidTransportEndpoints)
            }
            Err(e) => {
                error!(error = %e, request_id = request.id, "asset send failed");
                self.operator_report(format!(
                    "asset send failed for request {}: {e}",
                    request.id
                ))
                .await;
                Ok(Notice::SomethingWentWrong)
            }
        }
    }

    async fn submit_btc(
        &self,
        open: SendRequest,
        address: &str,
        chat: &str,
    ) -> Result<Notice, DripletError> {
        self.store.set_request_descriptor(open.id, address).await?;
        self.notify(chat, Notice::SendingBtc).await;

        info!(request_id = open.id, "sending btc");
        match self.node.send_btc(address).await {
            Ok(txid) => {
                self.store.complete_request(open.id, &txid).await?;
                Ok(Notice::BtcSent { txid })
            }
            Err(e) => {
                error!(error = %e, request_id = open.id, "btc send failed");
                self.operator_report(format!("btc send failed for request {}: {e}", open.id))
                    .await;
                Ok(Notice::SomethingWentWrong)
            }
        }
    }

    /// Best-effort notice delivery; failures are logged, never propagated.
    pub(crate) async fn notify(&self, chat_id: &str, notice: Notice) {
        if let Err(e) = self.sink.send(chat_id, notice).await {
            error!(error = %e, chat_id, "notification not delivered");
        }
    }

    /// Best-effort diagnostic to the operator chat, when one is configured.
    pub(crate) async fn operator_report(&self, text: String) {
        let Some(chat_id) = self.settings.operator_chat_id.as_deref() else {
            return;
        };
        if let Err(e) = self.sink.send(chat_id, Notice::Operator { text }).await {
            error!(error = %e, "operator report not delivered");
        }
    }

    pub(crate) fn pick_reward_sticker(&self) -> Option<String> {
        self.settings
            .reward_stickers
            .choose(&mut rand::thread_rng())
            .cloned()
    }
}
