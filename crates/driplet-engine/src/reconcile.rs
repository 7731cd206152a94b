// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic reconciliation of pending purchases against invoice state.
//!
//! This task is the only writer of purchase transitions. Each purchase is
//! handled independently: a poll or delivery failure for one never blocks
//! the rest of the batch, and the status commit happens before any
//! notification so a purchase can never be rewarded twice.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use driplet_core::types::{InvoiceState, Notice, PurchaseStatus};
use driplet_core::DripletError;

use crate::Engine;

/// Runs the reconciliation loop until cancelled.
pub async fn run(
    engine: Arc<Engine>,
    interval: Duration,
    initial_delay: Duration,
    cancel: CancellationToken,
) {
    tokio::select! {
        _ = tokio::time::sleep(initial_delay) => {}
        _ = cancel.cancelled() => return,
    }

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = poll_pending_purchases(&engine).await {
                    error!(error = %e, "reconciliation pass failed");
                }
            }
            _ = cancel.cancelled() => {
                info!("reconciliation loop stopped");
                return;
            }
        }
    }
}

/// One reconciliation pass over every pending purchase.
pub async fn poll_pending_purchases(engine: &Engine) -> Result<(), DripletError> {
    let purchases = engine.store.pending_purchases().await?;
    debug!(count = purchases.len(), "checking pending purchases");

    for purchase in purchases {
        let state = match engine.node.invoice_status(&purchase.invoice).await {
            Ok(state) => state,
            Err(e) => {
                // Stays pending; the next pass retries.
                warn!(error = %e, purchase_id = purchase.id, "invoice status poll failed");
                continue;
            }
        };

        match state {
            InvoiceState::Pending => {}
            InvoiceState::Succeeded => {
                if let Err(e) = engine
                    .store
                    .set_purchase_status(purchase.id, PurchaseStatus::Delivered)
                    .await
                {
                    warn!(error = %e, purchase_id = purchase.id, "status commit failed");
                    continue;
                }
                debug!(purchase_id = purchase.id, "invoice paid");
                engine.notify(&purchase.chat_id, Notice::InvoicePaid).await;
                if let Some(sticker) = engine.pick_reward_sticker() {
                    if let Err(e) = engine.sink.send_sticker(&purchase.chat_id, &sticker).await
                    {
                        error!(error = %e, chat_id = purchase.chat_id.as_str(), "sticker not delivered");
                    }
                }
            }
            InvoiceState::Expired => {
                if let Err(e) = engine
                    .store
                    .set_purchase_status(purchase.id, PurchaseStatus::Expired)
                    .await
                {
                    warn!(error = %e, purchase_id = purchase.id, "status commit failed");
                    continue;
                }
                engine
                    .notify(&purchase.chat_id, Notice::InvoiceExpired)
                    .await;
            }
            InvoiceState::Other(status) => {
                if let Err(e) = engine
                    .store
                    .set_purchase_status(purchase.id, PurchaseStatus::Failed)
                    .await
                {
                    warn!(error = %e, purchase_id = purchase.id, "status commit failed");
                    continue;
                }
                error!(
                    purchase_id = purchase.id,
                    status = status.as_str(),
                    "invoice in unexpected status"
                );
                engine
                    .operator_report(format!(
                        "invoice {} in unexpected status: {status}",
                        purchase.invoice
                    ))
                    .await;
            }
        }
    }

    Ok(())
}
