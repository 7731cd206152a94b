// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic node health checks and UTXO replenishment.
//!
//! Each check is independent: a failure fetching one balance must not
//! prevent the other check or the provisioning attempt from running.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use driplet_core::NodeError;

use crate::Engine;

/// Runs the node health loop until cancelled.
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
            _ = ticker.tick() => node_checks(&engine).await,
            _ = cancel.cancelled() => {
                info!("node health loop stopped");
                return;
            }
        }
    }
}

/// One health pass: asset balance, UTXO provisioning, BTC balance.
pub async fn node_checks(engine: &Engine) {
    match engine.node.asset_balance().await {
        Ok(balance) if balance.future < engine.settings.min_asset_balance => {
            warn!(future = balance.future, "asset balance under minimum acceptable");
            engine
                .operator_report(format!(
                    "asset balance under minimum acceptable: {}",
                    balance.future
                ))
                .await;
        }
        Ok(_) => {}
        Err(e) => {
            error!(error = %e, "asset balance check failed");
            engine
                .operator_report(format!("asset balance check failed: {e}"))
                .await;
        }
    }

    match engine.node.create_utxos().await {
        Ok(()) => info!("created UTXOs"),
        Err(NodeError::AllocationsAlreadyAvailable) => {
            debug!("allocations already available");
        }
        Err(e) => {
            warn!(error = %e, "UTXO provisioning failed");
            engine
                .operator_report(format!("UTXO provisioning failed: {e}"))
                .await;
        }
    }

    match engine.node.btc_balance().await {
        Ok(balance) if balance.future < engine.settings.min_btc_balance => {
            warn!(future = balance.future, "BTC balance under minimum acceptable");
            engine
                .operator_report(format!(
                    "BTC balance under minimum acceptable: {}",
                    balance.future
                ))
                .await;
        }
        Ok(_) => {}
        Err(e) => {
            error!(error = %e, "BTC balance check failed");
            engine
                .operator_report(format!("BTC balance check failed: {e}"))
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{engine_with, MockNode, MockSink, UtxoBehavior};
    use driplet_core::types::{AssetBalance, BtcBalance, Notice};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn healthy_node_stays_quiet() {
        let node = Arc::new(MockNode::default());
        let sink = Arc::new(MockSink::default());
        node.set_asset_balance(AssetBalance { settled: 50_000, future: 50_000 });
        node.set_btc_balance(BtcBalance { settled: 1_000_000, future: 1_000_000 });
        node.set_utxo_behavior(UtxoBehavior::AlreadyAvailable);
        let (engine, _dir) = engine_with(node, sink.clone()).await;

        node_checks(&engine).await;

        assert!(sink.notices_for("operator-chat").is_empty());
    }

    #[tokio::test]
    async fn low_balances_warn_the_operator() {
        let node = Arc::new(MockNode::default());
        let sink = Arc::new(MockSink::default());
        node.set_asset_balance(AssetBalance { settled: 100, future: 100 });
        node.set_btc_balance(BtcBalance { settled: 10, future: 10 });
        node.set_utxo_behavior(UtxoBehavior::Ok);
        let (engine, _dir) = engine_with(node, sink.clone()).await;

        node_checks(&engine).await;

        let reports = sink.notices_for("operator-chat");
        assert_eq!(reports.len(), 2);
        assert!(matches!(
            &reports[0],
            Notice::Operator { text } if text.contains("asset balance")
        ));
        assert!(matches!(
            &reports[1],
            Notice::Operator { text } if text.contains("BTC balance")
        ));
    }

    #[tokio::test]
    async fn one_failing_check_does_not_stop_the_others() {
        let node = Arc::new(MockNode::default());
        let sink = Arc::new(MockSink::default());
        // Asset balance unconfigured, so that check errors out.
        node.set_btc_balance(BtcBalance { settled: 1_000_000, future: 1_000_000 });
        node.set_utxo_behavior(UtxoBehavior::Ok);
        let (engine, _dir) = engine_with(node.clone(), sink.clone()).await;

        node_checks(&engine).await;

        // Provisioning and the BTC check both still ran.
        assert_eq!(node.create_utxos_calls.load(Ordering::SeqCst), 1);
        assert_eq!(node.btc_balance_calls.load(Ordering::SeqCst), 1);
        let reports = sink.notices_for("operator-chat");
        assert_eq!(reports.len(), 1);
        assert!(matches!(
            &reports[0],
            Notice::Operator { text } if text.contains("asset balance check failed")
        ));
    }

    #[tokio::test]
    async fn provisioning_failure_is_reported() {
        let node = Arc::new(MockNode::default());
        let sink = Arc::new(MockSink::default());
        node.set_asset_balance(AssetBalance { settled: 50_000, future: 50_000 });
        node.set_btc_balance(BtcBalance { settled: 1_000_000, future: 1_000_000 });
        node.set_utxo_behavior(UtxoBehavior::Fail);
        let (engine, _dir) = engine_with(node, sink.clone()).await;

        node_checks(&engine).await;

        let reports = sink.notices_for("operator-chat");
        assert_eq!(reports.len(), 1);
        assert!(matches!(
            &reports[0],
            Notice::Operator { text } if text.contains("UTXO provisioning failed")
        ));
    }
}
