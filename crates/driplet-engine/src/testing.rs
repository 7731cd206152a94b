// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process fakes for engine tests: a scriptable ledger node and a
//! recording notification sink, wired to a real SQLite store in a tempdir.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use driplet_core::types::{
    AssetBalance, AssetInfo, BtcBalance, InvoiceState, NodeInfo, Notice,
};
use driplet_core::{DripletError, LedgerNode, NodeError, NotificationSink};
use driplet_node::SyntacticValidator;
use driplet_storage::SqliteStore;

use crate::{Engine, EngineSettings};

/// Scripted behavior of the fake node's `create_utxos`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) enum UtxoBehavior {
    #[default]
    Ok,
    AlreadyAvailable,
    Fail,
}

/// Scriptable fake ledger node.
///
/// Call responses are queued per method; an empty queue yields an `Api`
/// error so unscripted calls fail loudly instead of silently succeeding.
#[derive(Default)]
pub(crate) struct MockNode {
    pub send_asset_responses: Mutex<VecDeque<Result<String, NodeError>>>,
    pub send_btc_responses: Mutex<VecDeque<Result<String, NodeError>>>,
    pub issue_invoice_responses: Mutex<VecDeque<Result<String, NodeError>>>,
    pub invoice_states: Mutex<HashMap<String, InvoiceState>>,
    pub asset_balance: Mutex<Option<AssetBalance>>,
    pub btc_balance: Mutex<Option<BtcBalance>>,
    pub utxo_behavior: Mutex<UtxoBehavior>,
    pub send_asset_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub create_utxos_calls: AtomicUsize,
    pub btc_balance_calls: AtomicUsize,
}

impl MockNode {
    pub fn script_send_asset(&self, response: Result<String, NodeError>) {
        self.send_asset_responses.lock().unwrap().push_back(response);
    }

    pub fn script_send_btc(&self, response: Result<String, NodeError>) {
        self.send_btc_responses.lock().unwrap().push_back(response);
    }

    pub fn script_issue_invoice(&self, response: Result<String, NodeError>) {
        self.issue_invoice_responses
            .lock()
            .unwrap()
            .push_back(response);
    }

    pub fn set_invoice_state(&self, invoice: &str, state: InvoiceState) {
        self.invoice_states
            .lock()
            .unwrap()
            .insert(invoice.to_string(), state);
    }

    pub fn set_asset_balance(&self, balance: AssetBalance) {
        *self.asset_balance.lock().unwrap() = Some(balance);
    }

    pub fn set_btc_balance(&self, balance: BtcBalance) {
        *self.btc_balance.lock().unwrap() = Some(balance);
    }

    pub fn set_utxo_behavior(&self, behavior: UtxoBehavior) {
        *self.utxo_behavior.lock().unwrap() = behavior;
    }
}

fn unscripted(what: &str) -> NodeError {
    NodeError::Api(format!("unscripted call: {what}"))
}

#[async_trait]
impl LedgerNode for MockNode {
    async fn issue_invoice(&self) -> Result<String, NodeError> {
        self.issue_invoice_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("issue_invoice")))
    }

    async fn invoice_status(&self, invoice: &str) -> Result<InvoiceState, NodeError> {
        self.invoice_states
            .lock()
            .unwrap()
            .get(invoice)
            .cloned()
            .ok_or_else(|| unscripted("invoice_status"))
    }

    async fn send_asset(
        &self,
        _recipient_id: &str,
        _transport_endpoints: &[String],
    ) -> Result<String, NodeError> {
        self.send_asset_calls.fetch_add(1, Ordering::SeqCst);
        self.send_asset_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("send_asset")))
    }

    async fn send_btc(&self, _address: &str) -> Result<String, NodeError> {
        self.send_btc_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("send_btc")))
    }

    async fn asset_balance(&self) -> Result<AssetBalance, NodeError> {
        (*self.asset_balance.lock().unwrap()).ok_or_else(|| unscripted("asset_balance"))
    }

    async fn btc_balance(&self) -> Result<BtcBalance, NodeError> {
        self.btc_balance_calls.fetch_add(1, Ordering::SeqCst);
        (*self.btc_balance.lock().unwrap()).ok_or_else(|| unscripted("btc_balance"))
    }

    async fn create_utxos(&self) -> Result<(), NodeError> {
        self.create_utxos_calls.fetch_add(1, Ordering::SeqCst);
        match *self.utxo_behavior.lock().unwrap() {
            UtxoBehavior::Ok => Ok(()),
            UtxoBehavior::AlreadyAvailable => Err(NodeError::AllocationsAlreadyAvailable),
            UtxoBehavior::Fail => Err(unscripted("create_utxos")),
        }
    }

    async fn refresh_transfers(&self) -> Result<(), NodeError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn node_info(&self) -> Result<NodeInfo, NodeError> {
        Ok(NodeInfo {
            pubkey: "02mock".to_string(),
        })
    }

    async fn network_info(&self) -> Result<String, NodeError> {
        Ok("Regtest".to_string())
    }

    async fn list_assets(&self) -> Result<Vec<AssetInfo>, NodeError> {
        Ok(vec![AssetInfo {
            asset_id: "rgb:test-asset".to_string(),
            ticker: "TEST".to_string(),
        }])
    }
}

/// Recording notification sink.
///
/// Every delivery attempt is recorded; with `fail_sends` set each attempt
/// also returns a channel error, simulating a recipient that blocked the
/// bot.
#[derive(Default)]
pub(crate) struct MockSink {
    pub sent: Mutex<Vec<(String, Notice)>>,
    pub stickers: Mutex<Vec<(String, String)>>,
    pub fail_sends: AtomicBool,
}

impl MockSink {
    pub fn notices_for(&self, chat_id: &str) -> Vec<Notice> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(chat, _)| chat == chat_id)
            .map(|(_, notice)| notice.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationSink for MockSink {
    async fn send(&self, chat_id: &str, notice: Notice) -> Result<(), DripletError> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), notice));
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(DripletError::Channel {
                message: "recipient blocked the bot".to_string(),
                source: None,
            });
        }
        Ok(())
    }

    async fn send_sticker(&self, chat_id: &str, sticker: &str) -> Result<(), DripletError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(DripletError::Channel {
                message: "recipient blocked the bot".to_string(),
                source: None,
            });
        }
        self.stickers
            .lock()
            .unwrap()
            .push((chat_id.to_string(), sticker.to_string()));
        Ok(())
    }
}

/// Engine wired to a real SQLite store in a tempdir and the given fakes.
pub(crate) async fn engine_with(
    node: Arc<MockNode>,
    sink: Arc<MockSink>,
) -> (Engine, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("engine.db");
    let store = SqliteStore::open(db_path.to_str().unwrap()).await.unwrap();

    let settings = EngineSettings {
        max_daily_successes: 2,
        reward_stickers: vec!["sticker-a".to_string(), "sticker-b".to_string()],
        operator_chat_id: Some("operator-chat".to_string()),
        min_asset_balance: 10_000,
        min_btc_balance: 100_000,
    };

    let engine = Engine::new(
        Arc::new(store),
        node,
        sink,
        Arc::new(SyntacticValidator),
        settings,
    );
    (engine, dir)
}
