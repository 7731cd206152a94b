// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server bootstrap: startup node probe, store and engine wiring, task
//! spawning, and graceful shutdown.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use teloxide::Bot;
use tokio_util::sync::CancellationToken;
use tracing::info;

use driplet_config::DripletConfig;
use driplet_core::types::{Network, Notice, RuntimeInfo};
use driplet_core::{DripletError, LedgerNode, NotificationSink};
use driplet_engine::{health, reconcile, Engine, EngineSettings};
use driplet_node::{RlnClient, SyntacticValidator};
use driplet_storage::SqliteStore;
use driplet_telegram::{Renderer, TelegramSink};

pub async fn run(config: DripletConfig) -> Result<(), DripletError> {
    let node = RlnClient::new(&config.node, &config.faucet)?;
    let info = probe_node(&node, &config).await?;
    info!(
        node_uri = info.node_uri.as_str(),
        network = %info.network,
        ticker = info.asset_ticker.as_str(),
        "node probe complete"
    );

    std::fs::create_dir_all(&config.storage.data_dir).map_err(|e| {
        DripletError::Config(format!(
            "cannot create data dir {}: {e}",
            config.storage.data_dir
        ))
    })?;
    let db_path = std::path::Path::new(&config.storage.data_dir).join("driplet.db");
    let store = SqliteStore::open(&db_path.to_string_lossy()).await?;

    let token = config
        .telegram
        .bot_token
        .clone()
        .ok_or_else(|| DripletError::Config("telegram.bot_token is required".into()))?;
    let bot = Bot::new(token);

    let renderer = Arc::new(Renderer::new(
        info.clone(),
        config.faucet.asset_amount,
        config.faucet.sat_amount,
    ));
    let sink = Arc::new(TelegramSink::new(bot.clone(), renderer.clone()));

    let engine = Arc::new(Engine::new(
        Arc::new(store),
        Arc::new(node),
        sink.clone(),
        Arc::new(SyntacticValidator),
        EngineSettings::from_config(&config),
    ));

    driplet_telegram::setup_bot_commands(&bot).await?;
    if let Some(operator) = config.telegram.operator_chat_id.as_deref() {
        let _ = sink
            .send(
                operator,
                Notice::Operator {
                    text: "Bot started".to_string(),
                },
            )
            .await;
    }

    let cancel = CancellationToken::new();
    let initial_delay = Duration::from_secs(config.tasks.initial_delay_secs);

    let reconcile_task = tokio::spawn(reconcile::run(
        engine.clone(),
        Duration::from_secs(config.tasks.invoice_poll_interval_secs),
        initial_delay,
        cancel.clone(),
    ));
    let health_task = tokio::spawn(health::run(
        engine.clone(),
        Duration::from_secs(config.tasks.node_check_interval_secs),
        initial_delay,
        cancel.clone(),
    ));
    let polling_task = tokio::spawn(driplet_telegram::run(
        bot,
        engine,
        renderer,
        cancel.clone(),
    ));

    info!("start accepting commands");
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| DripletError::Internal(format!("signal handler failed: {e}")))?;
    info!("shutdown signal received");
    cancel.cancel();

    let _ = tokio::join!(reconcile_task, health_task, polling_task);
    Ok(())
}

/// Resolves node identity, network, and the configured asset's ticker into
/// the immutable runtime snapshot.
async fn probe_node(
    node: &dyn LedgerNode,
    config: &DripletConfig,
) -> Result<RuntimeInfo, DripletError> {
    let node_info = node
        .node_info()
        .await
        .map_err(|e| DripletError::Config(format!("cannot connect to the node: {e}")))?;

    let network_name = node.network_info().await?;
    let network = Network::from_str(&network_name).map_err(|_| {
        DripletError::Config(format!(
            "node is running on an unsupported network: {network_name}"
        ))
    })?;

    let assets = node.list_assets().await?;
    let asset_ticker = assets
        .into_iter()
        .find(|asset| asset.asset_id == config.node.asset_id)
        .map(|asset| asset.ticker)
        .ok_or_else(|| {
            DripletError::Config(format!(
                "cannot find asset with ID \"{}\"",
                config.node.asset_id
            ))
        })?;
    info!(ticker = asset_ticker.as_str(), "found configured asset");

    Ok(RuntimeInfo {
        node_uri: format!("{}@{}", node_info.pubkey, config.node.announcement_addr),
        network,
        asset_id: config.node.asset_id.clone(),
        asset_ticker,
    })
}
