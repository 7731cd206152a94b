// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram transport for the Driplet faucet bot.
//!
//! Thin I/O over the engine: long polling via teloxide, command routing to
//! the engine entry points, MarkdownV2 rendering of the engine's notices,
//! and the [`TelegramSink`] used by the background tasks.

pub mod sink;
pub mod texts;

use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use driplet_core::types::Notice;
use driplet_core::DripletError;
use driplet_engine::Engine;

pub use sink::TelegramSink;
pub use texts::Renderer;

use texts::{
    GETASSET_CMD, GETBTC_CMD, GETINVOICE_CMD, GETNODEINFO_CMD, HELP_CMD, START_CMD,
};

/// Registers the command menu with Telegram.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), DripletError> {
    bot.set_my_commands(vec![
        BotCommand::new(START_CMD, "Show the welcome message"),
        BotCommand::new(HELP_CMD, "Show the help message"),
        BotCommand::new(GETINVOICE_CMD, "Get an RGB LN invoice"),
        BotCommand::new(GETASSET_CMD, "Get some RGB on-chain assets"),
        BotCommand::new(GETBTC_CMD, "Get some on-chain bitcoins"),
        BotCommand::new(GETNODEINFO_CMD, "Get info on the bot's RGB LN node"),
    ])
    .await
    .map_err(|e| DripletError::Channel {
        message: format!("failed to register bot commands: {e}"),
        source: Some(Box::new(e)),
    })?;
    Ok(())
}

/// Runs long polling until cancelled, routing updates into the engine.
pub async fn run(
    bot: Bot,
    engine: Arc<Engine>,
    renderer: Arc<Renderer>,
    cancel: CancellationToken,
) {
    let sink = TelegramSink::new(bot.clone(), renderer.clone());

    let handler = Update::filter_message().endpoint(move |_bot: Bot, msg: Message| {
        let engine = engine.clone();
        let renderer = renderer.clone();
        let sink = sink.clone();
        async move {
            handle_message(&engine, &renderer, &sink, &msg).await;
            respond(())
        }
    });

    info!("starting Telegram long polling");
    let mut dispatcher = Dispatcher::builder(bot, handler)
        .default_handler(|_| async {}) // Silently ignore non-message updates
        .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {}
        _ = cancel.cancelled() => {
            info!("telegram polling stopped");
        }
    }
}

async fn handle_message(engine: &Engine, renderer: &Renderer, sink: &TelegramSink, msg: &Message) {
    let Some(text) = msg.text() else { return };
    let Some(user) = msg.from.as_ref() else { return };
    let user_ref = user.id.0.to_string();
    let chat_ref = msg.chat.id.0.to_string();

    let reply = match dispatch_text(engine, renderer, text, &user_ref, &chat_ref).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, user = user_ref.as_str(), "update handling failed");
            Some(renderer.render(&Notice::SomethingWentWrong))
        }
    };

    if let Some(reply) = reply {
        if let Err(e) = sink.deliver(&chat_ref, &reply).await {
            error!(error = %e, chat = chat_ref.as_str(), "reply not delivered");
        }
    }
}

/// Routes one text update: commands to their entry points, everything else
/// to the free-text flow. `None` means no reply (unsolicited text).
async fn dispatch_text(
    engine: &Engine,
    renderer: &Renderer,
    text: &str,
    user_ref: &str,
    chat_ref: &str,
) -> Result<Option<String>, DripletError> {
    let Some(command) = parse_command(text) else {
        return Ok(engine
            .on_free_text(user_ref, text)
            .await?
            .map(|notice| renderer.render(&notice)));
    };

    let reply = match command {
        START_CMD => renderer.render(&engine.on_start(user_ref).await?),
        HELP_CMD => renderer.help(),
        GETNODEINFO_CMD => renderer.node_info(),
        GETASSET_CMD => renderer.render(&engine.on_asset_ask(user_ref, Utc::now()).await?),
        GETBTC_CMD => renderer.render(&engine.on_btc_ask(user_ref, Utc::now()).await?),
        GETINVOICE_CMD => renderer.render(&engine.on_invoice_request(chat_ref).await?),
        _ => renderer.unknown_command(),
    };
    Ok(Some(reply))
}

/// Extracts the command name from a `/command[@botname] [args]` message.
fn parse_command(text: &str) -> Option<&str> {
    let rest = text.trim().strip_prefix('/')?;
    let first = rest.split_whitespace().next().unwrap_or("");
    Some(first.split('@').next().unwrap_or(first))
}
