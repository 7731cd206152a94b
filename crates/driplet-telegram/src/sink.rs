// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram-backed notification sink.

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile, ParseMode, Recipient};
use tracing::warn;

use driplet_core::types::Notice;
use driplet_core::{DripletError, NotificationSink};

use crate::texts::Renderer;

/// Delivers rendered notices and stickers through the Bot API.
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
    renderer: Arc<Renderer>,
}

impl TelegramSink {
    pub fn new(bot: Bot, renderer: Arc<Renderer>) -> Self {
        Self { bot, renderer }
    }

    /// Sends MarkdownV2 text, falling back to plain text when Telegram
    /// rejects the formatting.
    pub(crate) async fn deliver(&self, chat_id: &str, text: &str) -> Result<(), DripletError> {
        let chat = parse_chat_id(chat_id)?;
        match self
            .bot
            .send_message(Recipient::Id(chat), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(error = %e, "MarkdownV2 send failed, sending as plain text");
                self.bot
                    .send_message(Recipient::Id(chat), text)
                    .await
                    .map_err(|e| DripletError::Channel {
                        message: format!("failed to send message: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn send(&self, chat_id: &str, notice: Notice) -> Result<(), DripletError> {
        let text = self.renderer.render(&notice);
        self.deliver(chat_id, &text).await
    }

    async fn send_sticker(&self, chat_id: &str, sticker: &str) -> Result<(), DripletError> {
        let chat = parse_chat_id(chat_id)?;
        self.bot
            .send_sticker(
                Recipient::Id(chat),
                InputFile::file_id(FileId(sticker.to_string())),
            )
            .await
            .map_err(|e| DripletError::Channel {
                message: format!("failed to send sticker: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }
}

fn parse_chat_id(chat_id: &str) -> Result<ChatId, DripletError> {
    chat_id
        .parse::<i64>()
        .map(ChatId)
        .map_err(|e| DripletError::Channel {
            message: format!("invalid chat_id `{chat_id}`: {e}"),
            source: None,
        })
}
