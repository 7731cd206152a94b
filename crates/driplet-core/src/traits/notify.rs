// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification delivery contract.

use async_trait::async_trait;

use crate::error::DripletError;
use crate::types::Notice;

/// Delivers user-visible notices and stickers to a chat.
///
/// Callers that have already committed a state transition must swallow and
/// log delivery failures (a blocked recipient must not roll back a commit
/// or abort a reconciliation batch); the [`Result`] is for callers that
/// still have a choice to make.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Renders and delivers a notice to the given chat.
    async fn send(&self, chat_id: &str, notice: Notice) -> Result<(), DripletError>;

    /// Delivers a sticker by its platform file identifier.
    async fn send_sticker(&self, chat_id: &str, sticker: &str) -> Result<(), DripletError>;
}
