// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent store contract for users, send requests, and purchases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DripletError;
use crate::types::{Purchase, PurchaseStatus, RequestKind, SendRequest, User};

/// Durable record storage with per-record atomic updates.
///
/// Every write touches exactly one record; no invariant here spans two
/// records' writes, so implementations need no cross-record transactions.
/// Implementations must serialize writes so that concurrent callers never
/// observe a torn record.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the user with the given chat-platform identity, creating it
    /// on first interaction.
    async fn get_or_create_user(&self, external_id: &str) -> Result<User, DripletError>;

    /// The most recent request of `kind` for `user_id` still in `Pending`
    /// or `AlreadyUsed`, if any.
    async fn latest_open_request(
        &self,
        kind: RequestKind,
        user_id: i64,
    ) -> Result<Option<SendRequest>, DripletError>;

    /// Creation timestamps of successful requests of `kind` for `user_id`
    /// newer than `since`, oldest first.
    async fn recent_successes(
        &self,
        kind: RequestKind,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, DripletError>;

    /// Whether any asset request has ever reached `Success` or
    /// `AlreadyUsed` with this descriptor, for any user.
    async fn descriptor_consumed(&self, descriptor: &str) -> Result<bool, DripletError>;

    /// Creates a fresh `Pending` request.
    async fn create_request(
        &self,
        kind: RequestKind,
        user_id: i64,
    ) -> Result<SendRequest, DripletError>;

    /// Records the descriptor the user submitted for an open request.
    async fn set_request_descriptor(
        &self,
        id: i64,
        descriptor: &str,
    ) -> Result<(), DripletError>;

    /// Transitions a request to `Success` with its transaction reference.
    async fn complete_request(&self, id: i64, txid: &str) -> Result<(), DripletError>;

    /// Transitions a request to `AlreadyUsed`.
    async fn mark_request_descriptor_used(&self, id: i64) -> Result<(), DripletError>;

    /// The pending purchase for a chat, if one exists.
    async fn pending_purchase(&self, chat_id: &str)
        -> Result<Option<Purchase>, DripletError>;

    /// Creates a `Pending` purchase ticket for an issued invoice.
    async fn create_purchase(
        &self,
        invoice: &str,
        chat_id: &str,
    ) -> Result<Purchase, DripletError>;

    /// All purchases still awaiting payment, for the reconciliation pass.
    async fn pending_purchases(&self) -> Result<Vec<Purchase>, DripletError>;

    /// Commits a purchase's terminal status.
    async fn set_purchase_status(
        &self,
        id: i64,
        status: PurchaseStatus,
    ) -> Result<(), DripletError>;
}
