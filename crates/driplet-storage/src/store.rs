// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`Store`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use driplet_core::types::{Purchase, PurchaseStatus, RequestKind, SendRequest, User};
use driplet_core::{DripletError, Store};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all operations to the typed
/// query modules. Per-record atomicity comes from single UPDATE/INSERT
/// statements executed on the single writer thread.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens (creating if needed) the store at the given path and runs
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, DripletError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    /// Checkpoints and closes the underlying database.
    pub async fn close(self) -> Result<(), DripletError> {
        self.db.close().await
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_or_create_user(&self, external_id: &str) -> Result<User, DripletError> {
        queries::users::get_or_create_user(&self.db, external_id).await
    }

    async fn latest_open_request(
        &self,
        kind: RequestKind,
        user_id: i64,
    ) -> Result<Option<SendRequest>, DripletError> {
        queries::requests::latest_open_request(&self.db, kind, user_id).await
    }

    async fn recent_successes(
        &self,
        kind: RequestKind,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, DripletError> {
        queries::requests::recent_successes(&self.db, kind, user_id, since).await
    }

    async fn descriptor_consumed(&self, descriptor: &str) -> Result<bool, DripletError> {
        queries::requests::descriptor_consumed(&self.db, descriptor).await
    }

    async fn create_request(
        &self,
        kind: RequestKind,
        user_id: i64,
    ) -> Result<SendRequest, DripletError> {
        queries::requests::create_request(&self.db, kind, user_id).await
    }

    async fn set_request_descriptor(
        &self,
        id: i64,
        descriptor: &str,
    ) -> Result<(), DripletError> {
        queries::requests::set_request_descriptor(&self.db, id, descriptor).await
    }

    async fn complete_request(&self, id: i64, txid: &str) -> Result<(), DripletError> {
        queries::requests::complete_request(&self.db, id, txid).await
    }

    async fn mark_request_descriptor_used(&self, id: i64) -> Result<(), DripletError> {
        queries::requests::mark_request_descriptor_used(&self.db, id).await
    }

    async fn pending_purchase(
        &self,
        chat_id: &str,
    ) -> Result<Option<Purchase>, DripletError> {
        queries::purchases::pending_purchase(&self.db, chat_id).await
    }

    async fn create_purchase(
        &self,
        invoice: &str,
        chat_id: &str,
    ) -> Result<Purchase, DripletError> {
        queries::purchases::create_purchase(&self.db, invoice, chat_id).await
    }

    async fn pending_purchases(&self) -> Result<Vec<Purchase>, DripletError> {
        queries::purchases::pending_purchases(&self.db).await
    }

    async fn set_purchase_status(
        &self,
        id: i64,
        status: PurchaseStatus,
    ) -> Result<(), DripletError> {
        queries::purchases::set_purchase_status(&self.db, id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driplet_core::types::SendStatus;
    use tempfile::tempdir;

    #[tokio::test]
    async fn full_request_lifecycle_through_store() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("store.db");
        let store = SqliteStore::open(db_path.to_str().unwrap()).await.unwrap();

        let user = store.get_or_create_user("tg-42").await.unwrap();

        let request = store
            .create_request(RequestKind::Asset, user.id)
            .await
            .unwrap();
        store
            .set_request_descriptor(request.id, "rgb:invoice-1")
            .await
            .unwrap();
        store.complete_request(request.id, "tx1").await.unwrap();

        assert!(store
            .latest_open_request(RequestKind::Asset, user.id)
            .await
            .unwrap()
            .is_none());
        assert!(store.descriptor_consumed("rgb:invoice-1").await.unwrap());

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("restart.db");
        let path = db_path.to_str().unwrap();

        let store = SqliteStore::open(path).await.unwrap();
        let user = store.get_or_create_user("tg-7").await.unwrap();
        let request = store
            .create_request(RequestKind::Btc, user.id)
            .await
            .unwrap();
        store.create_purchase("inv-1", "chat-7").await.unwrap();
        store.close().await.unwrap();

        // Open requests and pending purchases outlive a process restart.
        let store = SqliteStore::open(path).await.unwrap();
        let reopened = store.get_or_create_user("tg-7").await.unwrap();
        assert_eq!(reopened.id, user.id);

        let open = store
            .latest_open_request(RequestKind::Btc, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(open.id, request.id);
        assert_eq!(open.status, SendStatus::Pending);

        assert_eq!(store.pending_purchases().await.unwrap().len(), 1);
        store.close().await.unwrap();
    }
}
