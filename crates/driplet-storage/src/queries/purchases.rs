// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Purchase ticket queries for the invoice flow.

use chrono::Utc;
use driplet_core::types::{Purchase, PurchaseStatus};
use driplet_core::DripletError;
use rusqlite::params;

use crate::database::{fmt_ts, map_tr_err, parse_enum, parse_ts, Database};

fn row_to_purchase(row: &rusqlite::Row<'_>) -> rusqlite::Result<Purchase> {
    Ok(Purchase {
        id: row.get(0)?,
        invoice: row.get(1)?,
        status: parse_enum(&row.get::<_, String>(2)?)?,
        chat_id: row.get(3)?,
        created_at: parse_ts(&row.get::<_, String>(4)?)?,
    })
}

const PURCHASE_COLUMNS: &str = "id, invoice, status, chat_id, created_at";

/// The pending purchase for a chat, if one exists.
pub async fn pending_purchase(
    db: &Database,
    chat_id: &str,
) -> Result<Option<Purchase>, DripletError> {
    let chat_id = chat_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PURCHASE_COLUMNS} FROM purchases
                 WHERE chat_id = ?1 AND status = 'Pending'
                 LIMIT 1"
            ))?;
            let result = stmt.query_row(params![chat_id], row_to_purchase);
            match result {
                Ok(purchase) => Ok(Some(purchase)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a `Pending` purchase ticket and return it.
pub async fn create_purchase(
    db: &Database,
    invoice: &str,
    chat_id: &str,
) -> Result<Purchase, DripletError> {
    let invoice_owned = invoice.to_string();
    let chat_owned = chat_id.to_string();
    let now = Utc::now();
    let now_str = fmt_ts(now);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO purchases (invoice, status, chat_id, created_at)
                 VALUES (?1, 'Pending', ?2, ?3)",
                params![invoice_owned, chat_owned, now_str],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
        .map(|id| Purchase {
            id,
            invoice: invoice.to_string(),
            status: PurchaseStatus::Pending,
            chat_id: chat_id.to_string(),
            created_at: now,
        })
}

/// All purchases still awaiting payment, oldest first.
pub async fn pending_purchases(db: &Database) -> Result<Vec<Purchase>, DripletError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PURCHASE_COLUMNS} FROM purchases
                 WHERE status = 'Pending'
                 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map([], row_to_purchase)?;
            let mut purchases = Vec::new();
            for row in rows {
                purchases.push(row?);
            }
            Ok(purchases)
        })
        .await
        .map_err(map_tr_err)
}

/// Commit a purchase's status in a single atomic update.
pub async fn set_purchase_status(
    db: &Database,
    id: i64,
    status: PurchaseStatus,
) -> Result<(), DripletError> {
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE purchases SET status = ?1 WHERE id = ?2",
                params![status, id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_find_pending_purchase() {
        let (db, _dir) = setup_db().await;

        assert!(pending_purchase(&db, "chat-1").await.unwrap().is_none());

        let purchase = create_purchase(&db, "lnbc1invoice", "chat-1").await.unwrap();
        assert_eq!(purchase.status, PurchaseStatus::Pending);

        let found = pending_purchase(&db, "chat-1").await.unwrap().unwrap();
        assert_eq!(found.id, purchase.id);
        assert_eq!(found.invoice, "lnbc1invoice");

        // Other chats see nothing.
        assert!(pending_purchase(&db, "chat-2").await.unwrap().is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn terminal_statuses_leave_pending_set() {
        let (db, _dir) = setup_db().await;

        let a = create_purchase(&db, "inv-a", "chat-1").await.unwrap();
        let b = create_purchase(&db, "inv-b", "chat-2").await.unwrap();
        let c = create_purchase(&db, "inv-c", "chat-3").await.unwrap();

        set_purchase_status(&db, a.id, PurchaseStatus::Delivered).await.unwrap();
        set_purchase_status(&db, b.id, PurchaseStatus::Expired).await.unwrap();

        let pending = pending_purchases(&db).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, c.id);

        assert!(pending_purchase(&db, "chat-1").await.unwrap().is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_invoice_is_rejected() {
        let (db, _dir) = setup_db().await;
        create_purchase(&db, "inv-dup", "chat-1").await.unwrap();
        let result = create_purchase(&db, "inv-dup", "chat-2").await;
        assert!(result.is_err());
        db.close().await.unwrap();
    }
}
