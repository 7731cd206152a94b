// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Send request queries: open-request lookup, rate-limit window, descriptor
//! reuse exclusion, and status transitions.

use chrono::{DateTime, Utc};
use driplet_core::types::{RequestKind, SendRequest, SendStatus};
use driplet_core::DripletError;
use rusqlite::params;

use crate::database::{fmt_ts, map_tr_err, parse_enum, parse_ts, Database};

fn row_to_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<SendRequest> {
    Ok(SendRequest {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: parse_enum(&row.get::<_, String>(2)?)?,
        descriptor: row.get(3)?,
        status: parse_enum(&row.get::<_, String>(4)?)?,
        txid: row.get(5)?,
        created_at: parse_ts(&row.get::<_, String>(6)?)?,
    })
}

const REQUEST_COLUMNS: &str = "id, user_id, kind, descriptor, status, txid, created_at";

/// The newest request of `kind` for `user_id` still in `Pending` or
/// `AlreadyUsed`.
pub async fn latest_open_request(
    db: &Database,
    kind: RequestKind,
    user_id: i64,
) -> Result<Option<SendRequest>, DripletError> {
    let kind = kind.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REQUEST_COLUMNS} FROM send_requests
                 WHERE user_id = ?1 AND kind = ?2 AND status IN ('Pending', 'AlreadyUsed')
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1"
            ))?;
            let result = stmt.query_row(params![user_id, kind], row_to_request);
            match result {
                Ok(request) => Ok(Some(request)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Creation timestamps of successful requests of `kind` newer than `since`,
/// oldest first.
pub async fn recent_successes(
    db: &Database,
    kind: RequestKind,
    user_id: i64,
    since: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, DripletError> {
    let kind = kind.to_string();
    let since = fmt_ts(since);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT created_at FROM send_requests
                 WHERE user_id = ?1 AND kind = ?2 AND status = 'Success' AND created_at > ?3
                 ORDER BY created_at ASC",
            )?;
            let rows = stmt.query_map(params![user_id, kind, since], |row| {
                parse_ts(&row.get::<_, String>(0)?)
            })?;
            let mut timestamps = Vec::new();
            for row in rows {
                timestamps.push(row?);
            }
            Ok(timestamps)
        })
        .await
        .map_err(map_tr_err)
}

/// Whether any asset request has ever consumed this descriptor, for any
/// user. Consumed means `Success` or `AlreadyUsed`.
pub async fn descriptor_consumed(
    db: &Database,
    descriptor: &str,
) -> Result<bool, DripletError> {
    let descriptor = descriptor.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM send_requests
                 WHERE kind = 'Asset' AND descriptor = ?1
                   AND status IN ('Success', 'AlreadyUsed')",
                params![descriptor],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a fresh `Pending` request and return it.
pub async fn create_request(
    db: &Database,
    kind: RequestKind,
    user_id: i64,
) -> Result<SendRequest, DripletError> {
    let kind_str = kind.to_string();
    let now = Utc::now();
    let now_str = fmt_ts(now);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO send_requests (user_id, kind, status, created_at)
                 VALUES (?1, ?2, 'Pending', ?3)",
                params![user_id, kind_str, now_str],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
        .map(|id| SendRequest {
            id,
            user_id,
            kind,
            descriptor: None,
            status: SendStatus::Pending,
            txid: None,
            created_at: now,
        })
}

/// Record the descriptor the user submitted for an open request.
pub async fn set_request_descriptor(
    db: &Database,
    id: i64,
    descriptor: &str,
) -> Result<(), DripletError> {
    let descriptor = descriptor.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE send_requests SET descriptor = ?1 WHERE id = ?2",
                params![descriptor, id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Transition a request to `Success` and record its transaction reference.
pub async fn complete_request(db: &Database, id: i64, txid: &str) -> Result<(), DripletError> {
    let txid = txid.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE send_requests SET status = 'Success', txid = ?1 WHERE id = ?2",
                params![txid, id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Transition a request to `AlreadyUsed`.
pub async fn mark_request_descriptor_used(db: &Database, id: i64) -> Result<(), DripletError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE send_requests SET status = 'AlreadyUsed' WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
