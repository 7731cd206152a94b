// SPDX-FileCopyrightText: 2026 Driplet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User lookup and first-interaction creation.

use chrono::Utc;
use driplet_core::types::User;
use driplet_core::DripletError;
use rusqlite::params;

use crate::database::{fmt_ts, map_tr_err, parse_ts, Database};

/// Return the user with the given external identity, creating it if this
/// is the first interaction.
///
/// Insert and select run inside one `call`, so two concurrent first
/// interactions from the same user cannot create duplicate rows.
pub async fn get_or_create_user(
    db: &Database,
    external_id: &str,
) -> Result<User, DripletError> {
    let external_id = external_id.to_string();
    let now = fmt_ts(Utc::now());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (external_id, created_at) VALUES (?1, ?2)
                 ON CONFLICT (external_id) DO NOTHING",
                params![external_id, now],
            )?;
            let user = conn.query_row(
                "SELECT id, external_id, created_at FROM users WHERE external_id = ?1",
                params![external_id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        external_id: row.get(1)?,
                        created_at: parse_ts(&row.get::<_, String>(2)?)?,
                    })
                },
            )?;
            Ok(user)
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
    async fn first_interaction_creates_user() {
        let (db, _dir) = setup_db().await;
        let user = get_or_create_user(&db, "tg-1001").await.unwrap();
        assert_eq!(user.external_id, "tg-1001");
        assert!(user.id > 0);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn repeated_interactions_return_same_user() {
        let (db, _dir) = setup_db().await;
        let first = get_or_create_user(&db, "tg-1002").await.unwrap();
        let second = get_or_create_user(&db, "tg-1002").await.unwrap();
        assert_eq!(first.id, second.id);

        let other = get_or_create_user(&db, "tg-1003").await.unwrap();
        assert_ne!(first.id, other.id);
        db.close().await.unwrap();
    }
}
