//! # Session Repository
//!
//! One row per successful login, bounded per user by pruning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// A login session.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Session {
    pub sid: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Records a session for `user` under the given id.
    pub async fn create(&self, sid: &str, user: &str) -> DbResult<Session> {
        let session = Session {
            sid: sid.to_string(),
            user: user.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO sessions (sid, user, created_at) VALUES (?1, ?2, ?3)")
            .bind(&session.sid)
            .bind(&session.user)
            .bind(session.created_at)
            .execute(&self.pool)
            .await?;

        Ok(session)
    }

    /// Deletes all but the `keep` newest sessions of `user`. Returns how
    /// many were removed.
    pub async fn prune_for_user(&self, user: &str, keep: i64) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE user = ?1
              AND sid NOT IN (
                  SELECT sid FROM sessions
                  WHERE user = ?1
                  ORDER BY created_at DESC, rowid DESC
                  LIMIT ?2
              )
            "#,
        )
        .bind(user)
        .bind(keep)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            debug!(user = %user, pruned = result.rows_affected(), "Old sessions pruned");
        }
        Ok(result.rows_affected())
    }

    /// Number of sessions of a user (diagnostics and tests).
    pub async fn count_for_user(&self, user: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user = ?1")
            .bind(user)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::tests::sample_pair;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_prune_keeps_newest() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, user) = sample_pair("254700000001", "jane@example.com");
        db.users().insert(&user).await.unwrap();

        let sessions = db.sessions();
        for sid in ["s1", "s2", "s3", "s4"] {
            sessions.create(sid, "jane@example.com").await.unwrap();
        }

        assert_eq!(sessions.prune_for_user("jane@example.com", 2).await.unwrap(), 2);
        assert_eq!(sessions.count_for_user("jane@example.com").await.unwrap(), 2);
        assert_eq!(sessions.prune_for_user("jane@example.com", 2).await.unwrap(), 0);

        let remaining: Vec<String> =
            sqlx::query_scalar("SELECT sid FROM sessions ORDER BY sid")
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert_eq!(remaining, vec!["s3".to_string(), "s4".to_string()]);
    }
}
