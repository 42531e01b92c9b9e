//! Repository for the `users` table (read-only; the auth service writes it).

use rankly_core::types::UserId;
use sqlx::PgPool;

use crate::models::user::UserSummary;

/// Column list shared across queries.
pub(crate) const SUMMARY_COLUMNS: &str = "id, name, image";

pub struct UserRepo;

impl UserRepo {
    /// Find a user's public summary by id.
    pub async fn find_summary(pool: &PgPool, id: &str) -> Result<Option<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch summaries for several users at once. Missing ids are skipped.
    pub(crate) async fn find_summaries(
        conn: &mut sqlx::PgConnection,
        ids: &[UserId],
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = ANY($1)");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await
    }
}
