use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::actions::spec::{
    ActionKind, AppliedCounts, BucketWindows, UserActionEntry,
};
use crate::prelude::Result;

const ACTION_COLUMNS: &str = "id, user_id, job_id, action, \"timestamp\"";

pub struct ActionSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ActionSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ActionSelector { pool }
    }

    /// Every job id the user has acted on, any kind. Unbounded read; a single
    /// user's ledger is expected to stay small.
    pub async fn acted_job_ids(&mut self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT job_id FROM user_job_actions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn get_by_user_and_job(
        &mut self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<UserActionEntry>> {
        let row = sqlx::query_as::<_, UserActionEntry>(&format!(
            "SELECT {ACTION_COLUMNS} FROM user_job_actions WHERE user_id = $1 AND job_id = $2"
        ))
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// A page of the user's ledger for one action kind, newest first.
    pub async fn get_for_user(
        &mut self,
        user_id: Uuid,
        action: ActionKind,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<UserActionEntry>> {
        let rows = sqlx::query_as::<_, UserActionEntry>(&format!(
            "SELECT {ACTION_COLUMNS} FROM user_job_actions \
             WHERE user_id = $1 AND action = $2 \
             ORDER BY \"timestamp\" DESC, id OFFSET $3 LIMIT $4"
        ))
        .bind(user_id)
        .bind(action)
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn applied_counts(
        &mut self,
        user_id: Uuid,
        windows: &BucketWindows,
    ) -> Result<AppliedCounts> {
        let (today, last_week, last_month) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                count(*) FILTER (WHERE "timestamp" >= $2),
                count(*) FILTER (WHERE "timestamp" >= $3 AND "timestamp" < $2),
                count(*) FILTER (WHERE "timestamp" >= $4 AND "timestamp" < $3)
            FROM user_job_actions
            WHERE user_id = $1 AND action = $5
            "#,
        )
        .bind(user_id)
        .bind(windows.today_start)
        .bind(windows.week_start)
        .bind(windows.month_start)
        .bind(ActionKind::Applied)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(AppliedCounts {
            applied_today: today,
            applied_last_week: last_week,
            applied_last_month: last_month,
        })
    }
}
