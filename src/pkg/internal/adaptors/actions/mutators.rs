use sqlx::PgConnection;
use uuid::Uuid;

use crate::errors::classify_write_error;
use crate::pkg::internal::adaptors::actions::spec::{ActionKind, UserActionEntry};
use crate::prelude::Result;

pub struct ActionMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ActionMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ActionMutator { pool }
    }

    /// Inserts the ledger row. Constraint violations are classified here:
    /// duplicate (user_id, job_id) is a conflict, a dangling job or user
    /// reference is a bad reference.
    pub async fn create(
        &mut self,
        user_id: Uuid,
        job_id: Uuid,
        action: ActionKind,
    ) -> Result<UserActionEntry> {
        let row = sqlx::query_as::<_, UserActionEntry>(
            r#"
            INSERT INTO user_job_actions (id, user_id, job_id, action)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, job_id, action, "timestamp"
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(job_id)
        .bind(action)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(classify_write_error)?;
        Ok(row)
    }
}
