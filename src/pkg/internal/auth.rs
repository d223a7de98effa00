use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::{
    pkg::server::state::AppState,
    prelude::{Error, Result},
};

#[derive(FromRow, Debug)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

impl User {
    /// Resolves an opaque session token to its user. Token issuance lives in
    /// the identity service; this side only checks the token table.
    pub async fn from_token(state: &AppState, token_str: &str) -> Result<User> {
        let token = token_str
            .parse::<Uuid>()
            .map_err(|_| Error::Unauthorized)?;
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.email, u.name
            FROM tokens t
            JOIN users u ON u.user_id = t.user_id
            WHERE t.token = $1 AND t.expiry > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&*state.db_pool)
        .await?
        .ok_or(Error::Unauthorized)?;
        Ok(user)
    }
}
