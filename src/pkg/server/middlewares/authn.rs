use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{
    pkg::{internal::auth::User, server::state::AppState},
    prelude::{Error, Result},
};

pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|v| !v.is_empty());
    if let Some(token) = token {
        match User::from_token(&state, token).await {
            Ok(user) => {
                request.extensions_mut().insert(Arc::new(user));
                return Ok(next.run(request).await);
            }
            Err(err) => {
                tracing::warn!("token rejected: {}", &err);
            }
        }
    } else {
        tracing::warn!("token missing, authentication denied");
    }
    Err(Error::Unauthorized)
}
