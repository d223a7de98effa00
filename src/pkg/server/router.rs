use axum::middleware::from_fn_with_state;
use axum::{
    routing::get,
    Router,
};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/jobs", get(handlers::jobs::list))
        .route(
            "/jobs/user-jobs",
            get(handlers::jobs::list_user_jobs).post(handlers::jobs::record_action),
        )
        .route("/jobs/jobs-count", get(handlers::jobs::count_applied))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
