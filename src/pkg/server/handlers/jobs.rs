use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::{
                actions::{
                    mutators::ActionMutator,
                    selectors::ActionSelector,
                    spec::{ActionKind, AppliedCounts, BucketWindows},
                },
                jobs::{
                    selectors::JobSelector,
                    spec::{JobEntry, JobFilter, JobOut, SortDirection},
                },
            },
            auth::User,
            pagination::PaginationParams,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

#[derive(Deserialize)]
pub struct ListJobsQuery {
    pub sponsored: Option<bool>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct UserJobsQuery {
    #[serde(default)]
    pub action: ActionKind,
}

#[derive(Deserialize)]
pub struct UserJobActionInput {
    pub job_id: Uuid,
    pub action: ActionKind,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Query(params): Query<ListJobsQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<Value>> {
    pagination.validate()?;
    let sort = match &params.sort {
        Some(s) => s.parse::<SortDirection>()?,
        None => SortDirection::default(),
    };

    let mut tx = state.db_pool.begin_txn().await?;
    let excluded = ActionSelector::new(&mut tx)
        .acted_job_ids(user.user_id)
        .await?;
    let filter = JobFilter {
        open_on: Local::now().date_naive(),
        excluded_ids: excluded,
        sponsored: params.sponsored,
        search: params.search,
    };

    let total = JobSelector::new(&mut tx).count_open(&filter).await?;
    let jobs: Vec<JobOut> = JobSelector::new(&mut tx)
        .list_open(&filter, sort, pagination.offset(), pagination.limit())
        .await?
        .into_iter()
        .map(JobOut::from)
        .collect();

    Ok(Json(json!({
        "total": total,
        "jobs": jobs,
    })))
}

pub async fn list_user_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Query(params): Query<UserJobsQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<Vec<JobOut>>> {
    pagination.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let actions = ActionSelector::new(&mut tx)
        .get_for_user(
            user.user_id,
            params.action,
            pagination.offset(),
            pagination.limit(),
        )
        .await?;
    if actions.is_empty() {
        return Ok(Json(vec![]));
    }

    let ids: Vec<Uuid> = actions.iter().map(|a| a.job_id).collect();
    let mut by_id: HashMap<Uuid, JobEntry> = JobSelector::new(&mut tx)
        .get_by_ids(&ids)
        .await?
        .into_iter()
        .map(|job| (job.id, job))
        .collect();
    // response order follows the ledger page, newest action first
    let jobs = ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(JobOut::from)
        .collect();
    Ok(Json(jobs))
}

pub async fn record_action(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<UserJobActionInput>,
) -> Result<(StatusCode, Json<Value>)> {
    let mut tx = state.db_pool.begin_txn().await?;
    if ActionSelector::new(&mut tx)
        .get_by_user_and_job(user.user_id, input.job_id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "action for this job already exists for the user".into(),
        ));
    }

    // The pre-check is a latency shortcut; the unique index settles races.
    let action = ActionMutator::new(&mut tx)
        .create(user.user_id, input.job_id, input.action)
        .await?;
    tx.commit().await?;
    tracing::info!(
        "user {} marked job {} as {:?}",
        user.user_id,
        action.job_id,
        action.action
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "user job action created" })),
    ))
}

pub async fn count_applied(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<AppliedCounts>> {
    let windows = BucketWindows::at(Local::now().date_naive());
    let mut tx = state.db_pool.begin_txn().await?;
    let counts = ActionSelector::new(&mut tx)
        .applied_counts(user.user_id, &windows)
        .await?;
    Ok(Json(counts))
}
