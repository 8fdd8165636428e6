use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::extractors::CurrentUser;
use crate::followup::dashboard::{build_dashboard, DashboardSummary};
use crate::models::activity::ActivityLog;
use crate::models::interaction::Notification;
use crate::state::AppState;

const DEFAULT_ACTIVITY_LIMIT: usize = 30;

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Json<DashboardSummary> {
    let catalog = state.store.catalog();
    let now = Utc::now();
    Json(state.store.read(|data| build_dashboard(catalog, data, now)))
}

/// GET /api/v1/activity
pub async fn handle_recent_activity(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ActivityQuery>,
) -> Json<Vec<ActivityLog>> {
    let limit = params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    Json(state.store.recent_activity(limit))
}

/// GET /api/v1/notifications
pub async fn handle_notifications(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Json<Vec<Notification>> {
    Json(state.store.notifications())
}
