use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::extractors::CurrentUser;
use crate::models::user::{NewUserData, User, UserRole, UserUpdate};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn handle_list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.users())
}

/// POST /api/v1/users
pub async fn handle_add_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<NewUserData>,
) -> Result<(StatusCode, Json<User>), AppError> {
    user.require(UserRole::can_manage_users, "manage users")?;
    state.simulate_write_latency().await;
    let created = state.store.add_user(req)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/v1/users/:id
pub async fn handle_update_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<User>, AppError> {
    user.require(UserRole::can_manage_users, "manage users")?;
    state.simulate_write_latency().await;
    Ok(Json(state.store.update_user(&id, req)?))
}

/// DELETE /api/v1/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require(UserRole::can_manage_users, "manage users")?;
    state.simulate_write_latency().await;
    state.store.delete_user(&id, &user.0)?;
    Ok(StatusCode::NO_CONTENT)
}
