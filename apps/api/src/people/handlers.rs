use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extractors::CurrentUser;
use crate::models::activity::ActivityLog;
use crate::models::interaction::{Attachment, InteractionItem, NewInteraction};
use crate::models::person::{ArchiveReason, NewPersonData, Person, PersonUpdate, Urgency};
use crate::models::user::UserRole;
use crate::people::transitions::Destination;
use crate::people::PeopleFilter;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StageMove {
    pub stage_id: String,
}

#[derive(Deserialize)]
pub struct UrgencyChange {
    pub urgency: Urgency,
}

#[derive(Deserialize)]
pub struct ArchiveRequest {
    pub reason: ArchiveReason,
}

/// GET /api/v1/people
pub async fn handle_list_people(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(filter): Query<PeopleFilter>,
) -> Json<Vec<Person>> {
    Json(state.store.list_people(&filter))
}

/// POST /api/v1/people
pub async fn handle_register_person(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<NewPersonData>,
) -> Result<(StatusCode, Json<Person>), AppError> {
    state.simulate_write_latency().await;
    let person = state.store.register_person(
        req,
        &actor,
        Utc::now(),
        state.config.first_visit_due_days,
    )?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// GET /api/v1/people/:id
pub async fn handle_get_person(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Person>, AppError> {
    Ok(Json(state.store.person(&id)?))
}

/// PATCH /api/v1/people/:id
pub async fn handle_update_person(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<PersonUpdate>,
) -> Result<Json<Person>, AppError> {
    user.require(UserRole::can_manage_people, "edit people")?;
    state.simulate_write_latency().await;
    let person = state.store.update_person(&id, req, &user.0, Utc::now())?;
    Ok(Json(person))
}

/// DELETE /api/v1/people/:id
pub async fn handle_delete_person(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require(UserRole::can_manage_people, "delete people")?;
    state.simulate_write_latency().await;
    state.store.delete_person(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/people/:id/stage
pub async fn handle_move_stage(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<StageMove>,
) -> Result<Json<Person>, AppError> {
    user.require(UserRole::can_manage_people, "move people between stages")?;
    transition(&state, &user, &id, Destination::Stage { stage_id: req.stage_id }).await
}

/// POST /api/v1/people/:id/archive
pub async fn handle_archive(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<ArchiveRequest>,
) -> Result<Json<Person>, AppError> {
    user.require(UserRole::can_manage_people, "archive people")?;
    transition(&state, &user, &id, Destination::Archive { reason: req.reason }).await
}

/// POST /api/v1/people/:id/unarchive
pub async fn handle_unarchive(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Person>, AppError> {
    user.require(UserRole::can_manage_people, "restore archived people")?;
    transition(&state, &user, &id, Destination::Restore).await
}

async fn transition(
    state: &AppState,
    user: &CurrentUser,
    person_id: &str,
    destination: Destination,
) -> Result<Json<Person>, AppError> {
    state.simulate_write_latency().await;
    let person = state
        .store
        .transition(person_id, &destination, &user.0, Utc::now())?;
    Ok(Json(person))
}

/// POST /api/v1/people/:id/urgency
pub async fn handle_set_urgency(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UrgencyChange>,
) -> Result<Json<Person>, AppError> {
    user.require(UserRole::can_manage_people, "change urgency")?;
    state.simulate_write_latency().await;
    let person = state
        .store
        .set_urgency(&id, req.urgency, &user.0, Utc::now())?;
    Ok(Json(person))
}

/// GET /api/v1/people/:id/interactions
pub async fn handle_list_interactions(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<InteractionItem>>, AppError> {
    Ok(Json(state.store.interactions(&id, &viewer)?))
}

/// POST /api/v1/people/:id/interactions
///
/// Notes are open to every role; touchpoints need a Pastor or Leader.
pub async fn handle_add_interaction(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<NewInteraction>,
) -> Result<(StatusCode, Json<InteractionItem>), AppError> {
    if req.kind.touchpoint_type().is_some() {
        user.require(UserRole::can_log_touchpoints, "log touchpoints")?;
    }
    state.simulate_write_latency().await;
    let item = state.store.add_interaction(&id, req, &user.0, Utc::now())?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/people/:id/activity
pub async fn handle_person_activity(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<ActivityLog>>, AppError> {
    state.store.person(&id)?;
    Ok(Json(state.store.activity_for(&id)))
}

/// GET /api/v1/people/:id/attachments
pub async fn handle_attachments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Attachment>>, AppError> {
    Ok(Json(state.store.attachments_for(&id)?))
}
