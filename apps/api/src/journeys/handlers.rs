use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::errors::AppError;
use crate::extractors::CurrentUser;
use crate::journeys::board::{build_board, journey_people, BoardFilter, JourneyBoard};
use crate::models::journey::{Journey, Stage};
use crate::reports::export::people_csv;
use crate::reports::handlers::csv_response;
use crate::state::AppState;

fn journey_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Journey {id} not found"))
}

/// GET /api/v1/journeys
pub async fn handle_list_journeys(State(state): State<AppState>) -> Json<Vec<Journey>> {
    Json(state.store.catalog().journeys().to_vec())
}

/// GET /api/v1/journeys/:id/stages
pub async fn handle_journey_stages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Stage>>, AppError> {
    let catalog = state.store.catalog();
    catalog.journey(&id).ok_or_else(|| journey_not_found(&id))?;
    Ok(Json(catalog.stages_for(&id).into_iter().cloned().collect()))
}

/// GET /api/v1/journeys/:id/board
pub async fn handle_board(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(id): Path<String>,
    Query(filter): Query<BoardFilter>,
) -> Result<Json<JourneyBoard>, AppError> {
    let catalog = state.store.catalog();
    let board = state
        .store
        .read(|data| build_board(catalog, &data.people, &data.users, &id, &filter, &viewer))
        .ok_or_else(|| journey_not_found(&id))?;
    Ok(Json(board))
}

/// GET /api/v1/journeys/:id/people.csv
pub async fn handle_people_csv(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Query(filter): Query<BoardFilter>,
) -> Result<Response, AppError> {
    let catalog = state.store.catalog();
    let journey = catalog.journey(&id).ok_or_else(|| journey_not_found(&id))?;
    let export = state.store.read(|data| {
        let people = journey_people(&data.people, &id, &filter);
        people_csv(&journey.name, &people, &data.users, catalog)
    });
    csv_response(export)
}
