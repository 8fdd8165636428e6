use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::advisor::{next_best_action, SuggestionContext};
use crate::errors::AppError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SuggestionResponse {
    pub person_id: String,
    pub suggestion: String,
    pub backend: &'static str,
}

/// GET /api/v1/people/:id/suggestion
///
/// Answers 200 even when the advisor fails; the body then carries the fallback text.
pub async fn handle_suggestion(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(person_id): Path<String>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let person = state.store.person(&person_id)?;
    let last_contact = state.store.last_contact_at(&person_id);
    let context = SuggestionContext::build(&person, state.store.catalog(), last_contact, Utc::now());

    let suggestion = next_best_action(state.advisor.as_ref(), &context).await;
    Ok(Json(SuggestionResponse {
        person_id,
        suggestion,
        backend: state.advisor.backend(),
    }))
}
