pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::advisor::handlers as advisor;
use crate::followup::handlers as followup;
use crate::journeys::handlers as journeys;
use crate::people::handlers as people;
use crate::reports::handlers as reports;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Journeys
        .route("/api/v1/journeys", get(journeys::handle_list_journeys))
        .route(
            "/api/v1/journeys/:id/stages",
            get(journeys::handle_journey_stages),
        )
        .route("/api/v1/journeys/:id/board", get(journeys::handle_board))
        .route(
            "/api/v1/journeys/:id/people.csv",
            get(journeys::handle_people_csv),
        )
        // People
        .route(
            "/api/v1/people",
            get(people::handle_list_people).post(people::handle_register_person),
        )
        .route(
            "/api/v1/people/:id",
            get(people::handle_get_person)
                .patch(people::handle_update_person)
                .delete(people::handle_delete_person),
        )
        .route("/api/v1/people/:id/stage", post(people::handle_move_stage))
        .route("/api/v1/people/:id/urgency", post(people::handle_set_urgency))
        .route("/api/v1/people/:id/archive", post(people::handle_archive))
        .route("/api/v1/people/:id/unarchive", post(people::handle_unarchive))
        .route(
            "/api/v1/people/:id/interactions",
            get(people::handle_list_interactions).post(people::handle_add_interaction),
        )
        .route(
            "/api/v1/people/:id/activity",
            get(people::handle_person_activity),
        )
        .route(
            "/api/v1/people/:id/attachments",
            get(people::handle_attachments),
        )
        .route(
            "/api/v1/people/:id/suggestion",
            get(advisor::handle_suggestion),
        )
        // Follow-up
        .route("/api/v1/dashboard", get(followup::handle_dashboard))
        .route("/api/v1/activity", get(followup::handle_recent_activity))
        .route("/api/v1/notifications", get(followup::handle_notifications))
        // Reports
        .route("/api/v1/reports", get(reports::handle_reports))
        .route("/api/v1/reports/:name", get(reports::handle_report_csv))
        .route(
            "/api/v1/reports/leaders/:file",
            get(reports::handle_leader_csv),
        )
        // Users
        .route(
            "/api/v1/users",
            get(users::handle_list_users).post(users::handle_add_user),
        )
        .route(
            "/api/v1/users/:id",
            patch(users::handle_update_user).delete(users::handle_delete_user),
        )
        .with_state(state)
}
