use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::models::user::{User, UserRole};
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The acting user, resolved from the `x-user-id` header.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Fails with 403 unless the user's role has `capability`.
    pub fn require(&self, capability: fn(&UserRole) -> bool, action: &str) -> Result<(), AppError> {
        if capability(&self.0.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Role {} is not allowed to {action}",
                self.0.role
            )))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?;

        state
            .store
            .user(user_id)
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
