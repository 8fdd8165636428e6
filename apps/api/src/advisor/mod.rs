//! Next-best-action advisor.
//!
//! A pluggable, trait-based collaborator that turns a person's follow-up
//! context into one suggested action. `AppState` holds an `Arc<dyn Advisor>`,
//! chosen at startup: `LlmAdvisor` when an API key is configured, otherwise
//! `OfflineAdvisor`. Failures never leave this module; callers always get text.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::journeys::JourneyCatalog;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::person::{Person, Urgency};

use prompts::{SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM};

pub const FALLBACK_SUGGESTION: &str = "Erro ao sugerir ação. Verifique a API Key e a conexão.";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Everything the advisor is told about a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionContext {
    pub person_name: String,
    pub journey_name: String,
    pub stage_name: String,
    pub urgency: Urgency,
    pub days_since_decision: i64,
    pub days_since_last_contact: i64,
    pub first_visit_due: Option<DateTime<Utc>>,
}

impl SuggestionContext {
    /// Without any touchpoint, the last contact counts from registration.
    pub fn build(
        person: &Person,
        catalog: &JourneyCatalog,
        last_contact_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let days_since_decision = days_since(person.created_at, now);
        let days_since_last_contact =
            last_contact_at.map_or(days_since_decision, |at| days_since(at, now));

        Self {
            person_name: person.name.clone(),
            journey_name: catalog
                .journey(&person.journey_id)
                .map_or_else(|| person.journey_id.clone(), |j| j.name.clone()),
            stage_name: catalog
                .stage_name(&person.stage_id)
                .unwrap_or(&person.stage_id)
                .to_string(),
            urgency: person.urgency,
            days_since_decision,
            days_since_last_contact,
            first_visit_due: person.first_visit_due,
        }
    }

    pub fn prompt(&self) -> String {
        let due = self.first_visit_due.map(|d| d.format("%d/%m/%Y").to_string());
        SUGGESTION_PROMPT_TEMPLATE
            .replace("{name}", &self.person_name)
            .replace("{journey}", &self.journey_name)
            .replace("{stage}", &self.stage_name)
            .replace("{urgency}", self.urgency.label())
            .replace("{days_since_decision}", &self.days_since_decision.to_string())
            .replace(
                "{days_since_last_contact}",
                &self.days_since_last_contact.to_string(),
            )
            .replace("{first_visit_due}", due.as_deref().unwrap_or("N/A"))
            .replace("{visit_deadline}", due.as_deref().unwrap_or("a data limite"))
    }
}

/// Whole days between two instants in either direction, rounded up.
pub fn days_since(from: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - from).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Implement this to swap suggestion backends without touching the handler.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn suggest(&self, context: &SuggestionContext) -> Result<String, LlmError>;

    fn backend(&self) -> &'static str;
}

/// Claude-backed advisor.
pub struct LlmAdvisor(pub LlmClient);

#[async_trait]
impl Advisor for LlmAdvisor {
    async fn suggest(&self, context: &SuggestionContext) -> Result<String, LlmError> {
        self.0.call_text(&context.prompt(), SUGGESTION_SYSTEM).await
    }

    fn backend(&self) -> &'static str {
        "anthropic"
    }
}

/// Used when no API key is configured; every call fails.
pub struct OfflineAdvisor;

#[async_trait]
impl Advisor for OfflineAdvisor {
    async fn suggest(&self, _context: &SuggestionContext) -> Result<String, LlmError> {
        Err(LlmError::MissingApiKey)
    }

    fn backend(&self) -> &'static str {
        "offline"
    }
}

/// Asks the advisor, degrading to the fallback text on any failure.
pub async fn next_best_action(advisor: &dyn Advisor, context: &SuggestionContext) -> String {
    match advisor.suggest(context).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "Advisor '{}' failed for {}: {e}",
                advisor.backend(),
                context.person_name
            );
            FALLBACK_SUGGESTION.to_string()
        }
    }
}
