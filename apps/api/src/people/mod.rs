// Person store write paths: intake, stage transitions, interactions.

pub mod handlers;
pub mod intake;
pub mod interactions;
pub mod transitions;

use serde::Deserialize;

use crate::models::person::{Person, Urgency};

/// Listing filters. All present filters must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleFilter {
    /// Case-insensitive substring of the person's name.
    pub q: Option<String>,
    pub journey_id: Option<String>,
    pub responsible_id: Option<String>,
    pub urgency: Option<Urgency>,
    pub archived: Option<bool>,
}

impl PeopleFilter {
    pub fn matches(&self, person: &Person) -> bool {
        let name_match = match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => person.name.to_lowercase().contains(&q.to_lowercase()),
            _ => true,
        };
        name_match
            && self
                .journey_id
                .as_ref()
                .map_or(true, |j| &person.journey_id == j)
            && self
                .responsible_id
                .as_ref()
                .map_or(true, |r| &person.responsible_id == r)
            && self.urgency.map_or(true, |u| person.urgency == u)
            && self.archived.map_or(true, |a| person.is_archived == a)
    }
}
