//! Per-journey Kanban board: one column per stage plus the archived lane and
//! a lane for active people whose stage is not one of the journey's own.

use serde::{Deserialize, Serialize};

use crate::journeys::JourneyCatalog;
use crate::models::journey::{Journey, Stage};
use crate::models::person::{Person, Urgency};
use crate::models::user::User;

/// Board and journey-export filters. Absent means "all".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardFilter {
    pub responsible_id: Option<String>,
    pub urgency: Option<Urgency>,
}

impl BoardFilter {
    pub fn matches(&self, person: &Person) -> bool {
        self.responsible_id
            .as_ref()
            .map_or(true, |r| &person.responsible_id == r)
            && self.urgency.map_or(true, |u| person.urgency == u)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub stage: Stage,
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyBoard {
    pub journey: Journey,
    pub columns: Vec<BoardColumn>,
    /// Active people whose stage belongs to another journey, such as
    /// reactivation intakes starting at the reconciliation welcome stage.
    pub other_stages: Vec<Person>,
    pub archived: Vec<Person>,
    /// Users selectable in the "Responsável" filter.
    pub responsibles: Vec<User>,
    /// Whether the viewer may drag cards between columns.
    pub can_move: bool,
}

/// The journey's people matching `filter`, active and archived alike.
pub fn journey_people(people: &[Person], journey_id: &str, filter: &BoardFilter) -> Vec<Person> {
    people
        .iter()
        .filter(|p| p.journey_id == journey_id && filter.matches(p))
        .cloned()
        .collect()
}

pub fn build_board(
    catalog: &JourneyCatalog,
    people: &[Person],
    users: &[User],
    journey_id: &str,
    filter: &BoardFilter,
    viewer: &User,
) -> Option<JourneyBoard> {
    let journey = catalog.journey(journey_id)?.clone();
    let (archived, active): (Vec<Person>, Vec<Person>) = journey_people(people, journey_id, filter)
        .into_iter()
        .partition(|p| p.is_archived);

    let (active, other_stages): (Vec<Person>, Vec<Person>) = active
        .into_iter()
        .partition(|p| catalog.is_stage_of(&p.stage_id, journey_id));

    let columns = catalog
        .stages_for(journey_id)
        .into_iter()
        .map(|stage| BoardColumn {
            stage: stage.clone(),
            people: active
                .iter()
                .filter(|p| p.stage_id == stage.id)
                .cloned()
                .collect(),
        })
        .collect();

    Some(JourneyBoard {
        journey,
        columns,
        other_stages,
        archived,
        responsibles: users
            .iter()
            .filter(|u| u.role.takes_responsibility())
            .cloned()
            .collect(),
        can_move: viewer.role.can_manage_people(),
    })
}
