use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::followup::due::{overdue_people, urgent_people, OverduePerson};
use crate::journeys::JourneyCatalog;
use crate::models::activity::ActivityLog;
use crate::models::person::Person;
use crate::store::{recent_activity, TrackerData};

const RECENT_ACTIVITY_LIMIT: usize = 30;

#[derive(Debug, Clone, Serialize)]
pub struct JourneyCount {
    pub journey_id: String,
    pub journey_name: String,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageSlice {
    pub stage_id: String,
    pub label: String,
    pub value: usize,
}

/// Pie-chart data: active people per stage, empty stages dropped.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyDistribution {
    pub journey_id: String,
    pub title: String,
    pub data: Vec<StageSlice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_active: usize,
    pub by_journey: Vec<JourneyCount>,
    pub urgent: Vec<Person>,
    pub overdue: Vec<OverduePerson>,
    pub distribution: Vec<JourneyDistribution>,
    pub recent_activity: Vec<ActivityLog>,
}

pub fn build_dashboard(
    catalog: &JourneyCatalog,
    data: &TrackerData,
    now: DateTime<Utc>,
) -> DashboardSummary {
    let active: Vec<&Person> = data.people.iter().filter(|p| !p.is_archived).collect();

    let by_journey = catalog
        .journeys()
        .iter()
        .map(|j| JourneyCount {
            journey_id: j.id.clone(),
            journey_name: j.name.clone(),
            active: active.iter().filter(|p| p.journey_id == j.id).count(),
        })
        .collect();

    let distribution = catalog
        .journeys()
        .iter()
        .map(|j| JourneyDistribution {
            journey_id: j.id.clone(),
            title: j.name.clone(),
            data: stage_slices(catalog, &active, &j.id),
        })
        .collect();

    DashboardSummary {
        total_active: active.len(),
        by_journey,
        urgent: urgent_people(&data.people),
        overdue: overdue_people(&data.people, now),
        distribution,
        recent_activity: recent_activity(&data.activity, RECENT_ACTIVITY_LIMIT),
    }
}

/// The journey's own stages in order, then any other stage its active
/// people sit in (reactivation intakes start at the reconciliation welcome).
fn stage_slices(
    catalog: &JourneyCatalog,
    active: &[&Person],
    journey_id: &str,
) -> Vec<StageSlice> {
    let members: Vec<&Person> = active
        .iter()
        .copied()
        .filter(|p| p.journey_id == journey_id)
        .collect();

    let mut stages = catalog.stages_for(journey_id);
    for person in &members {
        if let Some(stage) = catalog.stage(&person.stage_id) {
            if !stages.iter().any(|s| s.id == stage.id) {
                stages.push(stage);
            }
        }
    }

    stages
        .into_iter()
        .map(|s| StageSlice {
            stage_id: s.id.clone(),
            label: s.name.clone(),
            value: members.iter().filter(|p| p.stage_id == s.id).count(),
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use chrono::TimeZone;

    #[test]
    fn test_seeded_dashboard_counts() {
        let catalog = JourneyCatalog::standard();
        let data = seed::tracker_data();
        let now = Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap();
        let summary = build_dashboard(&catalog, &data, now);

        assert_eq!(summary.total_active, 4);
        let counts: Vec<usize> = summary.by_journey.iter().map(|j| j.active).collect();
        assert_eq!(counts, vec![3, 1, 0]);
        assert_eq!(summary.urgent.len(), 2);
        assert_eq!(summary.overdue.len(), 2);
        assert_eq!(summary.recent_activity.len(), 4);
    }

    #[test]
    fn test_distribution_drops_empty_stages() {
        let catalog = JourneyCatalog::standard();
        let data = seed::tracker_data();
        let summary = build_dashboard(&catalog, &data, Utc::now());
        let new_convert = &summary.distribution[0];
        let labels: Vec<&str> = new_convert.data.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["1. Contato Inicial", "2. Visita de Acolhimento", "4. Discipulado Bloco 2"]
        );
        assert!(summary.distribution[2].data.is_empty());
    }

    #[test]
    fn test_distribution_includes_people_on_foreign_stages() {
        let catalog = JourneyCatalog::standard();
        let mut data = seed::tracker_data();
        let mut returning = data.people[0].clone();
        returning.id = "person-returning".to_string();
        returning.journey_id = "reativacao".to_string();
        returning.stage_id = catalog.intake_stage_id("reativacao").to_string();
        data.people.push(returning);

        let summary = build_dashboard(&catalog, &data, Utc::now());
        let reactivation = &summary.distribution[2];
        assert_eq!(reactivation.journey_id, "reativacao");
        assert_eq!(reactivation.data.len(), 1);
        assert_eq!(reactivation.data[0].stage_id, "acolhimento-inicial");
        assert_eq!(reactivation.data[0].value, 1);
    }
}
