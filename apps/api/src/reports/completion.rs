use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::journeys::JourneyCatalog;
use crate::models::activity::ActivityLog;
use crate::models::person::Person;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionTime {
    pub journey_id: String,
    pub journey_name: String,
    pub avg_days: i64,
    pub completed_count: usize,
}

/// Partial days count as whole days.
pub fn days_between_ceil(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    ((end - start).num_milliseconds() as f64 / MILLIS_PER_DAY).ceil() as i64
}

/// Average days from registration to being archived as integrated, per journey.
/// Journeys with no integrations are left out.
pub fn average_completion_time(
    catalog: &JourneyCatalog,
    people: &[Person],
    logs: &[ActivityLog],
) -> Vec<CompletionTime> {
    let mut per_journey: HashMap<&str, Vec<i64>> = HashMap::new();

    for log in logs.iter().filter(|l| l.kind.is_integration()) {
        let Some(person) = people.iter().find(|p| p.id == log.person_id) else {
            continue;
        };
        per_journey
            .entry(person.journey_id.as_str())
            .or_default()
            .push(days_between_ceil(person.created_at, log.at));
    }

    catalog
        .journeys()
        .iter()
        .filter_map(|journey| {
            let times = per_journey.get(journey.id.as_str())?;
            let avg = times.iter().sum::<i64>() as f64 / times.len() as f64;
            Some(CompletionTime {
                journey_id: journey.id.clone(),
                journey_name: journey.name.clone(),
                avg_days: avg.round() as i64,
                completed_count: times.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ActivityKind;
    use crate::models::person::ArchiveReason;
    use crate::store::seed;
    use chrono::{Duration, TimeZone};

    fn archived_log(person: &Person, after: Duration, reason: ArchiveReason) -> ActivityLog {
        ActivityLog {
            id: format!("log-{}", person.id),
            person_id: person.id.clone(),
            user_id: "user-lider-1".to_string(),
            at: person.created_at + after,
            kind: ActivityKind::Archived { reason },
            details: format!("arquivado com o motivo: {reason}"),
        }
    }

    #[test]
    fn test_two_integrations_at_ten_and_twenty_days_average_fifteen() {
        let catalog = JourneyCatalog::standard();
        let mut people = seed::people();
        people.truncate(2); // both New Convert
        let logs = vec![
            archived_log(&people[0], Duration::days(10), ArchiveReason::Integrated),
            archived_log(&people[1], Duration::days(20), ArchiveReason::Integrated),
        ];

        let result = average_completion_time(&catalog, &people, &logs);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].journey_id, "novo-convertido");
        assert_eq!(result[0].avg_days, 15);
        assert_eq!(result[0].completed_count, 2);
    }

    #[test]
    fn test_other_archive_reasons_ignored() {
        let catalog = JourneyCatalog::standard();
        let people = seed::people();
        let logs = vec![archived_log(&people[0], Duration::days(3), ArchiveReason::Moved)];
        assert!(average_completion_time(&catalog, &people, &logs).is_empty());
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
        assert_eq!(days_between_ceil(start, start + Duration::hours(1)), 1);
        assert_eq!(days_between_ceil(start, start + Duration::days(2)), 2);
    }

    #[test]
    fn test_seeded_completion_times() {
        let catalog = JourneyCatalog::standard();
        let data = seed::tracker_data();
        let result = average_completion_time(&catalog, &data.people, &data.activity);
        // person-5: 2024-03-15 12:00 -> 2024-07-28 11:00; person-7: 2024-04-10 10:00 -> 2024-07-20 11:00.
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].avg_days, 135);
        assert_eq!(result[1].avg_days, 102);
    }

    #[test]
    fn test_logs_for_deleted_people_skipped() {
        let catalog = JourneyCatalog::standard();
        let data = seed::tracker_data();
        let result = average_completion_time(&catalog, &[], &data.activity);
        assert!(result.is_empty());
    }
}
