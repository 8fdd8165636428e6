//! Overdue and urgency derivations over first-visit deadlines.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::person::{Person, Urgency};

/// Whole days between the deadline's date and today's date. Both sides are
/// truncated to midnight, so the time of day never shifts the count.
pub fn days_overdue(first_visit_due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now.date_naive() - first_visit_due.date_naive()).num_days()
}

/// A deadline is missed once it lies strictly before the current moment.
pub fn is_overdue(person: &Person, now: DateTime<Utc>) -> bool {
    person.first_visit_due.is_some_and(|due| due < now)
}

#[derive(Debug, Clone, Serialize)]
pub struct OverduePerson {
    #[serde(flatten)]
    pub person: Person,
    pub days_overdue: i64,
}

/// Active people past their first-visit deadline, oldest deadline first.
pub fn overdue_people(people: &[Person], now: DateTime<Utc>) -> Vec<OverduePerson> {
    let mut overdue: Vec<OverduePerson> = people
        .iter()
        .filter(|p| !p.is_archived && is_overdue(p, now))
        .filter_map(|p| {
            p.first_visit_due.map(|due| OverduePerson {
                person: p.clone(),
                days_overdue: days_overdue(due, now),
            })
        })
        .collect();
    overdue.sort_by_key(|o| o.person.first_visit_due);
    overdue
}

/// Active Urgent and High people, Urgent first. Order within a level is preserved.
pub fn urgent_people(people: &[Person]) -> Vec<Person> {
    let mut urgent: Vec<Person> = people
        .iter()
        .filter(|p| !p.is_archived && p.urgency.is_priority())
        .cloned()
        .collect();
    urgent.sort_by_key(|p| p.urgency != Urgency::Urgent);
    urgent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_days_overdue_ignores_time_of_day() {
        let due = at(2024, 7, 10, 23, 59);
        assert_eq!(days_overdue(due, at(2024, 7, 11, 0, 1)), 1);
        assert_eq!(days_overdue(due, at(2024, 7, 11, 23, 58)), 1);
        assert_eq!(days_overdue(due, at(2024, 7, 20, 8, 0)), 10);
    }

    #[test]
    fn test_same_day_is_zero_days_overdue() {
        let due = at(2024, 7, 10, 8, 0);
        let now = at(2024, 7, 10, 18, 0);
        assert_eq!(days_overdue(due, now), 0);
    }

    #[test]
    fn test_overdue_is_strictly_before_now() {
        let mut person = seed::people().remove(0);
        let due = at(2024, 7, 22, 23, 59);
        person.first_visit_due = Some(due);
        assert!(!is_overdue(&person, due));
        assert!(is_overdue(&person, at(2024, 7, 23, 0, 0)));
        person.first_visit_due = None;
        assert!(!is_overdue(&person, at(2030, 1, 1, 0, 0)));
    }

    #[test]
    fn test_overdue_people_sorted_by_deadline() {
        let people = seed::people();
        let overdue = overdue_people(&people, at(2024, 8, 1, 12, 0));
        let ids: Vec<&str> = overdue.iter().map(|o| o.person.id.as_str()).collect();
        assert_eq!(ids, vec!["person-2", "person-1"]);
        assert_eq!(overdue[0].days_overdue, 22);
        assert_eq!(overdue[1].days_overdue, 10);
    }

    #[test]
    fn test_urgent_precede_high_and_order_is_stable() {
        let mut people = seed::people();
        // Make a second High person ahead of the Urgent one.
        people[3].urgency = Urgency::High;
        people.swap(0, 3);
        let urgent = urgent_people(&people);
        let ids: Vec<&str> = urgent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["person-1", "person-4", "person-2"]);
    }

    #[test]
    fn test_archived_people_never_urgent() {
        let mut people = seed::people();
        for p in people.iter_mut() {
            p.urgency = Urgency::Urgent;
        }
        assert_eq!(urgent_people(&people).len(), 4);
    }
}
