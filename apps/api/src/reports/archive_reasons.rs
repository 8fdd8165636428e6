use serde::Serialize;

use crate::models::person::{ArchiveReason, Person};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonCount {
    pub reason: ArchiveReason,
    pub count: usize,
}

/// Archived people grouped by reason, most common first.
pub fn archive_reason_distribution(people: &[Person]) -> Vec<ReasonCount> {
    let mut counts: Vec<ReasonCount> = Vec::new();
    for reason in people
        .iter()
        .filter(|p| p.is_archived)
        .filter_map(|p| p.archive_reason)
    {
        match counts.iter_mut().find(|c| c.reason == reason) {
            Some(entry) => entry.count += 1,
            None => counts.push(ReasonCount { reason, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
