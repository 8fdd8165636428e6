use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::models::activity::ActivityLog;
use crate::models::person::Person;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    /// `YYYY-MM`.
    pub month: String,
    pub new: usize,
    pub integrated: usize,
    pub archived: usize,
}

pub fn month_key(at: DateTime<Utc>) -> String {
    format!("{}-{:02}", at.year(), at.month())
}

/// `2024-07` → `Julho/2024`. Unparseable keys are returned unchanged.
pub fn month_label(key: &str) -> String {
    let parsed = key.split_once('-').and_then(|(year, month)| {
        let month: usize = month.parse().ok()?;
        let name = MONTH_NAMES.get(month.checked_sub(1)?)?;
        Some(format!("{name}/{year}"))
    });
    parsed.unwrap_or_else(|| key.to_string())
}

/// New registrations, archives and integrations per calendar month, newest month first.
///
/// The archived bucket counts archive events only. Restores ("foi desarquivado")
/// are not counted even though their text contains "arquivado".
pub fn monthly_overview(people: &[Person], logs: &[ActivityLog]) -> Vec<MonthlyRow> {
    let mut months: BTreeMap<String, MonthlyRow> = BTreeMap::new();

    for person in people {
        row_for(&mut months, month_key(person.created_at)).new += 1;
    }

    for log in logs.iter().filter(|l| l.kind.is_archive()) {
        let row = row_for(&mut months, month_key(log.at));
        row.archived += 1;
        if log.kind.is_integration() {
            row.integrated += 1;
        }
    }

    months.into_values().rev().collect()
}

fn row_for(months: &mut BTreeMap<String, MonthlyRow>, key: String) -> &mut MonthlyRow {
    months.entry(key.clone()).or_insert_with(|| MonthlyRow {
        month: key,
        ..Default::default()
    })
}
