use serde::Serialize;

use crate::journeys::JourneyCatalog;
use crate::models::person::Person;
use crate::reports::{percent, reached};

/// How many people of a journey made it from its first stage to its second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRate {
    pub journey_id: String,
    /// 0..=100.
    pub rate: u32,
    pub total: usize,
    pub converted: usize,
}

pub fn conversion_rate(catalog: &JourneyCatalog, people: &[Person], journey_id: &str) -> ConversionRate {
    let empty = ConversionRate {
        journey_id: journey_id.to_string(),
        rate: 0,
        total: 0,
        converted: 0,
    };
    let (Some(_), Some(second)) = (
        catalog.stage_with_order(journey_id, 1),
        catalog.stage_with_order(journey_id, 2),
    ) else {
        return empty;
    };

    let in_journey: Vec<&Person> = people.iter().filter(|p| p.journey_id == journey_id).collect();
    let total = in_journey.len();
    let converted = in_journey
        .iter()
        .filter(|p| reached(catalog, p, second.order))
        .count();

    ConversionRate {
        rate: percent(converted, total),
        total,
        converted,
        ..empty
    }
}
