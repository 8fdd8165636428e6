//! Reporting engine.
//!
//! Pure read-side aggregations over the person and activity collections.
//! Nothing is cached: every call recomputes from the collections it is given.

pub mod archive_reasons;
pub mod completion;
pub mod conversion;
pub mod export;
pub mod funnel;
pub mod handlers;
pub mod leaders;
pub mod monthly;

use serde::Serialize;

use crate::journeys::catalog::NEW_CONVERT_JOURNEY_ID;
use crate::journeys::JourneyCatalog;
use crate::models::activity::ActivityLog;
use crate::models::person::Person;
use crate::models::user::User;

use archive_reasons::{archive_reason_distribution, ReasonCount};
use completion::{average_completion_time, CompletionTime};
use conversion::{conversion_rate, ConversionRate};
use funnel::{funnel_analysis, JourneyFunnel};
use leaders::{leader_performance, LeaderPerformance};
use monthly::{monthly_overview, MonthlyRow};

/// Every report shown on the reports page.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    pub conversion: ConversionRate,
    pub completion_time: Vec<CompletionTime>,
    pub leader_performance: Vec<LeaderPerformance>,
    pub funnel: Vec<JourneyFunnel>,
    pub archive_reasons: Vec<ReasonCount>,
    pub monthly: Vec<MonthlyRow>,
}

pub fn compute_reports(
    catalog: &JourneyCatalog,
    people: &[Person],
    logs: &[ActivityLog],
    users: &[User],
) -> ReportBundle {
    ReportBundle {
        conversion: conversion_rate(catalog, people, NEW_CONVERT_JOURNEY_ID),
        completion_time: average_completion_time(catalog, people, logs),
        leader_performance: leader_performance(catalog, people, users),
        funnel: funnel_analysis(catalog, people),
        archive_reasons: archive_reason_distribution(people),
        monthly: monthly_overview(people, logs),
    }
}

/// `part / whole` as a rounded percentage; zero when `whole` is zero.
pub(crate) fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Whether `person` has reached (or passed) the stage with `order`.
pub(crate) fn reached(catalog: &JourneyCatalog, person: &Person, order: u32) -> bool {
    catalog
        .stage_order(&person.stage_id)
        .is_some_and(|o| o >= order)
}
