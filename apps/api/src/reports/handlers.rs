use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::extractors::CurrentUser;
use crate::reports::export::{
    archive_reasons_csv, completion_csv, conversion_csv, funnel_csv, leader_csv, monthly_csv,
    CsvExport,
};
use crate::reports::{compute_reports, ReportBundle};
use crate::state::AppState;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

fn current_reports(state: &AppState) -> ReportBundle {
    let catalog = state.store.catalog();
    state
        .store
        .read(|data| compute_reports(catalog, &data.people, &data.activity, &data.users))
}

/// `attachment` disposition with an ASCII `filename` fallback and the exact
/// UTF-8 name in `filename*` (RFC 6266 / RFC 5987).
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

/// Serves an export as a file download.
pub fn csv_response(export: CsvExport) -> Result<Response, AppError> {
    let disposition = content_disposition(&export.filename);
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .map_err(|e| anyhow::anyhow!("invalid export filename {}: {e}", export.filename))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.render(),
    )
        .into_response())
}

/// GET /api/v1/reports
pub async fn handle_reports(State(state): State<AppState>, _user: CurrentUser) -> Json<ReportBundle> {
    Json(current_reports(&state))
}

/// GET /api/v1/reports/:name
///
/// `name` is one of `conversion.csv`, `completion.csv`, `monthly.csv`,
/// `funnel.csv`, `archive-reasons.csv`.
pub async fn handle_report_csv(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let reports = current_reports(&state);
    let export = match name.as_str() {
        "conversion.csv" => conversion_csv(&reports.conversion),
        "completion.csv" => completion_csv(&reports.completion_time),
        "monthly.csv" => monthly_csv(&reports.monthly),
        "funnel.csv" => funnel_csv(&reports.funnel),
        "archive-reasons.csv" => archive_reasons_csv(&reports.archive_reasons),
        other => return Err(AppError::NotFound(format!("Report {other} not found"))),
    };
    csv_response(export)
}

/// GET /api/v1/reports/leaders/:id.csv
pub async fn handle_leader_csv(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    let leader_id = file
        .strip_suffix(".csv")
        .ok_or_else(|| AppError::NotFound(format!("Report {file} not found")))?;
    let reports = current_reports(&state);
    let leader = reports
        .leader_performance
        .iter()
        .find(|l| l.leader_id == leader_id)
        .ok_or_else(|| AppError::NotFound(format!("No report for leader {leader_id}")))?;
    csv_response(leader_csv(leader))
}
