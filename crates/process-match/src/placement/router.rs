use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    AssignmentId, AssignmentView, Communication, PlacementRequest, Potential, ReassignmentRequest,
};
use super::service::PlacementService;
use super::store::{PlacementStore, StoreError};
use crate::catalog::{export_csv, CatalogImporter};
use crate::report::{
    DailyPlacementEntry, PotentialShareEntry, StaffingInsights, VacancyOverviewEntry,
};

/// Router builder exposing the catalog, matching, placement, and report
/// endpoints.
pub fn placement_router<S>(service: Arc<PlacementService<S>>) -> Router
where
    S: PlacementStore + 'static,
{
    Router::new()
        .route("/api/v1/catalog/import", post(import_catalog_handler::<S>))
        .route("/api/v1/catalog", get(catalog_handler::<S>))
        .route("/api/v1/catalog/export", get(export_catalog_handler::<S>))
        .route("/api/v1/processes/matches", get(matches_handler::<S>))
        .route(
            "/api/v1/processes/suggestions",
            get(suggestions_handler::<S>),
        )
        .route(
            "/api/v1/placements",
            post(allocate_handler::<S>).get(list_placements_handler::<S>),
        )
        .route(
            "/api/v1/placements/:assignment_id",
            get(placement_handler::<S>)
                .put(reassign_handler::<S>)
                .delete(withdraw_handler::<S>),
        )
        .route("/api/v1/reports/summary", get(report_summary_handler::<S>))
        .route("/api/v1/reports/history", get(history_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct CatalogImportRequest {
    pub csv: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogImportResponse {
    pub processes: usize,
    pub open_slots: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFilterQuery {
    pub(crate) potential: Option<Potential>,
    pub(crate) communication: Option<Communication>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttributeQuery {
    pub(crate) potential: Potential,
    pub(crate) communication: Communication,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlacementListQuery {
    pub(crate) email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlacementReportResponse {
    pub generated_at: DateTime<Utc>,
    pub total_processes: usize,
    pub open_processes: usize,
    pub open_slots: u64,
    pub placements: usize,
    pub placed: usize,
    pub unplaced: usize,
    pub vacancy_overview: Vec<VacancyOverviewEntry>,
    pub potential_distribution: Vec<PotentialShareEntry>,
    pub daily_history: Vec<DailyPlacementEntry>,
    pub insights: StaffingInsights,
}

fn store_error_response(error: StoreError) -> Response {
    let status = match &error {
        StoreError::DuplicateEmail(_) | StoreError::SlotsExhausted(_) => StatusCode::CONFLICT,
        StoreError::ProcessNotFound(_) | StoreError::AssignmentNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn import_catalog_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    axum::Json(request): axum::Json<CatalogImportRequest>,
) -> Response
where
    S: PlacementStore + 'static,
{
    let reader = Cursor::new(request.csv.into_bytes());
    let catalog = match CatalogImporter::from_reader(reader) {
        Ok(catalog) => catalog,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let open_slots = catalog.total_open_slots();
    match service.install_catalog(catalog) {
        Ok(processes) => {
            let body = CatalogImportResponse {
                processes,
                open_slots,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    Query(filter): Query<CatalogFilterQuery>,
) -> Response
where
    S: PlacementStore + 'static,
{
    match service.filtered_catalog(filter.potential, filter.communication) {
        Ok(processes) => (StatusCode::OK, axum::Json(processes)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn export_catalog_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
) -> Response
where
    S: PlacementStore + 'static,
{
    let processes = match service.catalog() {
        Ok(processes) => processes,
        Err(error) => return store_error_response(error),
    };

    match export_csv(&processes) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            body,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn matches_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    Query(query): Query<AttributeQuery>,
) -> Response
where
    S: PlacementStore + 'static,
{
    match service.matches(query.potential, query.communication) {
        Ok(processes) => (StatusCode::OK, axum::Json(processes)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn suggestions_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    Query(query): Query<AttributeQuery>,
) -> Response
where
    S: PlacementStore + 'static,
{
    match service.suggestions(query.potential, query.communication) {
        Ok(suggestions) => (StatusCode::OK, axum::Json(suggestions)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn allocate_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    axum::Json(request): axum::Json<PlacementRequest>,
) -> Response
where
    S: PlacementStore + 'static,
{
    match service.allocate(request) {
        Ok(result) => (StatusCode::CREATED, axum::Json(result)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn list_placements_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    Query(query): Query<PlacementListQuery>,
) -> Response
where
    S: PlacementStore + 'static,
{
    let listed = match query.email.as_deref() {
        Some(email) => service
            .find_by_email(email)
            .map(|found| found.into_iter().collect()),
        None => service.list(),
    };

    match listed {
        Ok(assignments) => {
            let views: Vec<AssignmentView> =
                assignments.iter().map(|record| record.to_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn placement_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    Path(assignment_id): Path<String>,
) -> Response
where
    S: PlacementStore + 'static,
{
    let id = AssignmentId(assignment_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.to_view())).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn reassign_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    Path(assignment_id): Path<String>,
    axum::Json(request): axum::Json<ReassignmentRequest>,
) -> Response
where
    S: PlacementStore + 'static,
{
    let id = AssignmentId(assignment_id);
    match service.reassign(&id, request) {
        Ok(record) => (StatusCode::OK, axum::Json(record.to_view())).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn withdraw_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
    Path(assignment_id): Path<String>,
) -> Response
where
    S: PlacementStore + 'static,
{
    let id = AssignmentId(assignment_id);
    match service.withdraw(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.to_view())).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn report_summary_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
) -> Response
where
    S: PlacementStore + 'static,
{
    let report = match service.report() {
        Ok(report) => report,
        Err(error) => return store_error_response(error),
    };

    let summary = report.summary();
    let insights = summary.insights();
    let body = PlacementReportResponse {
        generated_at: Utc::now(),
        total_processes: summary.total_processes,
        open_processes: summary.open_processes,
        open_slots: summary.open_slots,
        placements: summary.placements,
        placed: summary.placed,
        unplaced: summary.unplaced,
        vacancy_overview: summary.vacancy_overview,
        potential_distribution: summary.potential_distribution,
        daily_history: summary.daily_history,
        insights,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn history_handler<S>(
    State(service): State<Arc<PlacementService<S>>>,
) -> Response
where
    S: PlacementStore + 'static,
{
    match service.history_by_day() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => store_error_response(error),
    }
}
