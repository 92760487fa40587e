use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

use crate::model::calculation::Calculation;
use crate::state::AppState;
use crate::utils::report::{Report, build_report};

/// Per-profile pay and the combined summary
#[utoipa::path(
    get,
    path = "/api/calculations",
    responses(
        (status = 200, description = "Calculation results", body = Calculation)
    ),
    tag = "Calculation"
)]
pub async fn get_calculations(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let snapshot = state.snapshot()?;
    let calculation = snapshot.calculate(&state.settings);
    debug!(profiles = calculation.results.len(), "Calculation served");
    Ok(HttpResponse::Ok().json(calculation))
}

/// Report rows, daily totals and formatted amounts
#[utoipa::path(
    get,
    path = "/api/report",
    responses(
        (status = 200, description = "Tabular report", body = Report)
    ),
    tag = "Calculation"
)]
pub async fn get_report(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let snapshot = state.snapshot()?;
    let calculation = snapshot.calculate(&state.settings);
    Ok(HttpResponse::Ok().json(build_report(
        &calculation,
        &snapshot.profiles,
        &snapshot.entries,
    )))
}
