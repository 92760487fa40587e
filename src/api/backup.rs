use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::model::export::ExportDocument;
use crate::state::{AppState, Store};

/// Export the full state
#[utoipa::path(
    get,
    path = "/api/export",
    responses(
        (status = 200, description = "Export document", body = ExportDocument)
    ),
    tag = "Backup"
)]
pub async fn export_state(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let doc = state.snapshot()?.export(&state.settings);
    Ok(HttpResponse::Ok()
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"hours-payroll-export.json\"",
        ))
        .json(doc))
}

/// Replace the full state from an export document
#[utoipa::path(
    post,
    path = "/api/import",
    request_body = ExportDocument,
    responses(
        (status = 200, description = "State replaced", body = Object, example = json!({
            "message": "Import complete",
            "profiles": 2,
            "entries": 14
        })),
        (status = 400, description = "Document could not be parsed or failed validation")
    ),
    tag = "Backup"
)]
#[instrument(name = "import_state", skip_all, fields(bytes = body.len()))]
pub async fn import_state(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> actix_web::Result<impl Responder> {
    let doc: ExportDocument = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Import document is not valid JSON");
        ApiError::MalformedImport(e.to_string())
    })?;

    let store = Store::from_import(doc).inspect_err(|e| warn!(error = %e, "Import rejected"))?;
    let (profiles, entries) = (store.profiles.len(), store.entries.len());
    state.replace(store)?;

    info!(profiles, entries, "Import complete");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Import complete",
        "profiles": profiles,
        "entries": entries
    })))
}
