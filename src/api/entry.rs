use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::model::TimeEntry;
use crate::state::AppState;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct EntryQuery {
    /// Only entries of this profile
    #[schema(example = "alice")]
    pub profile_id: Option<String>,
}

/// List time entries
#[utoipa::path(
    get,
    path = "/api/entries",
    params(EntryQuery),
    responses(
        (status = 200, description = "Time entries", body = Vec<TimeEntry>)
    ),
    tag = "Time entry"
)]
pub async fn list_entries(
    state: web::Data<AppState>,
    query: web::Query<EntryQuery>,
) -> actix_web::Result<impl Responder> {
    let entries = state.read()?.entries_for(query.profile_id.as_deref());
    Ok(HttpResponse::Ok().json(entries))
}

/// Log a work session
#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = TimeEntry,
    responses(
        (status = 201, description = "Time entry created", body = TimeEntry),
        (status = 422, description = "Validation failed")
    ),
    tag = "Time entry"
)]
#[instrument(name = "create_entry", skip_all, fields(profile_id = %payload.profile_id))]
pub async fn create_entry(
    state: web::Data<AppState>,
    payload: web::Json<TimeEntry>,
) -> actix_web::Result<impl Responder> {
    let created = state.write()?.add_entry(payload.into_inner())?;
    info!(entry_id = %created.id, hours = created.hours, "Time entry created");
    Ok(HttpResponse::Created().json(created))
}

/// Delete a time entry
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(("id", description = "Time entry ID")),
    responses(
        (status = 200, description = "Time entry deleted"),
        (status = 404, description = "Time entry not found")
    ),
    tag = "Time entry"
)]
pub async fn delete_entry(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    state.write()?.delete_entry(&path)?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Time entry deleted"
    })))
}
