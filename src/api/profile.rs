use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::model::Profile;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct SetApplied {
    #[schema(example = false)]
    pub applied: bool,
}

/// List profiles
#[utoipa::path(
    get,
    path = "/api/profiles",
    responses(
        (status = 200, description = "All profiles", body = Vec<Profile>)
    ),
    tag = "Profile"
)]
pub async fn list_profiles(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let store = state.read()?;
    Ok(HttpResponse::Ok().json(&store.profiles))
}

/// Create profile
#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = Profile,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 409, description = "Profile id already in use"),
        (status = 422, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed: name must not be empty",
            "details": ["name must not be empty"]
        }))
    ),
    tag = "Profile"
)]
#[instrument(name = "create_profile", skip_all, fields(name = %payload.name))]
pub async fn create_profile(
    state: web::Data<AppState>,
    payload: web::Json<Profile>,
) -> actix_web::Result<impl Responder> {
    let created = state.write()?.create_profile(payload.into_inner())?;
    info!(profile_id = %created.id, "Profile created");
    Ok(HttpResponse::Created().json(created))
}

/// Get profile
#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(("id", description = "Profile ID")),
    responses(
        (status = 200, body = Profile),
        (status = 404, description = "Profile not found")
    ),
    tag = "Profile"
)]
pub async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let store = state.read()?;
    let profile = store.profile(&path)?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Replace profile
#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    params(("id", description = "Profile ID")),
    request_body = Profile,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 404, description = "Profile not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Profile"
)]
#[instrument(name = "update_profile", skip_all, fields(profile_id = %path))]
pub async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Profile>,
) -> actix_web::Result<impl Responder> {
    let updated = state.write()?.replace_profile(&path, payload.into_inner())?;
    info!("Profile updated");
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete profile and its time entries
#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    params(("id", description = "Profile ID")),
    responses(
        (status = 200, description = "Profile deleted", body = Object, example = json!({
            "message": "Profile deleted",
            "deleted_entries": 3
        })),
        (status = 404, description = "Profile not found")
    ),
    tag = "Profile"
)]
#[instrument(name = "delete_profile", skip_all, fields(profile_id = %path))]
pub async fn delete_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let deleted_entries = state.write()?.delete_profile(&path)?;
    info!(deleted_entries, "Profile deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Profile deleted",
        "deleted_entries": deleted_entries
    })))
}

/// Switch a deduction on or off for calculations
#[utoipa::path(
    put,
    path = "/api/profiles/{id}/deductions/{deduction_id}/applied",
    params(
        ("id", description = "Profile ID"),
        ("deduction_id", description = "Deduction ID")
    ),
    request_body = SetApplied,
    responses(
        (status = 200, description = "Deduction toggled"),
        (status = 404, description = "Profile or deduction not found")
    ),
    tag = "Profile"
)]
#[instrument(name = "set_deduction_applied", skip_all)]
pub async fn set_deduction_applied(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    payload: web::Json<SetApplied>,
) -> actix_web::Result<impl Responder> {
    let (profile_id, deduction_id) = path.into_inner();
    state
        .write()?
        .set_applied(&profile_id, &deduction_id, payload.applied)?;
    info!(%profile_id, %deduction_id, applied = payload.applied, "Deduction toggled");
    Ok(HttpResponse::Ok().json(json!({
        "profile_id": profile_id,
        "deduction_id": deduction_id,
        "applied": payload.applied
    })))
}
