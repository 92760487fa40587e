use crate::{
    api::{backup, calculation, entry, profile},
    config::Config,
    error::ApiError,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Malformed JSON bodies get the same error shape as everything else
    let json_config = web::JsonConfig::default()
        .limit(4 * 1024 * 1024)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    cfg.service(
        web::scope(&config.api_prefix)
            .app_data(json_config)
            .app_data(web::PayloadConfig::new(16 * 1024 * 1024))
            .service(
                web::scope("/profiles")
                    // /profiles
                    .service(
                        web::resource("")
                            .route(web::get().to(profile::list_profiles))
                            .route(web::post().to(profile::create_profile)),
                    )
                    // /profiles/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(profile::get_profile))
                            .route(web::put().to(profile::update_profile))
                            .route(web::delete().to(profile::delete_profile)),
                    )
                    // /profiles/{id}/deductions/{deduction_id}/applied
                    .service(
                        web::resource("/{id}/deductions/{deduction_id}/applied")
                            .route(web::put().to(profile::set_deduction_applied)),
                    ),
            )
            .service(
                web::scope("/entries")
                    .service(
                        web::resource("")
                            .route(web::get().to(entry::list_entries))
                            .route(web::post().to(entry::create_entry)),
                    )
                    .service(web::resource("/{id}").route(web::delete().to(entry::delete_entry))),
            )
            .service(web::resource("/calculations").route(web::get().to(calculation::get_calculations)))
            .service(web::resource("/report").route(web::get().to(calculation::get_report)))
            .service(web::resource("/export").route(web::get().to(backup::export_state)))
            .service(web::resource("/import").route(web::post().to(backup::import_state))),
    );
}
