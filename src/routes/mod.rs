use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

pub mod health;
pub mod itinerary;

// Malformed bodies answer with the same JSON error shape as the handlers
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
    InternalError::from_response(err, response).into()
}

/// Mounts every route. Shared by the server binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api").service(
                web::scope("/itineraries")
                    .route("", web::get().to(itinerary::list))
                    .route("", web::post().to(itinerary::create))
                    .route("/{id}", web::get().to(itinerary::get_by_id))
                    .route("/{id}", web::patch().to(itinerary::patch))
                    .route("/{id}/stops", web::post().to(itinerary::add_stop))
                    .route(
                        "/{id}/stops/{stop_id}",
                        web::delete().to(itinerary::remove_stop),
                    )
                    .route("/{id}/grid", web::get().to(itinerary::get_grid))
                    .route("/{id}/grid/view", web::get().to(itinerary::get_grid_view)),
            ),
        );
}
