use crate::models::itinerary::{ItineraryPatch, ItinerarySubmission, NewStop};
use crate::services::grid_view_service::GridViewService;
use crate::services::itinerary_grid_service::ItineraryGridService;
use crate::services::itinerary_store::{ItineraryStore, StoreError};
use crate::services::stop_form_service::StopFormService;
use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct GridViewQuery {
    pub format: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(raw)
        .map_err(|_| HttpResponse::BadRequest().json(json!({ "error": "Invalid ID" })))
}

fn store_error_response(err: StoreError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        StoreError::NotFound(_) | StoreError::StopNotFound { .. } => {
            HttpResponse::NotFound().json(body)
        }
        StoreError::MissingName => HttpResponse::BadRequest().json(body),
        StoreError::Poisoned => {
            log::error!("Itinerary store unavailable: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/*
    GET /api/itineraries
*/
pub async fn list(store: web::Data<ItineraryStore>) -> impl Responder {
    match store.list() {
        Ok(itineraries) => HttpResponse::Ok().json(itineraries),
        Err(err) => store_error_response(err),
    }
}

/*
    POST /api/itineraries
*/
pub async fn create(
    store: web::Data<ItineraryStore>,
    submission: web::Json<ItinerarySubmission>,
) -> impl Responder {
    let submission = submission.into_inner();
    match store.create(&submission.name, submission.stops) {
        Ok(itinerary) => HttpResponse::Created().json(itinerary),
        Err(err) => store_error_response(err),
    }
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(path: web::Path<String>, store: web::Data<ItineraryStore>) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match store.get(id) {
        Ok(itinerary) => HttpResponse::Ok().json(itinerary),
        Err(err) => store_error_response(err),
    }
}

/*
    PATCH /api/itineraries/{id}
*/
pub async fn patch(
    path: web::Path<String>,
    store: web::Data<ItineraryStore>,
    patch: web::Json<ItineraryPatch>,
) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match store.patch(id, patch.into_inner()) {
        Ok(itinerary) => HttpResponse::Ok().json(itinerary),
        Err(err) => store_error_response(err),
    }
}

/*
    POST /api/itineraries/{id}/stops
*/
pub async fn add_stop(
    path: web::Path<String>,
    store: web::Data<ItineraryStore>,
    form: web::Json<NewStop>,
) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let stop = match StopFormService::validate(form.into_inner()) {
        Ok(stop) => stop,
        Err(err) => {
            return HttpResponse::UnprocessableEntity().json(json!({ "error": err.to_string() }))
        }
    };

    match store.add_stop(id, stop) {
        Ok(itinerary) => HttpResponse::Created().json(itinerary),
        Err(err) => store_error_response(err),
    }
}

/*
    DELETE /api/itineraries/{id}/stops/{stop_id}
*/
pub async fn remove_stop(
    path: web::Path<(String, String)>,
    store: web::Data<ItineraryStore>,
) -> impl Responder {
    let (raw_id, raw_stop_id) = path.into_inner();
    let (id, stop_id) = match (parse_id(&raw_id), parse_id(&raw_stop_id)) {
        (Ok(id), Ok(stop_id)) => (id, stop_id),
        (Err(response), _) | (_, Err(response)) => return response,
    };

    match store.remove_stop(id, stop_id) {
        Ok(itinerary) => HttpResponse::Ok().json(itinerary),
        Err(err) => store_error_response(err),
    }
}

/*
    GET /api/itineraries/{id}/grid
*/
pub async fn get_grid(path: web::Path<String>, store: web::Data<ItineraryStore>) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match store.get(id) {
        Ok(itinerary) => HttpResponse::Ok().json(ItineraryGridService::build_grid(&itinerary.stops)),
        Err(err) => store_error_response(err),
    }
}

/*
    GET /api/itineraries/{id}/grid/view?format=text
*/
pub async fn get_grid_view(
    path: web::Path<String>,
    query: web::Query<GridViewQuery>,
    store: web::Data<ItineraryStore>,
) -> impl Responder {
    let id = match parse_id(&path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let itinerary = match store.get(id) {
        Ok(itinerary) => itinerary,
        Err(err) => return store_error_response(err),
    };

    let grid = ItineraryGridService::build_grid(&itinerary.stops);
    let view = GridViewService::build_view(&grid, Local::now().date_naive());

    match query.format.as_deref() {
        Some("text") => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(GridViewService::render_text(&view)),
        _ => HttpResponse::Ok().json(view),
    }
}
