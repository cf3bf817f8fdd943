use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::env;

use crate::services::itinerary_store::ItineraryStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    store: ServiceStatus,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(store: web::Data<ItineraryStore>) -> impl Responder {
    let store_status = check_store(&store);

    let health = HealthStatus {
        status: if store_status.status == "ok" {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        store: store_status,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(health)
}

fn check_store(store: &ItineraryStore) -> ServiceStatus {
    match store.list() {
        Ok(itineraries) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{} itineraries in memory", itineraries.len())),
        },
        Err(e) => {
            log::error!("Itinerary store health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(e.to_string()),
            }
        }
    }
}
