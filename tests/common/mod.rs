#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use serde_json::{json, Value};

use globetrotter::routes;
use globetrotter::services::itinerary_store::ItineraryStore;

pub struct TestApp {
    pub store: web::Data<ItineraryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: web::Data::new(ItineraryStore::new()),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.store.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}

/// Two stops from the Paris/Rome example trip.
pub fn paris_rome_trip() -> Value {
    json!({
        "name": "Winter escape",
        "stops": [
            {
                "city": "Paris",
                "start_date": "2024-01-01",
                "end_date": "2024-01-02",
                "activities": [
                    { "name": "Museum", "time": "10:00", "cost": 20.0 },
                    { "name": "Stroll" }
                ]
            },
            {
                "city": "Rome",
                "startDate": "2024-01-02",
                "endDate": "2024-01-03",
                "activities": [
                    { "name": "Colosseum", "time": "14:00" }
                ]
            }
        ]
    })
}
