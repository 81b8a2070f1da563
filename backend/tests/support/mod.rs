//! Shared helpers for restaurant integration tests.
//!
//! Integration tests compile as separate crates, so the seeding helpers and
//! the app builder live here rather than being copied into each file.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web};
use restaurant_search::domain::{Coordinates, Restaurant, RestaurantDraft, RestaurantId};
use restaurant_search::inbound::http::health::HealthState;
use restaurant_search::outbound::persistence::InMemoryRestaurantRepository;
use restaurant_search::server::{build_app, service_state};

/// Restaurant with fixed descriptive fields at `(x, y)`.
pub fn restaurant(id: &str, name: &str, coordinates: Option<(u32, u32)>, radius: i64) -> Restaurant {
    Restaurant::new(RestaurantDraft {
        id: RestaurantId::parse(id).expect("fixture id is a UUID"),
        name: name.to_owned(),
        kind: "Diner".to_owned(),
        opening_hours: "10:00AM-11:00PM".to_owned(),
        image: "https://example.test/r.png".to_owned(),
        radius,
        coordinates: coordinates.map(|(x, y)| Coordinates::new(x, y)),
    })
    .expect("fixture restaurant is valid")
}

/// Initialise the full application over an in-memory store seeded with
/// `restaurants`, with unbounded moka caches.
pub async fn init_app(
    restaurants: Vec<Restaurant>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let repository = Arc::new(InMemoryRestaurantRepository::with_restaurants(restaurants));
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let state = web::Data::new(service_state(repository, None, None));
    actix_test::init_service(build_app(health, state)).await
}
