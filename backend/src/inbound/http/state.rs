//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureRestaurantCommand, FixtureRestaurantQuery, RestaurantCommand, RestaurantQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub restaurants: Arc<dyn RestaurantQuery>,
    pub restaurants_command: Arc<dyn RestaurantCommand>,
}

impl HttpState {
    /// Construct state from the read and write ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use restaurant_search::domain::ports::{FixtureRestaurantCommand, FixtureRestaurantQuery};
    /// use restaurant_search::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureRestaurantQuery),
    ///     Arc::new(FixtureRestaurantCommand),
    /// );
    /// let _query = state.restaurants.clone();
    /// ```
    pub fn new(
        restaurants: Arc<dyn RestaurantQuery>,
        restaurants_command: Arc<dyn RestaurantCommand>,
    ) -> Self {
        Self {
            restaurants,
            restaurants_command,
        }
    }

    /// Build state where one service backs both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RestaurantQuery + RestaurantCommand + 'static,
    {
        Self {
            restaurants: service.clone(),
            restaurants_command: service,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureRestaurantQuery),
            Arc::new(FixtureRestaurantCommand),
        )
    }
}
