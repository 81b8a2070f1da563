//! Cache adapters for the restaurant cache ports.

mod moka_restaurant_cache;

pub use moka_restaurant_cache::{MokaRestaurantCache, MokaSearchCache};
