//! Restaurant store adapters.
//!
//! Two implementations of `RestaurantRepository`:
//!
//! - [`DieselRestaurantRepository`]: PostgreSQL through Diesel with
//!   `diesel-async` and `bb8` pooling. Rows and schema stay private to this
//!   module.
//! - [`InMemoryRestaurantRepository`]: process-local storage for development
//!   and tests.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use restaurant_search::outbound::persistence::{
//!     DbPool, DieselRestaurantRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/restaurants")).await?;
//! let repository = DieselRestaurantRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_restaurant_repository;
mod in_memory_restaurant_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_restaurant_repository::DieselRestaurantRepository;
pub use in_memory_restaurant_repository::InMemoryRestaurantRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
