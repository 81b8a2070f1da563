//! Process-local `RestaurantRepository`.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Restaurants are listed in first-insertion order; replacing a restaurant
//! keeps its slot.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{RestaurantRepository, RestaurantRepositoryError};
use crate::domain::{Restaurant, RestaurantId};

#[derive(Default)]
struct Slots {
    ordered: Vec<Restaurant>,
    index: HashMap<RestaurantId, usize>,
}

/// In-memory restaurant store.
#[derive(Default)]
pub struct InMemoryRestaurantRepository {
    slots: RwLock<Slots>,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `restaurants`, later duplicates replacing earlier ones.
    pub fn with_restaurants(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        let mut slots = Slots::default();
        for restaurant in restaurants {
            slots.upsert(restaurant);
        }
        Self {
            slots: RwLock::new(slots),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.slots.read().await.ordered.len()
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Slots {
    fn upsert(&mut self, restaurant: Restaurant) {
        match self.index.get(restaurant.id()) {
            Some(&slot) => self.ordered[slot] = restaurant,
            None => {
                self.index
                    .insert(*restaurant.id(), self.ordered.len());
                self.ordered.push(restaurant);
            }
        }
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantRepositoryError> {
        Ok(self.slots.read().await.ordered.clone())
    }

    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantRepositoryError> {
        let slots = self.slots.read().await;
        Ok(slots.index.get(id).map(|&slot| slots.ordered[slot].clone()))
    }

    async fn put(&self, restaurant: &Restaurant) -> Result<Restaurant, RestaurantRepositoryError> {
        self.slots.write().await.upsert(restaurant.clone());
        Ok(restaurant.clone())
    }
}
