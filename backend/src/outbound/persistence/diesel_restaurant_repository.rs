//! PostgreSQL-backed `RestaurantRepository` using Diesel.
//!
//! Each restaurant is one row holding a JSONB document, which keeps the
//! document-store shape while getting transactional upserts from Postgres.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RestaurantRepository, RestaurantRepositoryError};
use crate::domain::{Restaurant, RestaurantId};

use super::models::{NewRestaurantRow, RestaurantDocument, RestaurantRow};
use super::pool::{DbPool, PoolError};
use super::schema::restaurants;

/// Diesel implementation of the restaurant store port.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RestaurantRepositoryError {
    RestaurantRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> RestaurantRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RestaurantRepositoryError::connection("database connection closed")
        }
        DieselError::DeserializationError(err) => {
            RestaurantRepositoryError::query(format!("undecodable row: {err}"))
        }
        _ => RestaurantRepositoryError::query("database error"),
    }
}

fn encode(restaurant: &Restaurant) -> Result<NewRestaurantRow, RestaurantRepositoryError> {
    let document = serde_json::to_value(RestaurantDocument::from(restaurant)).map_err(|err| {
        RestaurantRepositoryError::query(format!("encode restaurant document: {err}"))
    })?;
    Ok(NewRestaurantRow {
        id: *restaurant.id().as_uuid(),
        document,
    })
}

fn decode(row: RestaurantRow) -> Result<Restaurant, RestaurantRepositoryError> {
    let RestaurantRow { id, document, .. } = row;
    let document: RestaurantDocument = serde_json::from_value(document).map_err(|err| {
        RestaurantRepositoryError::query(format!("decode restaurant {id}: {err}"))
    })?;
    document
        .into_restaurant(id)
        .map_err(|err| RestaurantRepositoryError::query(format!("invalid restaurant {id}: {err}")))
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RestaurantRow> = restaurants::table
            .order((restaurants::created_at.asc(), restaurants::id.asc()))
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(decode).collect()
    }

    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RestaurantRow> = restaurants::table
            .find(*id.as_uuid())
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(decode).transpose()
    }

    async fn put(&self, restaurant: &Restaurant) -> Result<Restaurant, RestaurantRepositoryError> {
        let new_row = encode(restaurant)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: RestaurantRow = diesel::insert_into(restaurants::table)
            .values(&new_row)
            .on_conflict(restaurants::id)
            .do_update()
            .set((
                restaurants::document.eq(excluded(restaurants::document)),
                restaurants::updated_at.eq(diesel::dsl::now),
            ))
            .returning(RestaurantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode(row)
    }
}
