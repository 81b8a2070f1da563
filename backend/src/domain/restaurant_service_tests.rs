//! Tests for the restaurant service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    CachedSearch, FixtureRestaurantCache, MockRestaurantRecordCache, MockRestaurantRepository,
    MockSearchResultCache, RestaurantCacheError,
};
use crate::domain::restaurant::fixtures::restaurant;

const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

type UncachedService =
    RestaurantService<MockRestaurantRepository, FixtureRestaurantCache, FixtureRestaurantCache>;

fn uncached(repo: MockRestaurantRepository) -> UncachedService {
    let cache = Arc::new(FixtureRestaurantCache);
    RestaurantService::new(Arc::new(repo), Arc::clone(&cache), cache)
}

#[fixture]
fn upsert_request() -> UpsertRestaurantRequest {
    UpsertRestaurantRequest {
        id: ID.to_owned(),
        name: "Luigi's".to_owned(),
        kind: "Italian".to_owned(),
        opening_hours: "10:00AM-11:00PM".to_owned(),
        image: "https://example.test/luigi.png".to_owned(),
        radius: 3,
        coordinates: Some("x=5,y=5".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn locate_ranks_stored_restaurants() {
    let near = restaurant("Near", 2, 2, 1);
    let near_id = near.id().to_string();
    let mut repo = MockRestaurantRepository::new();
    repo.expect_list_all()
        .times(1)
        .return_once(move || Ok(vec![near, restaurant("Far", 40, 40, 2)]));

    let result = uncached(repo)
        .locate(LocateRestaurantsRequest { x: 3, y: 2 })
        .await
        .expect("search succeeds");

    assert_eq!(result.user_location, "x=3,y=2");
    assert_eq!(result.locations.len(), 1);
    assert_eq!(result.locations[0].id, near_id);
    assert_eq!(result.locations[0].coordinates, "x=2,y=2");
    assert_eq!(result.locations[0].distance, 1.0);
}

#[rstest]
#[tokio::test]
async fn locate_maps_store_failure_to_store_unavailable() {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_list_all()
        .times(1)
        .return_once(|| Err(RestaurantRepositoryError::connection("refused")));

    let err = uncached(repo)
        .locate(LocateRestaurantsRequest { x: 0, y: 0 })
        .await
        .expect_err("store failure surfaces");

    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
}

#[rstest]
#[tokio::test]
async fn locate_serves_repeat_queries_from_cache() {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_list_all().times(0);

    let mut searches = MockSearchResultCache::new();
    searches.expect_get().times(1).return_once(|key| {
        Ok(Some(CachedSearch {
            generation: 0,
            result: SearchResult {
                user_location: key.to_string(),
                locations: Vec::new(),
            },
        }))
    });

    let service = RestaurantService::new(
        Arc::new(repo),
        Arc::new(FixtureRestaurantCache),
        Arc::new(searches),
    );
    let result = service
        .locate(LocateRestaurantsRequest { x: 9, y: 1 })
        .await
        .expect("cached search served");

    assert_eq!(result.user_location, "x=9,y=1");
}

#[rstest]
#[case("not-a-uuid")]
#[case("")]
#[case("3fa85f64")]
#[tokio::test]
async fn get_rejects_malformed_ids_before_io(#[case] raw: &str) {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_find_by_id().times(0);

    let err = uncached(repo)
        .get_restaurant(GetRestaurantRequest { id: raw.to_owned() })
        .await
        .expect_err("malformed id rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!("id")));
}

#[rstest]
#[tokio::test]
async fn get_reports_missing_restaurant() {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = uncached(repo)
        .get_restaurant(GetRestaurantRequest { id: ID.to_owned() })
        .await
        .expect_err("missing restaurant");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), format!("Restaurant with ID {ID} not found"));
}

#[rstest]
#[tokio::test]
async fn get_returns_stored_restaurant() {
    let id = RestaurantId::parse(ID).expect("valid id");
    let stored = restaurant("Stored", 5, 5, 3).with_id(id);
    let mut repo = MockRestaurantRepository::new();
    repo.expect_find_by_id()
        .withf(move |candidate| candidate == &id)
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let payload = uncached(repo)
        .get_restaurant(GetRestaurantRequest { id: ID.to_owned() })
        .await
        .expect("restaurant found");

    assert_eq!(payload.id, ID);
    assert_eq!(payload.name, "Stored");
    assert_eq!(payload.coordinates, "x=5,y=5");
}

#[rstest]
#[case(RestaurantRepositoryError::connection("refused"))]
#[case(RestaurantRepositoryError::query("corrupt document"))]
#[tokio::test]
async fn get_maps_store_failures(#[case] failure: RestaurantRepositoryError) {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = uncached(repo)
        .get_restaurant(GetRestaurantRequest { id: ID.to_owned() })
        .await
        .expect_err("store failure surfaces");

    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
}

#[rstest]
#[tokio::test]
async fn upsert_writes_store_then_caches(upsert_request: UpsertRestaurantRequest) {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_put()
        .withf(|r| r.id().to_string() == ID && r.coordinates() == Some(&Coordinates::new(5, 5)))
        .times(1)
        .returning(|r| Ok(r.clone()));

    let mut records = MockRestaurantRecordCache::new();
    records
        .expect_put()
        .withf(|r| r.id().to_string() == ID)
        .times(1)
        .return_once(|_| Ok(()));
    let mut searches = MockSearchResultCache::new();
    searches.expect_invalidate_all().times(1).return_once(|| Ok(()));

    let service = RestaurantService::new(Arc::new(repo), Arc::new(records), Arc::new(searches));
    let payload = service
        .upsert_restaurant(upsert_request)
        .await
        .expect("upsert succeeds");

    assert_eq!(payload.id, ID);
    assert_eq!(payload.coordinates, "x=5,y=5");
    assert_eq!(payload.radius, 3);
    assert_eq!(service.cache.generation(), 1);
}

#[rstest]
#[case(Some("x=5,y=-5"))]
#[case(Some("5,5"))]
#[case(Some("x=5"))]
#[tokio::test]
async fn upsert_rejects_malformed_coordinates(
    mut upsert_request: UpsertRestaurantRequest,
    #[case] coordinates: Option<&str>,
) {
    upsert_request.coordinates = coordinates.map(str::to_owned);
    let mut repo = MockRestaurantRepository::new();
    repo.expect_put().times(0);

    let err = uncached(repo)
        .upsert_restaurant(upsert_request)
        .await
        .expect_err("malformed coordinates rejected");

    assert_eq!(err.code(), ErrorCode::MalformedCoordinates);
    assert_eq!(err.message(), "Coordinates must be in format x=3,y=2");
}

#[rstest]
#[case(None)]
#[case(Some("  "))]
#[tokio::test]
async fn upsert_requires_coordinates(
    mut upsert_request: UpsertRestaurantRequest,
    #[case] coordinates: Option<&str>,
) {
    upsert_request.coordinates = coordinates.map(str::to_owned);
    let mut repo = MockRestaurantRepository::new();
    repo.expect_put().times(0);

    let err = uncached(repo)
        .upsert_restaurant(upsert_request)
        .await
        .expect_err("missing coordinates rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn upsert_rejects_invalid_path_id(mut upsert_request: UpsertRestaurantRequest) {
    upsert_request.id = "not-a-uuid".to_owned();
    let mut repo = MockRestaurantRepository::new();
    repo.expect_put().times(0);

    let err = uncached(repo)
        .upsert_restaurant(upsert_request)
        .await
        .expect_err("invalid id rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Invalid UUID format: not-a-uuid");
}

#[rstest]
#[tokio::test]
async fn upsert_rejects_invalid_draft_before_io(mut upsert_request: UpsertRestaurantRequest) {
    upsert_request.name = "   ".to_owned();
    upsert_request.radius = 0;
    let mut repo = MockRestaurantRepository::new();
    repo.expect_put().times(0);

    let err = uncached(repo)
        .upsert_restaurant(upsert_request)
        .await
        .expect_err("invalid draft rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("field")),
        Some(&json!("radius"))
    );
}

#[rstest]
#[tokio::test]
async fn failed_store_write_leaves_caches_untouched(upsert_request: UpsertRestaurantRequest) {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_put()
        .times(1)
        .return_once(|_| Err(RestaurantRepositoryError::connection("refused")));
    let mut records = MockRestaurantRecordCache::new();
    records.expect_put().times(0);
    let mut searches = MockSearchResultCache::new();
    searches.expect_invalidate_all().times(0);

    let service = RestaurantService::new(Arc::new(repo), Arc::new(records), Arc::new(searches));
    let err = service
        .upsert_restaurant(upsert_request)
        .await
        .expect_err("store failure surfaces");

    assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    assert_eq!(service.cache.generation(), 0);
}

#[rstest]
#[tokio::test]
async fn incoherent_record_cache_is_internal_error(upsert_request: UpsertRestaurantRequest) {
    let mut repo = MockRestaurantRepository::new();
    repo.expect_put().times(1).returning(|r| Ok(r.clone()));
    let mut records = MockRestaurantRecordCache::new();
    records
        .expect_put()
        .times(1)
        .return_once(|_| Err(RestaurantCacheError::backend("full")));
    records
        .expect_remove()
        .times(1)
        .return_once(|_| Err(RestaurantCacheError::backend("gone")));
    let mut searches = MockSearchResultCache::new();
    searches.expect_invalidate_all().times(1).return_once(|| Ok(()));

    let service = RestaurantService::new(Arc::new(repo), Arc::new(records), Arc::new(searches));
    let err = service
        .upsert_restaurant(upsert_request)
        .await
        .expect_err("cache failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(service.cache.generation(), 1);
}

#[derive(Default)]
struct WriteLog(std::sync::Mutex<Vec<String>>);

impl WriteLog {
    fn push(&self, entry: String) {
        self.0.lock().expect("log lock").push(entry);
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().expect("log lock").clone()
    }
}

/// Single-slot store that logs each write.
struct LoggingStore {
    log: Arc<WriteLog>,
    slot: std::sync::Mutex<Option<Restaurant>>,
}

impl LoggingStore {
    fn current(&self) -> Option<Restaurant> {
        self.slot.lock().expect("slot lock").clone()
    }
}

#[async_trait]
impl RestaurantRepository for LoggingStore {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantRepositoryError> {
        Ok(self.current().into_iter().collect())
    }

    async fn find_by_id(
        &self,
        _id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantRepositoryError> {
        Ok(self.current())
    }

    async fn put(&self, restaurant: &Restaurant) -> Result<Restaurant, RestaurantRepositoryError> {
        self.log.push(format!("store {}", restaurant.name()));
        *self.slot.lock().expect("slot lock") = Some(restaurant.clone());
        Ok(restaurant.clone())
    }
}

/// Single-slot record cache whose first write yields before landing.
struct LaggingRecordCache {
    log: Arc<WriteLog>,
    writes: std::sync::atomic::AtomicUsize,
    slot: std::sync::Mutex<Option<Restaurant>>,
}

impl LaggingRecordCache {
    fn current(&self) -> Option<Restaurant> {
        self.slot.lock().expect("slot lock").clone()
    }
}

#[async_trait]
impl RestaurantRecordCache for LaggingRecordCache {
    async fn get(&self, _id: &RestaurantId) -> Result<Option<Restaurant>, RestaurantCacheError> {
        Ok(self.current())
    }

    async fn put(&self, restaurant: &Restaurant) -> Result<(), RestaurantCacheError> {
        let seen = self
            .writes
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if seen == 0 {
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
        }
        self.log.push(format!("cache {}", restaurant.name()));
        *self.slot.lock().expect("slot lock") = Some(restaurant.clone());
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        restaurant: &Restaurant,
    ) -> Result<Restaurant, RestaurantCacheError> {
        let mut slot = self.slot.lock().expect("slot lock");
        Ok(slot.get_or_insert_with(|| restaurant.clone()).clone())
    }

    async fn remove(&self, _id: &RestaurantId) -> Result<(), RestaurantCacheError> {
        *self.slot.lock().expect("slot lock") = None;
        Ok(())
    }
}

#[rstest]
#[tokio::test]
async fn concurrent_upserts_to_one_id_keep_record_cache_in_step(
    upsert_request: UpsertRestaurantRequest,
) {
    let log = Arc::new(WriteLog::default());
    let store = Arc::new(LoggingStore {
        log: Arc::clone(&log),
        slot: std::sync::Mutex::new(None),
    });
    let records = Arc::new(LaggingRecordCache {
        log: Arc::clone(&log),
        writes: std::sync::atomic::AtomicUsize::new(0),
        slot: std::sync::Mutex::new(None),
    });
    let service = RestaurantService::new(
        Arc::clone(&store),
        Arc::clone(&records),
        Arc::new(FixtureRestaurantCache),
    );
    let first = UpsertRestaurantRequest {
        name: "First".to_owned(),
        ..upsert_request.clone()
    };
    let second = UpsertRestaurantRequest {
        name: "Second".to_owned(),
        // Another spelling of the same id.
        id: ID.to_uppercase(),
        ..upsert_request
    };

    let (a, b) = tokio::join!(
        service.upsert_restaurant(first),
        service.upsert_restaurant(second)
    );
    a.expect("first write succeeds");
    b.expect("second write succeeds");

    let entries = log.entries();
    assert_eq!(entries.len(), 4);
    for pair in entries.chunks(2) {
        let stored = pair[0].strip_prefix("store ").expect("store entry first");
        assert_eq!(pair[1], format!("cache {stored}"), "writes interleaved: {entries:?}");
    }
    let cached = records.current().expect("cache entry");
    let stored = store.current().expect("stored restaurant");
    assert_eq!(cached, stored);
}

#[rstest]
#[tokio::test]
async fn id_spelling_does_not_split_records(upsert_request: UpsertRestaurantRequest) {
    use crate::outbound::cache::{MokaRestaurantCache, MokaSearchCache};
    use crate::outbound::persistence::InMemoryRestaurantRepository;

    let service = RestaurantService::new(
        Arc::new(InMemoryRestaurantRepository::new()),
        Arc::new(MokaRestaurantCache::new(None)),
        Arc::new(MokaSearchCache::new(None)),
    );

    let lower = service
        .upsert_restaurant(upsert_request.clone())
        .await
        .expect("lowercase write succeeds");
    let cached = service
        .get_restaurant(GetRestaurantRequest { id: ID.to_owned() })
        .await
        .expect("lowercase read succeeds");
    assert_eq!(cached.name, lower.name);

    let renamed = UpsertRestaurantRequest {
        id: ID.to_uppercase(),
        name: "Renamed".to_owned(),
        ..upsert_request
    };
    let upper = service
        .upsert_restaurant(renamed)
        .await
        .expect("uppercase write succeeds");
    assert_eq!(upper.id, ID);

    let read = service
        .get_restaurant(GetRestaurantRequest { id: ID.to_owned() })
        .await
        .expect("lowercase read succeeds");
    assert_eq!(read.name, "Renamed");
    assert_eq!(read.id, ID);

    let found = service
        .locate(LocateRestaurantsRequest { x: 5, y: 5 })
        .await
        .expect("search succeeds");
    assert_eq!(found.locations.len(), 1);
    assert_eq!(found.locations[0].id, ID);
    assert_eq!(found.locations[0].name, "Renamed");
}
