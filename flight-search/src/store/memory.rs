//! In-memory store for tests and local development.
//!
//! Holds routes and segments behind a `RwLock` and answers queries the
//! same way the PostgreSQL store does. It can also be switched into an
//! "unavailable" mode to simulate an outage.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::{CarrierCode, IataCode, PermittedRoute, Segment, TimeWindow};

use super::{FlightStore, StoreError};

type RouteKey = (CarrierCode, IataCode, IataCode);

#[derive(Default)]
struct Tables {
    routes: HashMap<RouteKey, PermittedRoute>,
    segments: Vec<Segment>,
    unavailable: bool,
    segments_unavailable: bool,
}

/// Store that keeps everything in process memory.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    segment_queries: Arc<AtomicUsize>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with routes and segments.
    pub fn with_data(routes: Vec<PermittedRoute>, segments: Vec<Segment>) -> Self {
        let routes = routes
            .into_iter()
            .map(|r| ((r.carrier, r.origin, r.destination), r))
            .collect();

        Self {
            tables: Arc::new(RwLock::new(Tables {
                routes,
                segments,
                ..Tables::default()
            })),
            segment_queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulate an outage: while set, every operation fails.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.tables.write().await.unavailable = unavailable;
    }

    /// Simulate an outage of segment queries only; route lookups and
    /// upserts keep working.
    pub async fn set_segments_unavailable(&self, unavailable: bool) {
        self.tables.write().await.segments_unavailable = unavailable;
    }

    /// Number of `find_segments` calls served so far.
    pub fn segment_query_count(&self) -> usize {
        self.segment_queries.load(Ordering::SeqCst)
    }

    /// Number of segments currently stored.
    pub async fn segment_count(&self) -> usize {
        self.tables.read().await.segments.len()
    }

    /// Number of permitted routes currently stored.
    pub async fn route_count(&self) -> usize {
        self.tables.read().await.routes.len()
    }
}

fn outage() -> StoreError {
    StoreError::Unavailable("in-memory store marked unavailable".to_string())
}

impl FlightStore for InMemoryStore {
    async fn find_permitted_route(
        &self,
        carrier: &CarrierCode,
        origin: &IataCode,
        destination: &IataCode,
    ) -> Result<Option<PermittedRoute>, StoreError> {
        let tables = self.tables.read().await;
        if tables.unavailable {
            return Err(outage());
        }

        Ok(tables.routes.get(&(*carrier, *origin, *destination)).cloned())
    }

    async fn find_segments(
        &self,
        carrier: &CarrierCode,
        origins: &BTreeSet<IataCode>,
        window: &TimeWindow,
    ) -> Result<Vec<Segment>, StoreError> {
        self.segment_queries.fetch_add(1, Ordering::SeqCst);

        let tables = self.tables.read().await;
        if tables.unavailable || tables.segments_unavailable {
            return Err(outage());
        }

        Ok(tables
            .segments
            .iter()
            .filter(|s| {
                &s.airline == carrier && origins.contains(&s.origin) && window.contains(s.std)
            })
            .cloned()
            .collect())
    }

    async fn upsert_permitted_route(&self, route: &PermittedRoute) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.unavailable {
            return Err(outage());
        }

        tables
            .routes
            .insert((route.carrier, route.origin, route.destination), route.clone());
        Ok(())
    }

    async fn upsert_segment(&self, segment: &Segment) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.unavailable {
            return Err(outage());
        }

        let existing = tables.segments.iter_mut().find(|s| {
            s.airline == segment.airline
                && s.segment_number == segment.segment_number
                && s.std == segment.std
        });

        match existing {
            Some(slot) => *slot = segment.clone(),
            None => tables.segments.push(segment.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn iata(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn s7() -> CarrierCode {
        CarrierCode::parse("S7").unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    fn segment(number: &str, from: &str, to: &str, std: DateTime<Utc>) -> Segment {
        Segment::new(s7(), number, iata(from), iata(to), std, std + chrono::Duration::hours(3))
    }

    #[tokio::test]
    async fn route_lookup_hit_and_miss() {
        let route = PermittedRoute::direct(s7(), iata("UUS"), iata("DME"));
        let store = InMemoryStore::with_data(vec![route.clone()], vec![]);

        let found = store
            .find_permitted_route(&s7(), &iata("UUS"), &iata("DME"))
            .await
            .unwrap();
        assert_eq!(found, Some(route));

        let missing = store
            .find_permitted_route(&s7(), &iata("DME"), &iata("UUS"))
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn segment_query_filters_airline_origin_and_window() {
        let other_airline = Segment::new(
            CarrierCode::parse("SU").unwrap(),
            "9",
            iata("UUS"),
            iata("DME"),
            at(1, 10),
            at(1, 18),
        );
        let store = InMemoryStore::with_data(
            vec![],
            vec![
                segment("1", "UUS", "DME", at(1, 10)),
                segment("2", "OVB", "DME", at(1, 10)),
                segment("3", "UUS", "DME", at(5, 10)),
                other_airline,
            ],
        );

        let origins: BTreeSet<IataCode> = [iata("UUS")].into_iter().collect();
        let window = TimeWindow::new(at(1, 0), at(2, 0));
        let found = store.find_segments(&s7(), &origins, &window).await.unwrap();

        let numbers: Vec<&str> = found.iter().map(|s| s.segment_number.as_str()).collect();
        assert_eq!(numbers, vec!["1"]);
        assert_eq!(store.segment_query_count(), 1);
    }

    #[tokio::test]
    async fn upsert_segment_replaces_same_key() {
        let store = InMemoryStore::new();
        store
            .upsert_segment(&segment("1", "UUS", "DME", at(1, 10)))
            .await
            .unwrap();
        store
            .upsert_segment(&segment("1", "UUS", "OVB", at(1, 10)))
            .await
            .unwrap();
        store
            .upsert_segment(&segment("1", "UUS", "DME", at(2, 10)))
            .await
            .unwrap();

        assert_eq!(store.segment_count().await, 2);
    }

    #[tokio::test]
    async fn upsert_route_replaces_same_key() {
        let store = InMemoryStore::new();
        let direct = PermittedRoute::direct(s7(), iata("UUS"), iata("DME"));
        let via =
            PermittedRoute::with_transfers(s7(), iata("UUS"), iata("DME"), false, ["OVB"]);

        store.upsert_permitted_route(&direct).await.unwrap();
        store.upsert_permitted_route(&via).await.unwrap();

        assert_eq!(store.route_count().await, 1);
        let found = store
            .find_permitted_route(&s7(), &iata("UUS"), &iata("DME"))
            .await
            .unwrap();
        assert_eq!(found, Some(via));
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = InMemoryStore::new();
        store.set_unavailable(true).await;

        let origins = BTreeSet::new();
        let window = TimeWindow::new(at(1, 0), at(2, 0));

        assert!(matches!(
            store.find_segments(&s7(), &origins, &window).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(
            store
                .find_permitted_route(&s7(), &iata("UUS"), &iata("DME"))
                .await
                .is_err()
        );
        assert!(
            store
                .upsert_segment(&segment("1", "UUS", "DME", at(1, 10)))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn segment_outage_leaves_routes_readable() {
        let route = PermittedRoute::direct(s7(), iata("UUS"), iata("DME"));
        let store = InMemoryStore::with_data(vec![route], vec![]);
        store.set_segments_unavailable(true).await;

        assert!(
            store
                .find_permitted_route(&s7(), &iata("UUS"), &iata("DME"))
                .await
                .unwrap()
                .is_some()
        );

        let origins: BTreeSet<IataCode> = [iata("UUS")].into_iter().collect();
        let window = TimeWindow::new(at(1, 0), at(2, 0));
        assert!(store.find_segments(&s7(), &origins, &window).await.is_err());
        assert_eq!(store.segment_query_count(), 1);
    }
}
