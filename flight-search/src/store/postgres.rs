//! PostgreSQL store.
//!
//! Tables:
//! - `permitted_routes(carrier, origin_iata, destination_iata, direct,
//!   transfer_iata_codes TEXT[])`, unique on the first three columns
//! - `segments(airline, segment_number, origin_iata, destination_iata,
//!   std TIMESTAMPTZ, sta TIMESTAMPTZ)`, unique on (airline,
//!   segment_number, std)

use std::collections::BTreeSet;

use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::{CarrierCode, IataCode, PermittedRoute, Segment, TimeWindow};

use super::{FlightStore, StoreError};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS permitted_routes (
        id BIGSERIAL PRIMARY KEY,
        carrier TEXT NOT NULL,
        origin_iata TEXT NOT NULL,
        destination_iata TEXT NOT NULL,
        direct BOOLEAN NOT NULL DEFAULT TRUE,
        transfer_iata_codes TEXT[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_permitted_routes_key
        ON permitted_routes (carrier, origin_iata, destination_iata)",
    "CREATE TABLE IF NOT EXISTS segments (
        id BIGSERIAL PRIMARY KEY,
        airline TEXT NOT NULL,
        segment_number TEXT NOT NULL,
        origin_iata VARCHAR(3) NOT NULL,
        destination_iata VARCHAR(3) NOT NULL,
        std TIMESTAMPTZ NOT NULL,
        sta TIMESTAMPTZ NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_segments_flight_key
        ON segments (airline, segment_number, std)",
    "CREATE INDEX IF NOT EXISTS idx_segments_route_lookup
        ON segments (airline, origin_iata, destination_iata, std)",
];

/// Store backed by a PostgreSQL connection pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database named by the configuration.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create tables and indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// Decode one `segments` row, or `None` if its airport codes are unusable.
fn segment_from_row(airline: CarrierCode, row: &PgRow) -> Result<Option<Segment>, StoreError> {
    let segment_number: String = row.try_get("segment_number")?;
    let origin: String = row.try_get("origin_iata")?;
    let destination: String = row.try_get("destination_iata")?;

    let (Ok(origin_code), Ok(destination_code)) =
        (IataCode::parse(&origin), IataCode::parse(&destination))
    else {
        warn!(
            airline = %airline,
            segment_number = %segment_number,
            origin = %origin,
            destination = %destination,
            "skipping segment with malformed airport code"
        );
        return Ok(None);
    };

    Ok(Some(Segment::new(
        airline,
        segment_number,
        origin_code,
        destination_code,
        row.try_get("std")?,
        row.try_get("sta")?,
    )))
}

impl FlightStore for PgStore {
    async fn find_permitted_route(
        &self,
        carrier: &CarrierCode,
        origin: &IataCode,
        destination: &IataCode,
    ) -> Result<Option<PermittedRoute>, StoreError> {
        let row = sqlx::query(
            "SELECT direct, transfer_iata_codes FROM permitted_routes
             WHERE carrier = $1 AND origin_iata = $2 AND destination_iata = $3
             LIMIT 1",
        )
        .bind(carrier.as_str())
        .bind(origin.as_str())
        .bind(destination.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(PermittedRoute {
            carrier: *carrier,
            origin: *origin,
            destination: *destination,
            direct: row.try_get("direct")?,
            transfer_codes: row.try_get("transfer_iata_codes")?,
        }))
    }

    async fn find_segments(
        &self,
        carrier: &CarrierCode,
        origins: &BTreeSet<IataCode>,
        window: &TimeWindow,
    ) -> Result<Vec<Segment>, StoreError> {
        let origin_codes: Vec<String> = origins.iter().map(|c| c.as_str().to_string()).collect();

        let rows = sqlx::query(
            "SELECT segment_number, origin_iata, destination_iata, std, sta FROM segments
             WHERE airline = $1 AND origin_iata = ANY($2) AND std BETWEEN $3 AND $4
             ORDER BY std",
        )
        .bind(carrier.as_str())
        .bind(origin_codes)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        debug!(carrier = %carrier, rows = rows.len(), "fetched segment rows");

        let mut segments = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(segment) = segment_from_row(*carrier, row)? {
                segments.push(segment);
            }
        }
        Ok(segments)
    }

    async fn upsert_permitted_route(&self, route: &PermittedRoute) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO permitted_routes
                (carrier, origin_iata, destination_iata, direct, transfer_iata_codes)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (carrier, origin_iata, destination_iata) DO UPDATE SET
                direct = EXCLUDED.direct,
                transfer_iata_codes = EXCLUDED.transfer_iata_codes,
                updated_at = now()",
        )
        .bind(route.carrier.as_str())
        .bind(route.origin.as_str())
        .bind(route.destination.as_str())
        .bind(route.direct)
        .bind(&route.transfer_codes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_segment(&self, segment: &Segment) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO segments
                (airline, segment_number, origin_iata, destination_iata, std, sta)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (airline, segment_number, std) DO UPDATE SET
                origin_iata = EXCLUDED.origin_iata,
                destination_iata = EXCLUDED.destination_iata,
                sta = EXCLUDED.sta,
                updated_at = now()",
        )
        .bind(segment.airline.as_str())
        .bind(&segment.segment_number)
        .bind(segment.origin.as_str())
        .bind(segment.destination.as_str())
        .bind(segment.std)
        .bind(segment.sta)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
