//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::import::{import_permitted_routes, import_segments};
use crate::planner::{ItineraryFinder, SearchError};
use crate::store::{FlightStore, StoreError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: FlightStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/routes/search", get(search_routes::<S>))
        .route("/api/v1/permitted_routes", post(import_routes::<S>))
        .route("/api/v1/segments", post(import_segment_rows::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search itineraries for a carrier between two airports.
async fn search_routes<S: FlightStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<RouteSearchParams>, QueryRejection>,
) -> Result<Json<RouteSearchResponse>, AppError> {
    let Query(params) = query?;
    let request = params
        .into_request()
        .map_err(|message| AppError::BadRequest { message })?;

    let finder = ItineraryFinder::new(state.store.as_ref(), state.config.as_ref());
    let outcome = finder.find(&request).await?;

    let itineraries = outcome
        .itineraries
        .iter()
        .map(ItineraryResult::from_itinerary)
        .collect();

    Ok(Json(RouteSearchResponse { itineraries }))
}

/// Import permitted routes.
async fn import_routes<S: FlightStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ImportRoutesRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload?;
    if body.routes.is_empty() {
        return Err(AppError::BadRequest {
            message: "routes must not be empty".to_string(),
        });
    }

    let report = import_permitted_routes(state.store.as_ref(), &body.routes).await?;
    Ok(import_response(report.into()))
}

/// Import flight segments.
async fn import_segment_rows<S: FlightStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ImportSegmentsRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload?;
    if body.segments.is_empty() {
        return Err(AppError::BadRequest {
            message: "segments must not be empty".to_string(),
        });
    }

    let report = import_segments(state.store.as_ref(), &body.segments).await?;
    Ok(import_response(report.into()))
}

/// 200 when every row was imported, 422 when some were rejected.
fn import_response(response: ImportResponse) -> Response {
    let status = if response.errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(response)).into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            SearchError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: format!("store failure: {e}"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
