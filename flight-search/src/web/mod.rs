//! Web layer for the flight itinerary search service.
//!
//! Provides the JSON search endpoint, the admin import endpoints and a
//! health check.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
