//! Itinerary planner using backtracking search.
//!
//! This module answers: "which flights of this carrier get me from origin
//! to destination, leaving within these dates?"
//!
//! A carrier's permitted route is expanded into blueprint paths, the
//! segments those paths can use are loaded from the store in one query,
//! and a depth-first search threads real flights through each path,
//! keeping only connections within the configured layover bounds.

mod blueprint;
mod config;
mod finder;
mod loader;
mod search;


pub use blueprint::{BlueprintPath, Expansion, expand, split_transfer_code};
pub use config::SearchConfig;
pub use finder::{ItineraryFinder, SearchError, SearchOutcome, SearchRequest};
pub use loader::{SegmentIndex, airports_in, load_segments, loading_window};
pub use search::ItinerarySearch;
