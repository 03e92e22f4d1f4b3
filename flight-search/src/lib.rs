//! Flight itinerary search server.
//!
//! A web service that answers: "which of this carrier's flights get me
//! from here to there, leaving between these dates?"

pub mod config;
pub mod domain;
pub mod import;
pub mod planner;
pub mod store;
pub mod web;
