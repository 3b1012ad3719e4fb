//! TripCraft - Conversational Travel Planning Engine
//!
//! Drives a category-based question flow, assembles the answers into a
//! travel request, and turns completed requests into itinerary
//! recommendations through pluggable collaborator ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
