//! Trip planner server.
//!
//! A planning wizard collects trip preferences, a generated itinerary is
//! shown with "why this?" explanations, and a cart simulates booking the
//! chosen activities.

pub mod config;
pub mod domain;
pub mod explain;
pub mod maps;
pub mod planner;
pub mod selection;
pub mod session;
pub mod web;
