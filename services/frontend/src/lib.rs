//! services/frontend/src/lib.rs
//!
//! The browser-facing frontend of the Flixr movie rating service. It holds
//! the session and rating cursor for each signed-in user and forwards
//! everything else to the backend API.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
