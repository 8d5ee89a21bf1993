pub mod auth;
pub mod lists;
pub mod middleware;
pub mod pages;
pub mod rating;
pub mod routes;
pub mod state;
pub mod view;

// Re-export the router builder and shared state so the binary and the
// integration tests can assemble the service in one call.
pub use middleware::require_auth;
pub use routes::{router, ApiDoc};
pub use state::{AppState, SessionContext};
