//! services/frontend/src/bin/openapi.rs
//!
//! Dumps the OpenAPI document of the browser-facing routes: the sign-in flow,
//! the rating queue, the paged recommendation and admin lists, and the admin
//! actions forwarded to the backend. Every view route documents the JSON view
//! model it renders.
//!
//! Usage: `openapi [OUTPUT]`, writing to `openapi.json` when no path is given.

use frontend_lib::web::ApiDoc;
use std::path::PathBuf;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let doc = ApiDoc::openapi();
    let route_count = doc.paths.paths.len();
    std::fs::write(&output, doc.to_pretty_json()?)?;

    println!(
        "Wrote {} frontend routes to {}",
        route_count,
        output.display()
    );
    Ok(())
}
