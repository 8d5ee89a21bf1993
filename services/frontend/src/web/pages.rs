//! services/frontend/src/web/pages.rs
//!
//! Static pages that need neither a session nor the backend.

use crate::web::view::View;

/// GET / - Home page
#[utoipa::path(get, path = "/", responses((status = 200, body = View)))]
pub async fn home_page() -> View {
    View::new("home")
}

/// GET /about
#[utoipa::path(get, path = "/about", responses((status = 200, body = View)))]
pub async fn about_page() -> View {
    View::new("about")
}

/// GET /contact
#[utoipa::path(get, path = "/contact", responses((status = 200, body = View)))]
pub async fn contact_page() -> View {
    View::new("contact")
}
