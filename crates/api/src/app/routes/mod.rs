use axum::Router;

pub mod platforms;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/platforms", platforms::router())
}
