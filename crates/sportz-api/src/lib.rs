//! Sportz API — HTTP transport for the match lifecycle core.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router. Middleware layers are added by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/matches", routes::matches::router())
        .with_state(state)
}
