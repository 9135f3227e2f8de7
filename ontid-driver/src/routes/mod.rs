mod health;
mod resolve;

use axum::Router;
use axum::routing::get;

use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health::health))
        // Universal Resolver driver surface
        .route("/1.0/identifiers/{did}", get(resolve::resolve_did))
}
