mod error;
mod handlers;

pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the HTTP router over an already migrated database.
pub fn create_router(db: Database) -> Router {
    let state = AppState { db };

    Router::new()
        .route(
            "/features",
            get(handlers::list_features).post(handlers::create_feature),
        )
        .route("/features/{id}", get(handlers::get_feature))
        .route("/votes", post(handlers::create_vote))
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}

/// Any origin, method and header, with credentials.
///
/// Wildcards are not allowed together with credentials, so the request's
/// own values are echoed back instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
