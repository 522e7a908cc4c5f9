//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    batch_delete_handler, batch_get_handler, batch_put_handler, clear_handler, contains_handler,
    delete_handler, fast_put_handler, get_handler, health_handler, info_handler, put_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache/:key` - Cache a value or a null, optionally with `ttl_ms`
/// - `GET /cache/:key` - Read a key (404 on a miss, `null` for a cached null)
/// - `DELETE /cache/:key` - Remove a key and its null marker
/// - `DELETE /cache` - Clear the cache
/// - `PUT /fast/:key` - Cache a value and report whether the key was new
/// - `GET /contains/:key` - Check whether a key is cached
/// - `POST /batch/get` - Read many keys
/// - `POST /batch/put` - Cache many entries
/// - `POST /batch/delete` - Remove many keys
/// - `GET /info` - Cache name and flags
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/cache/:key",
            put(put_handler).get(get_handler).delete(delete_handler),
        )
        .route("/cache", delete(clear_handler))
        .route("/fast/:key", put(fast_put_handler))
        .route("/contains/:key", get(contains_handler))
        .route("/batch/get", post(batch_get_handler))
        .route("/batch/put", post(batch_put_handler))
        .route("/batch/delete", post(batch_delete_handler))
        .route("/info", get(info_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
