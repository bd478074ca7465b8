//! HTTP adapters - axum routers, handlers, and DTOs.
//!
//! Each feature gets its own directory with routes, handlers, and DTOs.
//! `app_router` assembles the features into the full application router
//! behind the authentication middleware.

use std::time::Duration;

use axum::{response::IntoResponse, routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod meeting;
pub mod middleware;
pub mod schedule;

pub use meeting::meeting_routes;
pub use meeting::MeetingHandlers;
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use schedule::schedule_routes;
pub use schedule::ScheduleHandlers;

/// Assembles the full application router.
///
/// Every `/api` route sits behind the authentication middleware; the
/// health probe does not.
pub fn app_router(
    schedule_handlers: ScheduleHandlers,
    meeting_handlers: MeetingHandlers,
    validator: AuthState,
    request_timeout: Duration,
) -> Router {
    let api = schedule_routes(schedule_handlers)
        .merge(meeting_routes(meeting_handlers))
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
