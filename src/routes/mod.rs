pub mod announcements;
pub mod health;
pub mod metrics;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Announcements, reachable with or without the trailing slash
        .route(
            "/announcements",
            get(announcements::list_active).post(announcements::create_announcement),
        )
        .route(
            "/announcements/",
            get(announcements::list_active).post(announcements::create_announcement),
        )
        .route("/announcements/all", get(announcements::list_all))
        .route(
            "/announcements/{announcement_id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
