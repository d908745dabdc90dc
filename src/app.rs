use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/view/:view", post(handlers::select_view))
        .route("/activities", post(handlers::submit_form))
        .route(
            "/api/activities",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/pace", get(handlers::get_pace))
        .route("/api/session", get(handlers::get_session))
        .route("/api/session/view", put(handlers::put_view))
        .route("/api/session/reset", post(handlers::reset_session))
        .with_state(state)
}
