use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::submit_entry))
        .route("/api/entries", get(handlers::list_entries).post(handlers::create_entry))
        .route("/api/entries/:date", get(handlers::get_entry))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/report", get(handlers::get_report))
        .with_state(state)
}
