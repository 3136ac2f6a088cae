use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/day/next", post(handlers::next_day))
        .route("/day/prev", post(handlers::previous_day))
        .route("/day/clear", post(handlers::clear_day))
        .route("/day/show/:day", post(handlers::show_day))
        .route("/api/day", get(handlers::get_active_day))
        .route("/api/days/:day", get(handlers::get_day))
        .route("/api/task", post(handlers::set_task))
        .route("/api/completion", post(handlers::set_completion))
        .route("/api/navigate", post(handlers::navigate))
        .route("/api/clear", post(handlers::clear))
        .route("/api/summary", get(handlers::get_summary))
        .route(
            "/api/snapshot",
            get(handlers::export_snapshot).put(handlers::import_snapshot),
        )
        .with_state(state)
}
