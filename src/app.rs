use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/auth", post(handlers::submit_auth))
        .route("/auth/mode", post(handlers::toggle_auth_mode))
        .route("/days/:id/open", post(handlers::open_day))
        .route("/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/day/complete", post(handlers::complete_day))
        .route("/dashboard", post(handlers::return_to_dashboard))
        .route("/logout", post(handlers::logout))
        .route("/api/state", get(handlers::get_state))
        .route("/api/intent", post(handlers::post_intent))
        .route("/api/program", get(handlers::get_program))
        .with_state(state)
}
