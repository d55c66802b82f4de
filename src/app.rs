use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/survey", post(handlers::survey_form))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/scenario", get(handlers::get_scenario))
        .route("/api/surveys", post(handlers::post_survey))
        .with_state(state)
}
