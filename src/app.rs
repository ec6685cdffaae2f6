use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/calc/imt", post(handlers::calc_imt))
        .route("/api/calc/calories", post(handlers::calc_calories))
        .route("/api/calc/blood-pressure", post(handlers::calc_pressure))
        .route("/api/history", get(handlers::history))
        .route("/api/history/:id", delete(handlers::delete_record))
        .route("/api/trends", get(handlers::trends))
        .route("/api/stats", get(handlers::stats))
        .route("/api/health", get(handlers::health))
        .route("/api/identity", get(handlers::identity))
        .route("/api/identity/reset", post(handlers::reset_identity))
        .route("/api/identity/logout", post(handlers::logout))
        .with_state(state)
}
