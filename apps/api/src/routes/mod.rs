pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::home_page))
        .route("/form", get(pages::form_page))
        // Cover letter API
        .route("/api/v1/cover-letters", post(generation::handle_generate))
        .route("/api/v1/cover-letters/pdf", post(export::handle_export_pdf))
        .fallback(pages::redirect_home)
        .with_state(state)
}
