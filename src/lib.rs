pub mod certificate;
pub mod config;
pub mod export;
pub mod mail;
pub mod render;
pub mod routes;
pub mod state;
pub mod templates;
pub mod wizard;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/login", post(routes::login))
        .route("/certificate", get(routes::certificate_form))
        .route("/certificate/generate", post(routes::generate))
        .route("/certificate/back", post(routes::back))
        .route("/certificate/email", post(routes::open_email))
        .route("/certificate/email/close", post(routes::close_email))
        .route("/certificate/email/send", post(routes::email_certificate))
        .route("/certificate/pdf", post(routes::download_pdf))
        .route("/certificate/print", post(routes::print))
        .route("/api/send-email", post(routes::send_email))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
