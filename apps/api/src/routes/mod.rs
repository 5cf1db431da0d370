pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::mail::handlers;
use crate::state::AppState;

/// CORS policy: one frontend origin, GET/POST only, `Content-Type` and `Authorization` headers.
pub fn cors_layer(frontend_origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(frontend_origin)
        .with_context(|| format!("FRONTEND_ORIGIN '{frontend_origin}' is not a valid origin"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generateMail", post(handlers::handle_generate_mail))
        .route("/regenerateMail", post(handlers::handle_regenerate_mail))
        .route("/sendMail", post(handlers::handle_send_mail))
        .with_state(state)
}
