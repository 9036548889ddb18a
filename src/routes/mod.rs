use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use folio_notification::Dispatcher;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoint (no auth required)
        .route("/health", get(health::health))
        .route("/api/contact", post(contact::action))
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(crate::error::handle_panic))
        .layer(TraceLayer::new_for_http())
}
