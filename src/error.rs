use std::any::Any;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_shared::DispatchResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] JsonRejection),

    #[error("Internal server error")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MalformedRequest(rejection) => {
                tracing::error!(error = %rejection.body_text(), "Malformed contact request");
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
        }

        server_error()
    }
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(DispatchResult::server_error()),
    )
        .into_response()
}

/// Turns a handler panic into the same generic JSON failure.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(detail).into_response()
}
