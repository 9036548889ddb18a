use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_shared::ContactPayload;

use crate::{error::AppError, routes::AppState};

/// POST /api/contact - fan a contact submission out to chat and email
pub async fn action(
    State(app_state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;

    let result = app_state.dispatcher.dispatch(&payload).await;
    let status =
        StatusCode::from_u16(result.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok((status, Json(result)).into_response())
}
