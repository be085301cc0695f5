use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::mail::EmailRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailBody {
    email: Option<String>,
    pdf_data: Option<String>,
    student_name: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

// Unauthenticated.
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendEmailBody>, JsonRejection>,
) -> impl IntoResponse {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!("Rejected send-email body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "Email and PDF data are required");
        }
    };

    let request = EmailRequest {
        recipient: body.email.unwrap_or_default(),
        pdf_data: body.pdf_data.unwrap_or_default(),
        student_name: body.student_name.unwrap_or_default(),
    };

    match state.transmission.send(request).await {
        Ok(()) => Json(serde_json::json!({ "message": "Email sent successfully" })).into_response(),
        Err(e) if e.is_validation() => {
            error_response(StatusCode::BAD_REQUEST, "Email and PDF data are required")
        }
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email"),
    }
}

pub async fn health() -> &'static str {
    "ok"
}
