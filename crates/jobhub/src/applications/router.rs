use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationForm, ResumeUpload};
use super::payload::{build_application_payload, ApplicationError};
use crate::files::strip_data_uri_prefix;

/// Form submission as posted by the browser; the résumé arrives base64
/// encoded, optionally as a full data URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationPreviewRequest {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub job_reference: Option<String>,
    #[serde(default)]
    pub resume: Option<ResumeAttachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub content: String,
}

impl ApplicationPreviewRequest {
    pub fn into_form(self) -> Result<(ApplicationForm, Option<String>), ApplicationError> {
        let resume = self
            .resume
            .map(|attachment| {
                STANDARD
                    .decode(strip_data_uri_prefix(attachment.content.trim()))
                    .map(|bytes| ResumeUpload::inline(attachment.file_name, bytes))
                    .map_err(|err| ApplicationError::InvalidResume(err.to_string()))
            })
            .transpose()?;

        let form = ApplicationForm {
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            phone: self.phone,
            zipcode: self.zipcode,
            resume,
        };
        Ok((form, self.job_reference))
    }
}

/// Router exposing the payload preview; nothing is forwarded to the hiring API.
pub fn application_router() -> Router {
    Router::new().route("/api/v1/applications/preview", post(preview_handler))
}

pub(crate) async fn preview_handler(Json(request): Json<ApplicationPreviewRequest>) -> Response {
    let result = match request.into_form() {
        Ok((form, job_reference)) => {
            build_application_payload(&form, job_reference.as_deref(), Utc::now()).await
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => {
            let status = match err {
                ApplicationError::MissingField(_) | ApplicationError::InvalidEmail(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ApplicationError::InvalidResume(_) => StatusCode::BAD_REQUEST,
                ApplicationError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let payload = json!({ "error": err.to_string() });
            (status, Json(payload)).into_response()
        }
    }
}
