use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{
    ApplicationData, ApplicationForm, ApplicationPayload, HiringApplicant, JobReference,
    ResumePayload, ResumeSource, ResumeUpload,
};
use crate::files::{data_uri_scheme, file_to_base64, path_to_base64, FileEncodeError};
use crate::formatting::{format_phone_number, format_zipcode};

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("resume could not be decoded: {0}")]
    InvalidResume(String),
    #[error(transparent)]
    Encode(#[from] FileEncodeError),
}

/// Submission id prefix expected by the hiring API.
const SUBMISSION_PREFIX: &str = "job_chom_";

/// Validates the form and assembles the hiring API payload.
///
/// Phone and zipcode are normalised through their formatters and the résumé,
/// when attached, is read and base64 encoded.
pub async fn build_application_payload(
    form: &ApplicationForm,
    job_reference: Option<&str>,
    submitted_at: DateTime<Utc>,
) -> Result<ApplicationPayload, ApplicationError> {
    validate(form)?;

    let resume = match &form.resume {
        Some(upload) => Some(encode_resume(upload).await?),
        None => None,
    };

    let payload = ApplicationPayload {
        data: ApplicationData {
            hiring_applicant: HiringApplicant {
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                email_address: form.email_address.trim().to_string(),
                phone: format_phone_number(&form.phone),
                zipcode: format_zipcode(&form.zipcode),
                resume,
            },
            job: JobReference {
                original_job_reference: job_reference.unwrap_or_default().to_string(),
            },
            tlr_sid: format!("{SUBMISSION_PREFIX}{}", submitted_at.timestamp_millis()),
        },
    };

    debug!(
        job_reference = %payload.data.job.original_job_reference,
        has_resume = payload.data.hiring_applicant.resume.is_some(),
        "built application payload"
    );
    Ok(payload)
}

fn validate(form: &ApplicationForm) -> Result<(), ApplicationError> {
    let required = [
        ("first_name", &form.first_name),
        ("last_name", &form.last_name),
        ("email_address", &form.email_address),
    ];
    let blank = required
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
    if let Some((field, _)) = blank {
        return Err(ApplicationError::MissingField(field));
    }

    let email = form.email_address.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ApplicationError::InvalidEmail(email.to_string())),
    }
}

async fn encode_resume(upload: &ResumeUpload) -> Result<ResumePayload, ApplicationError> {
    let file = match &upload.source {
        ResumeSource::Inline(bytes) => file_to_base64(bytes.as_slice()).await?,
        ResumeSource::Path(path) => path_to_base64(path).await?,
    };

    Ok(ResumePayload {
        file_name: upload.file_name.clone(),
        data_uri_scheme: data_uri_scheme(&upload.file_name),
        file,
    })
}
