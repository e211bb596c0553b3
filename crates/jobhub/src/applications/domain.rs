use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Applicant input collected by the application form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone: String,
    pub zipcode: String,
    pub resume: Option<ResumeUpload>,
}

/// Where the résumé bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    Inline(Vec<u8>),
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub source: ResumeSource,
}

impl ResumeUpload {
    pub fn inline(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            source: ResumeSource::Inline(bytes),
        }
    }

    /// Uses the final path component as the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_name,
            source: ResumeSource::Path(path),
        }
    }
}

/// Body submitted to the hiring API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub data: ApplicationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub hiring_applicant: HiringApplicant,
    pub job: JobReference,
    #[serde(rename = "tlrSid")]
    pub tlr_sid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringApplicant {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone: String,
    pub zipcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePayload {
    pub file_name: String,
    pub data_uri_scheme: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    pub original_job_reference: String,
}
