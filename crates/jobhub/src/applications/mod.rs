//! Application form handling: validation and the hiring API payload.

mod domain;
mod payload;
mod router;

pub use domain::{
    ApplicationData, ApplicationForm, ApplicationPayload, HiringApplicant, JobReference,
    ResumePayload, ResumeSource, ResumeUpload,
};
pub use payload::{build_application_payload, ApplicationError};
pub use router::{application_router, ApplicationPreviewRequest, ResumeAttachment};
