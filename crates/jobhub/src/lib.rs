//! Job board backend: display formatting for postings, the application
//! payload sent to the hiring API, and visitor analytics.

pub mod applications;
pub mod config;
pub mod error;
pub mod files;
pub mod formatting;
pub mod identity;
pub mod postings;
pub mod telemetry;
pub mod tracking;
