use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::JobPosting;
use crate::formatting::{
    days_since_at, format_address, format_locality, format_shift_times, format_wage,
    is_new_posting_at,
};

/// Compact listing entry shown in the postings list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCardView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub company: String,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub employment_type: Option<String>,
    pub reference_number: Option<String>,
    pub is_new: bool,
    pub posted_days_ago: Option<i64>,
}

impl JobCardView {
    /// The list badge follows the record creation time.
    pub fn from_posting(posting: &JobPosting, now: DateTime<Utc>) -> Self {
        Self {
            id: posting.id.clone(),
            slug: posting.slug.clone(),
            title: posting.title.clone(),
            company: posting.company.clone(),
            locality: format_locality(posting.city(), posting.state()),
            postal_code: posting.postal_code.clone(),
            employment_type: posting.employment_type.clone(),
            reference_number: posting.reference_number.clone(),
            is_new: is_new_posting_at(Some(&posting.created_at), now),
            posted_days_ago: posting
                .posted_at
                .and_then(|posted_at| days_since_at(&posted_at, now)),
        }
    }
}

/// Full posting panel with wage, schedule and location lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetailView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub company: String,
    pub reference_number: Option<String>,
    pub employment_type: Option<String>,
    pub address: String,
    pub wage: String,
    pub shift_days: Option<String>,
    pub shift_times: Option<String>,
    pub is_new: bool,
    pub posted_days_ago: Option<i64>,
}

impl JobDetailView {
    /// The detail badge follows the publication time.
    pub fn from_posting(posting: &JobPosting, now: DateTime<Utc>) -> Self {
        let shifts = format_shift_times(posting.shift_times.as_ref());

        Self {
            id: posting.id.clone(),
            slug: posting.slug.clone(),
            title: posting.title.clone(),
            company: posting.company.clone(),
            reference_number: posting.reference_number.clone(),
            employment_type: posting.employment_type.clone(),
            address: format_address(&posting.address_input()),
            wage: format_wage(posting.wage_input()),
            shift_days: shifts.days,
            shift_times: shifts.times,
            is_new: is_new_posting_at(posting.posted_at.as_ref(), now),
            posted_days_ago: posting
                .posted_at
                .and_then(|posted_at| days_since_at(&posted_at, now)),
        }
    }
}
