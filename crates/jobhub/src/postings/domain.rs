use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::formatting::{AddressExtra, AddressInput, ShiftTimes, WageInput};
use crate::tracking::JobContext;

/// A job listing as stored by the postings backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub extra: Option<AddressExtra>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub min_wage: Option<f64>,
    #[serde(default)]
    pub max_wage: Option<f64>,
    #[serde(default)]
    pub shift_times: Option<ShiftTimes>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl JobPosting {
    pub fn address_input(&self) -> AddressInput {
        AddressInput {
            address: self.address.clone(),
            extra: self.extra.clone(),
            postal_code: self.postal_code.clone(),
        }
    }

    pub fn wage_input(&self) -> WageInput {
        WageInput::new(self.min_wage, self.max_wage)
    }

    pub fn city(&self) -> Option<&str> {
        self.extra.as_ref().and_then(|extra| extra.city.as_deref())
    }

    pub fn state(&self) -> Option<&str> {
        self.extra.as_ref().and_then(|extra| extra.state.as_deref())
    }

    /// Posting fields attached to analytics events raised from its pages.
    pub fn job_context(&self) -> JobContext {
        JobContext {
            job_id: Some(self.id.clone()),
            job_slug: Some(self.slug.clone()),
            job_reference_number: self.reference_number.clone(),
            job_title: Some(self.title.clone()),
            job_company: Some(self.company.clone()),
        }
    }
}

/// Filters accepted by the postings list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostingQuery {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    /// One-based page number; zero and blank are read as the first page.
    #[serde(default, deserialize_with = "deserialize_page")]
    pub page: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageParam {
    Number(usize),
    Text(String),
}

fn deserialize_page<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PageParam>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PageParam::Number(page)) => Ok(Some(page)),
        Some(PageParam::Text(raw)) => match raw.trim() {
            "" => Ok(None),
            value => value
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid page number '{value}'"))),
        },
    }
}

impl PostingQuery {
    pub fn page_number(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub(crate) fn matches(&self, posting: &JobPosting) -> bool {
        posting.is_active
            && contains_ignore_case(Some(posting.company.as_str()), self.company.as_deref())
            && contains_ignore_case(Some(posting.title.as_str()), self.title.as_deref())
            && contains_ignore_case(posting.postal_code.as_deref(), self.zipcode.as_deref())
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: Option<&str>) -> bool {
    let needle = match needle.map(str::trim) {
        None | Some("") => return true,
        Some(needle) => needle.to_lowercase(),
    };
    haystack.is_some_and(|value| value.to_lowercase().contains(&needle))
}
