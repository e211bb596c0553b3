use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::domain::JobPosting;
use crate::formatting::{parse_instant, AddressExtra, ShiftTimes};

#[derive(Debug)]
pub enum PostingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidTimestamp {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for PostingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostingImportError::Io(err) => write!(f, "failed to read postings export: {}", err),
            PostingImportError::Csv(err) => write!(f, "invalid postings CSV data: {}", err),
            PostingImportError::InvalidTimestamp { row, field, value } => write!(
                f,
                "row {}: '{}' is not a valid {} timestamp",
                row, value, field
            ),
        }
    }
}

impl std::error::Error for PostingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PostingImportError::Io(err) => Some(err),
            PostingImportError::Csv(err) => Some(err),
            PostingImportError::InvalidTimestamp { .. } => None,
        }
    }
}

impl From<std::io::Error> for PostingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PostingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Flat export row: one column per weekday and per address part.
#[derive(Debug, Deserialize)]
struct PostingRow {
    id: String,
    slug: String,
    title: String,
    company: String,
    reference_number: Option<String>,
    employment_type: Option<String>,
    address: Option<String>,
    street_address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    min_wage: Option<f64>,
    max_wage: Option<f64>,
    created_at: String,
    posted_at: Option<String>,
    is_active: Option<bool>,
    monday: Option<String>,
    tuesday: Option<String>,
    wednesday: Option<String>,
    thursday: Option<String>,
    friday: Option<String>,
    saturday: Option<String>,
    sunday: Option<String>,
}

impl PostingRow {
    fn into_posting(self, row: usize) -> Result<JobPosting, PostingImportError> {
        let created_at = timestamp(row, "created_at", &self.created_at)?;
        let posted_at = self
            .posted_at
            .as_deref()
            .map(|value| timestamp(row, "posted_at", value))
            .transpose()?;

        let extra = AddressExtra {
            street_address: self.street_address,
            city: self.city,
            state: self.state,
        };
        let shift_times = ShiftTimes {
            monday: self.monday,
            tuesday: self.tuesday,
            wednesday: self.wednesday,
            thursday: self.thursday,
            friday: self.friday,
            saturday: self.saturday,
            sunday: self.sunday,
        };

        Ok(JobPosting {
            id: self.id,
            slug: self.slug,
            title: self.title,
            company: self.company,
            reference_number: self.reference_number,
            employment_type: self.employment_type,
            address: self.address,
            extra: (extra != AddressExtra::default()).then_some(extra),
            postal_code: self.postal_code,
            min_wage: self.min_wage,
            max_wage: self.max_wage,
            shift_times: (shift_times != ShiftTimes::default()).then_some(shift_times),
            created_at,
            posted_at,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

fn timestamp(
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, PostingImportError> {
    parse_instant(value).ok_or_else(|| PostingImportError::InvalidTimestamp {
        row,
        field,
        value: value.to_string(),
    })
}

pub struct PostingCsvImporter;

impl PostingCsvImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<JobPosting>, PostingImportError> {
        let path = path.as_ref();
        let postings = Self::from_reader(File::open(path)?)?;
        info!(path = %path.display(), count = postings.len(), "imported postings export");
        Ok(postings)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<JobPosting>, PostingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        csv_reader
            .deserialize::<PostingRow>()
            .enumerate()
            .map(|(index, row)| row?.into_posting(index + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Cursor;

    const HEADER: &str = "id,slug,title,company,reference_number,employment_type,address,street_address,city,state,postal_code,min_wage,max_wage,created_at,posted_at,is_active,monday,tuesday,wednesday,thursday,friday,saturday,sunday";

    fn import(rows: &[&str]) -> Result<Vec<JobPosting>, PostingImportError> {
        let data = format!("{HEADER}\n{}\n", rows.join("\n"));
        PostingCsvImporter::from_reader(Cursor::new(data.into_bytes()))
    }

    #[test]
    fn imports_rows_with_optional_columns() {
        let postings = import(&[
            r#"1,cook-austin,Line Cook,Diner,REF-1,Full-time,,12 Elm St,Austin,TX,78701,16,20,2024-01-02T09:00:00Z,2024-01-03,,Morning,"Morning, Evening",,,,,"#,
            "2,clerk-remote,Clerk,Office,,,,,,,,52000,,2024-01-05,,false,,,,,,,",
        ])
        .expect("rows import");

        assert_eq!(postings.len(), 2);
        let cook = &postings[0];
        assert!(cook.is_active);
        assert_eq!(cook.city(), Some("Austin"));
        assert_eq!(cook.min_wage, Some(16.0));
        let shifts = cook.shift_times.as_ref().expect("shift columns present");
        assert_eq!(shifts.get(Weekday::Tue), Some("Morning, Evening"));
        assert!(cook.posted_at.is_some());

        let clerk = &postings[1];
        assert!(!clerk.is_active);
        assert_eq!(clerk.extra, None);
        assert_eq!(clerk.shift_times, None);
        assert_eq!(clerk.reference_number, None);
    }

    #[test]
    fn rejects_bad_timestamps() {
        let error = import(&["1,a,A,B,,,,,,,,,,yesterday,,,,,,,,,"]).expect_err("bad timestamp");
        match error {
            PostingImportError::InvalidTimestamp { row, field, value } => {
                assert_eq!(row, 1);
                assert_eq!(field, "created_at");
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        let result = import(&["1,a,A,B,,,,,,,,cheap,,2024-01-01,,,,,,,,,"]);
        assert!(matches!(result, Err(PostingImportError::Csv(_))));
    }
}
