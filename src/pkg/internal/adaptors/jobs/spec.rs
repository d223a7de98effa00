use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::prelude::Error;

/// A scraped posting. Rows are written by the external ingestion pipeline;
/// this service never creates, updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: Uuid,
    pub title: String,
    pub date_posted: NaiveDate,
    pub salary: String,
    pub contract: String,
    pub reference_number: String,
    pub address: String,
    pub closing_date: NaiveDate,
    pub sponsored: bool,
    pub link: String,
    pub is_closed: bool,
}

/// Wire representation of a job: dates rendered human-readable, id passed
/// through untouched.
#[derive(Debug, Serialize)]
pub struct JobOut {
    pub id: Uuid,
    pub title: String,
    pub date_posted: String,
    pub salary: String,
    pub contract: String,
    pub reference_number: String,
    pub address: String,
    pub closing_date: String,
    pub sponsored: bool,
    pub link: String,
}

impl From<JobEntry> for JobOut {
    fn from(job: JobEntry) -> Self {
        JobOut {
            id: job.id,
            title: job.title,
            date_posted: format_date(job.date_posted),
            salary: job.salary,
            contract: job.contract,
            reference_number: job.reference_number,
            address: job.address,
            closing_date: format_date(job.closing_date),
            sponsored: job.sponsored,
            link: job.link,
        }
    }
}

// e.g. "11 July 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> core::result::Result<Self, Error> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(Error::Validation(format!(
                "sort must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Listing predicate for open jobs: only postings closing on or after
/// `open_on`, minus everything the caller already acted on.
#[derive(Debug, Clone)]
pub struct JobFilter {
    pub open_on: NaiveDate,
    pub excluded_ids: Vec<Uuid>,
    pub sponsored: Option<bool>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_dates_with_full_month_name() {
        assert_eq!(format_date(date(2025, 7, 11)), "11 July 2025");
        assert_eq!(format_date(date(2026, 1, 3)), "03 January 2026");
        assert_eq!(format_date(date(2024, 12, 31)), "31 December 2024");
    }

    #[test]
    fn sort_direction_parses_known_values_only() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!(
            "desc".parse::<SortDirection>().unwrap(),
            SortDirection::Desc
        );
        assert!(matches!(
            "newest".parse::<SortDirection>(),
            Err(Error::Validation(_))
        ));
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn job_out_formats_dates_and_keeps_id_opaque() {
        let id = Uuid::new_v4();
        let job = JobEntry {
            id,
            title: "Staff Nurse".into(),
            date_posted: date(2025, 6, 2),
            salary: "£29,970 a year".into(),
            contract: "Permanent".into(),
            reference_number: "C9318-25-0441".into(),
            address: "Leeds".into(),
            closing_date: date(2025, 7, 11),
            sponsored: true,
            link: "https://example.org/jobs/1".into(),
            is_closed: false,
        };
        let out = JobOut::from(job);
        assert_eq!(out.id, id);
        assert_eq!(out.date_posted, "02 June 2025");
        assert_eq!(out.closing_date, "11 July 2025");
        assert!(out.sponsored);
    }
}
