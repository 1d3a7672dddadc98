//! Report metadata supplied by the caller alongside the raw rows.

use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The calendar month a report covers. Day cells store only the day-of-month;
/// year and month travel here, supplied once per export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> Option<ReportPeriod> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| ReportPeriod { year, month })
    }

    /// Parse a "YYYY-MM" descriptor.
    pub fn parse(text: &str) -> Option<ReportPeriod> {
        let (year, month) = text.trim().split_once('-')?;
        ReportPeriod::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// Number of days in the month (28..=31).
    pub fn days_in_month(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        // Constructor guarantees the first of the month exists.
        match (next, NaiveDate::from_ymd_opt(self.year, self.month, 1)) {
            (Some(next), Some(first)) => (next - first).num_days() as u32,
            _ => 31,
        }
    }

    /// Two-letter weekday token for a day of this month ("Mo", "Tu", ...).
    pub fn weekday_token(&self, day: u32) -> &'static str {
        match NaiveDate::from_ymd_opt(self.year, self.month, day).map(|d| d.weekday()) {
            Some(Weekday::Mon) => "Mo",
            Some(Weekday::Tue) => "Tu",
            Some(Weekday::Wed) => "We",
            Some(Weekday::Thu) => "Th",
            Some(Weekday::Fri) => "Fr",
            Some(Weekday::Sat) => "Sa",
            Some(Weekday::Sun) => "Su",
            None => "",
        }
    }

    /// Human label, e.g. "August 2025".
    pub fn label(&self) -> String {
        let month_name = match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        };
        format!("{month_name} {}", self.year)
    }
}

/// Header metadata rendered at the top of every export format.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub title: String,
    pub company_name: String,
    pub period: ReportPeriod,
    /// Free-text filter descriptions from the calling screen
    /// (branch/department/designation names).
    pub filters: Vec<String>,
    pub generated_at: DateTime<Local>,
}

impl ReportMeta {
    pub fn new(title: impl Into<String>, company_name: impl Into<String>, period: ReportPeriod) -> ReportMeta {
        ReportMeta {
            title: title.into(),
            company_name: company_name.into(),
            period,
            filters: Vec::new(),
            generated_at: Local::now(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<String>) -> ReportMeta {
        self.filters = filters;
        self
    }
}
