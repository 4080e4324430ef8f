/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Date ranges accepted by the trips and statistics endpoints
//!
//! The vendor rejects daily queries spanning more than
//! [`MAX_DATE_RANGE_DAYS`] days, so ranges are clamped before being sent: the
//! start is kept and the end moved to `start + 14 days`.

use crate::constants::MAX_DATE_RANGE_DAYS;
use crate::error::AppError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

const SECONDS_PER_DAY: i64 = 86_400;
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Inclusive range of days, either as calendar dates or unix timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// Calendar dates, sent as `YYYY-MM-DD`
    Dates {
        /// First day
        start: NaiveDate,
        /// Last day
        end: NaiveDate,
    },
    /// Unix timestamps in seconds
    Timestamps {
        /// Range start
        start: i64,
        /// Range end
        end: i64,
    },
}

impl DateRange {
    /// Creates a range of calendar dates
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange::Dates { start, end }
    }

    /// Creates a range of unix timestamps (seconds)
    pub fn timestamps(start: i64, end: i64) -> Self {
        DateRange::Timestamps { start, end }
    }

    /// Parses both ends with [`parse_date`]
    pub fn parse_dates(start: &str, end: &str) -> Result<Self, AppError> {
        Ok(DateRange::Dates {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    /// Whole days between start and end
    #[must_use]
    pub fn span_days(&self) -> i64 {
        match self {
            DateRange::Dates { start, end } => (*end - *start).num_days(),
            DateRange::Timestamps { start, end } => (end - start).div_euclid(SECONDS_PER_DAY),
        }
    }

    /// Both ends as `YYYY-MM-DD`, timestamps being read as UTC
    pub fn date_strings(&self) -> Result<(String, String), AppError> {
        match self {
            DateRange::Dates { start, end } => Ok((format_date(*start), format_date(*end))),
            DateRange::Timestamps { start, end } => {
                Ok((format_date(utc_day(*start)?), format_date(utc_day(*end)?)))
            }
        }
    }

    /// Returns the range shortened to at most [`MAX_DATE_RANGE_DAYS`] days
    #[must_use]
    pub fn clamped(self) -> Self {
        if self.span_days() <= MAX_DATE_RANGE_DAYS {
            return self;
        }
        warn!(
            "Date range of {} days exceeds the {}-day limit, retrieving the first {} days only",
            self.span_days(),
            MAX_DATE_RANGE_DAYS,
            MAX_DATE_RANGE_DAYS
        );
        match self {
            DateRange::Dates { start, .. } => DateRange::Dates {
                start,
                end: start + Duration::days(MAX_DATE_RANGE_DAYS),
            },
            DateRange::Timestamps { start, .. } => DateRange::Timestamps {
                start,
                end: start + MAX_DATE_RANGE_DAYS * SECONDS_PER_DAY,
            },
        }
    }
}

/// Parses `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`, keeping the day only
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).map(|dt| dt.date()))
        .map_err(|_| {
            AppError::InvalidInput(format!(
                "'{value}' is not a date in YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS format"
            ))
        })
}

fn utc_day(timestamp: i64) -> Result<NaiveDate, AppError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| AppError::InvalidInput(format!("timestamp {timestamp} is out of range")))
}

/// Formats a date the way the API expects it
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
