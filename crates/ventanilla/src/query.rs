//! Client-side filtering for the merged listing.
//!
//! The review view fetches the merged record set and narrows it locally.
//! [`FilterCriteria`] captures the optional predicates (kind, date range,
//! free text) and applies them conjunctively in that fixed order.
//! Application is pure: it keeps input order, never re-sorts, and applying
//! the same criteria twice yields the same result.

use chrono::{DateTime, NaiveDate};

use crate::record::{Record, RecordKind};

/// An inclusive calendar-date range.
///
/// Both ends are required; a half-open range cannot be expressed, matching
/// the listing form where both date inputs must be filled for the filter to
/// take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day included in the range.
    pub start: NaiveDate,
    /// Last day included in the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new inclusive range.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether a date falls within `[start, end]`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Filter criteria for the merged listing. All parts are optional; empty
/// criteria pass every record through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Keep only records of this kind. `None` means all kinds.
    pub kind: Option<RecordKind>,
    /// Keep only records whose `fecha` falls in this calendar-date range.
    pub dates: Option<DateRange>,
    /// Keep only records where some field contains this text,
    /// case-insensitively.
    pub text: Option<String>,
}

impl FilterCriteria {
    /// Check whether no predicate is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.dates.is_none() && self.text.as_deref().unwrap_or("").is_empty()
    }

    /// Check a single record against all three predicates.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(kind) = self.kind {
            if record.tipo != kind {
                return false;
            }
        }

        if let Some(range) = self.dates {
            // A fecha that cannot be parsed never matches a date range.
            match fecha_date(&record.fecha) {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        if let Some(text) = self.text.as_deref() {
            if !text.is_empty() && !record.contains_text(text) {
                return false;
            }
        }

        true
    }

    /// Filter a record sequence, preserving its order.
    #[must_use]
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Parse a record's `fecha` down to a calendar date.
///
/// Accepts full RFC 3339 timestamps (what the store writes) and bare
/// `YYYY-MM-DD` strings (what edited records may carry).
#[must_use]
pub fn fecha_date(fecha: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(fecha)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(fecha, "%Y-%m-%d").ok())
}
