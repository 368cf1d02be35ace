//! Badge-event and supplemental-card models.
//!
//! This module defines the raw badge-swipe event and the supplemental-card
//! usage record consumed by the reconciliation engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single raw badge-swipe event.
///
/// An employee may produce any number of events per day; only the first
/// and last event of a day matter for computing the worked span, and the
/// total count drives the missing-punch classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeEvent {
    /// The name of the cardholder.
    pub employee: String,
    /// The timestamp of the swipe.
    pub timestamp: NaiveDateTime,
}

impl BadgeEvent {
    /// Returns the calendar date the event falls on.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::BadgeEvent;
    /// use chrono::{NaiveDate, NaiveDateTime};
    ///
    /// let event = BadgeEvent {
    ///     employee: "Alice Chen".to_string(),
    ///     timestamp: NaiveDateTime::parse_from_str("2025-04-28 08:55:12", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// };
    /// assert_eq!(event.date(), NaiveDate::from_ymd_opt(2025, 4, 28).unwrap());
    /// ```
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A supplemental-card usage record.
///
/// Supplemental cards are manually issued temporary badges; their usage is
/// tracked in a separate table and surfaced as an informational flag on the
/// attendance record for the matching employee and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementalCardUsage {
    /// The name of the employee the card was issued to.
    pub employee: String,
    /// The date the card was used.
    pub date: NaiveDate,
}
