//! Domain models for the campaign cleaning pipeline.
//!
//! - [`RawRecord`] - one merged input row, as extracted from an archive
//! - [`ClientRecord`] - row of the `client` table
//! - [`CampaignRecord`] - row of the `campaign` table
//! - [`EconomicsRecord`] - row of the `economics` table
//! - [`ContactDate`] - reconstructed last-contact date (fixed year)
//! - [`DataQualityIssue`] - non-fatal findings reported alongside the tables
//!
//! Output structs serialize in their declared field order, which is the
//! column order of the written CSV files.

use std::fmt;

use chrono::{Month, NaiveDate};
use serde::{Serialize, Serializer};

/// Year stamped on every reconstructed contact date. The source data carries no year.
pub const CONTACT_YEAR: i32 = 2022;

// =============================================================================
// Input
// =============================================================================

/// One unprocessed row of campaign data.
///
/// Text columns are `None` when the cell was empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRecord {
    pub client_id: i64,
    pub age: i64,
    pub job: Option<String>,
    pub marital: Option<String>,
    pub education: Option<String>,
    pub credit_default: Option<String>,
    pub mortgage: Option<String>,
    pub number_contacts: i64,
    /// Seconds.
    pub contact_duration: i64,
    pub previous_campaign_contacts: i64,
    pub previous_outcome: Option<String>,
    pub campaign_outcome: Option<String>,
    pub day: u32,
    pub month: Option<String>,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

// =============================================================================
// Outputs
// =============================================================================

/// Client demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRecord {
    pub client_id: i64,
    pub age: i64,
    pub job: Option<String>,
    pub marital: Option<String>,
    /// `None` replaces the `unknown` token.
    pub education: Option<String>,
    pub credit_default: u8,
    pub mortgage: u8,
}

/// Campaign interaction facts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRecord {
    pub client_id: i64,
    pub number_contacts: i64,
    pub contact_duration: i64,
    pub previous_campaign_contacts: i64,
    pub previous_outcome: u8,
    pub campaign_outcome: u8,
    /// `None` when the month token was not recognized; written as an empty cell.
    pub last_contact_date: Option<ContactDate>,
}

/// Economic indicators, copied verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicsRecord {
    pub client_id: i64,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

// =============================================================================
// Contact date
// =============================================================================

/// Day and month of the last contact, rendered as `2022-MM-DD`.
///
/// The day is not range-checked against the month: `2022-02-31` renders as
/// such. Use [`ContactDate::is_calendar_date`] to detect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactDate {
    pub month: Month,
    pub day: u32,
}

impl ContactDate {
    pub fn new(month: Month, day: u32) -> Self {
        Self { month, day }
    }

    /// Whether the date exists in [`CONTACT_YEAR`].
    pub fn is_calendar_date(&self) -> bool {
        self.to_naive().is_some()
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(CONTACT_YEAR, self.month.number_from_month(), self.day)
    }
}

impl fmt::Display for ContactDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02}",
            CONTACT_YEAR,
            self.month.number_from_month(),
            self.day
        )
    }
}

impl Serialize for ContactDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Data quality
// =============================================================================

/// A non-fatal finding about one input row.
///
/// `row` is the zero-based position in the merged input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// The month token matched none of the twelve abbreviations; the date was left empty.
    UnrecognizedMonth {
        row: usize,
        client_id: i64,
        value: Option<String>,
    },
    /// The reconstructed date does not exist (e.g. `2022-11-31`); it was still emitted.
    ImpossibleDate {
        row: usize,
        client_id: i64,
        date: String,
    },
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityIssue::UnrecognizedMonth {
                row,
                client_id,
                value,
            } => write!(
                f,
                "row {} (client {}): unrecognized month {:?}, last_contact_date left empty",
                row,
                client_id,
                value.as_deref().unwrap_or("")
            ),
            DataQualityIssue::ImpossibleDate {
                row,
                client_id,
                date,
            } => write!(
                f,
                "row {} (client {}): {} is not a calendar date",
                row, client_id, date
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_date_display() {
        assert_eq!(ContactDate::new(Month::January, 5).to_string(), "2022-01-05");
        assert_eq!(ContactDate::new(Month::December, 31).to_string(), "2022-12-31");
    }

    #[test]
    fn test_contact_date_calendar_check() {
        assert!(ContactDate::new(Month::February, 28).is_calendar_date());
        assert!(!ContactDate::new(Month::February, 29).is_calendar_date());
        assert!(!ContactDate::new(Month::November, 31).is_calendar_date());
        assert_eq!(ContactDate::new(Month::February, 31).to_string(), "2022-02-31");
    }

    #[test]
    fn test_issue_serializes_with_kind_tag() {
        let issue = DataQualityIssue::UnrecognizedMonth {
            row: 2,
            client_id: 9,
            value: Some("sept".into()),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "unrecognized_month");
        assert_eq!(json["value"], "sept");
        assert!(issue.to_string().contains("client 9"));
    }
}
