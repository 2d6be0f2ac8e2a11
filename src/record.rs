//! Defines the expense record and the builder used to add new records.

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for record IDs.
pub type RecordId = u64;

/// The format of record dates in the ledger, e.g. "2024-01-31".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text.trim(), DATE_FORMAT)
}

/// The date of a record as it is written in the ledger.
///
/// Dates are kept as text so that a ledger with a malformed date can still
/// be loaded, listed and cleaned up. [RecordDate::parse] gives the calendar
/// date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    /// Wrap the text of a date exactly as it appears in the ledger.
    pub fn new(text: &str) -> Self {
        Self(text.to_owned())
    }

    /// The date as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the text as a `YYYY-MM-DD` calendar date.
    pub fn parse(&self) -> Result<Date, time::error::Parse> {
        parse_date(&self.0)
    }
}

impl From<Date> for RecordDate {
    fn from(date: Date) -> Self {
        // `Date` displays as `YYYY-MM-DD`.
        Self(date.to_string())
    }
}

impl std::fmt::Display for RecordDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An expense, i.e. an event where money was spent.
///
/// To create a new `Record`, use [Record::build] and pass the result to
/// [crate::RecordStore::add], which assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The ID of the record, unique within a ledger.
    pub id: RecordId,
    /// When the money was spent.
    pub date: RecordDate,
    /// A free-text label used to group expenses, may be empty.
    pub category: String,
    /// How much money was spent.
    pub amount: f64,
    /// A free-text note, may be empty.
    pub note: String,
}

impl Record {
    /// Create a new expense record.
    ///
    /// Shortcut for [NewRecord] for discoverability.
    pub fn build(date: Date, category: &str, amount: f64) -> NewRecord {
        NewRecord {
            date,
            category: category.to_owned(),
            amount,
            note: String::new(),
        }
    }
}

/// A record that has not been given an ID yet.
///
/// # Examples
///
/// ```
/// use spendbook::Record;
/// use time::macros::date;
///
/// let new_record = Record::build(date!(2024 - 01 - 01), "Food", 50000.0).note("Lunch");
///
/// assert_eq!(new_record.note, "Lunch");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// When the money was spent.
    pub date: Date,
    /// A free-text label used to group expenses. Compared exactly, so "food"
    /// and "Food" are different categories.
    pub category: String,
    /// How much money was spent. Must be zero or more.
    pub amount: f64,
    /// A free-text note, defaults to an empty string.
    pub note: String,
}

impl NewRecord {
    /// Set the note for the record.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }

    /// Check the amount and attach `id` to create a [Record].
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is negative, infinite or NaN.
    pub(crate) fn finalize(self, id: RecordId) -> Result<Record, Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(Record {
            id,
            date: self.date.into(),
            category: self.category,
            amount: self.amount,
            note: self.note,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, Record, RecordDate, parse_date};

    #[test]
    fn record_date_from_date_uses_iso_format() {
        let record_date = RecordDate::from(date!(2024 - 01 - 03));

        assert_eq!(record_date.as_str(), "2024-01-03");
        assert_eq!(record_date.parse().unwrap(), date!(2024 - 01 - 03));
    }

    #[test]
    fn parse_date_ignores_surrounding_whitespace() {
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date!(2024 - 02 - 29));
    }

    #[test]
    fn parse_fails_on_malformed_date() {
        assert!(RecordDate::new("2024-02-30").parse().is_err());
        assert!(RecordDate::new("31/01/2024").parse().is_err());
        assert!(RecordDate::new("").parse().is_err());
    }

    #[test]
    fn finalize_keeps_fields() {
        let record = Record::build(date!(2024 - 01 - 01), "Food", 50000.0)
            .note("Nasi goreng")
            .finalize(7)
            .unwrap();

        assert_eq!(
            record,
            Record {
                id: 7,
                date: RecordDate::new("2024-01-01"),
                category: "Food".to_owned(),
                amount: 50000.0,
                note: "Nasi goreng".to_owned(),
            }
        );
    }

    #[test]
    fn finalize_allows_zero_amount() {
        let record = Record::build(date!(2024 - 01 - 01), "", 0.0).finalize(1);

        assert!(record.is_ok());
    }

    #[test]
    fn finalize_rejects_negative_amount() {
        let result = Record::build(date!(2024 - 01 - 01), "Food", -1.0).finalize(1);

        assert_eq!(result, Err(Error::InvalidAmount(-1.0)));
    }

    #[test]
    fn finalize_rejects_non_finite_amount() {
        let result = Record::build(date!(2024 - 01 - 01), "Food", f64::INFINITY).finalize(1);

        assert_eq!(result, Err(Error::InvalidAmount(f64::INFINITY)));
    }
}
