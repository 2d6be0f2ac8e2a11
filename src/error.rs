//! Defines the crate level error type.

use std::path::PathBuf;

use crate::RecordId;

/// The errors that may occur when working with a ledger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The ledger file is missing, could not be read, or does not match the
    /// `ID,Tanggal,Kategori,Jumlah,Catatan` schema.
    ///
    /// The file is never repaired automatically, the caller should show
    /// `reason` to the user so they can fix the file by hand.
    #[error("could not read the ledger at {}: {reason}", .path.display())]
    StorageRead {
        /// The path to the ledger file.
        path: PathBuf,
        /// A description of what went wrong.
        reason: String,
    },

    /// The ledger could not be written, e.g. the disk is full or the
    /// directory is not writable.
    ///
    /// The mutation that triggered the write has not been applied.
    #[error("could not write the ledger at {}: {reason}", .path.display())]
    StorageWrite {
        /// The path to the ledger file.
        path: PathBuf,
        /// A description of what went wrong.
        reason: String,
    },

    /// A record's date could not be parsed as a `YYYY-MM-DD` date.
    #[error("record {id} has the date \"{text}\", which is not a valid YYYY-MM-DD date")]
    InvalidDate {
        /// The ID of the offending record.
        id: RecordId,
        /// The date text as it appears in the ledger.
        text: String,
    },

    /// An expense amount was negative, infinite or NaN.
    #[error("{0} is not a valid amount, amounts must be zero or more")]
    InvalidAmount(f64),

    /// The ledger already contains the largest possible ID.
    #[error("no more record IDs are available")]
    IdsExhausted,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The currency symbol could not be used to format amounts.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),

    /// An error occurred while serializing chart data as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
