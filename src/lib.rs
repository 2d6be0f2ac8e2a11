//! Spendbook is a personal expense ledger.
//!
//! Expenses are kept in a CSV file with the columns
//! `ID,Tanggal,Kategori,Jumlah,Catatan` (ID, date, category, amount, note).
//! A [RecordStore] loads the file once and rewrites it after every
//! [RecordStore::add] and [RecordStore::delete]. The records can then be
//! summarised for charts with [totals_by_category] and [trend_series].
//!
//! ```no_run
//! use spendbook::{Record, RecordStore, totals_by_category, trend_series};
//! use time::macros::date;
//!
//! # fn main() -> Result<(), spendbook::Error> {
//! let mut store = RecordStore::open("pengeluaran.csv")?;
//! store.add(Record::build(date!(2024 - 01 - 01), "Food", 50000.0))?;
//!
//! let totals = totals_by_category(store.list());
//! let trend = trend_series(store.list())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregation;
mod currency;
mod error;
mod record;
pub mod report;
mod storage;
mod store;
mod timezone;

pub use aggregation::{CategoryTotals, TrendPoint, totals_by_category, trend_series};
pub use currency::CurrencyFormat;
pub use error::Error;
pub use record::{NewRecord, Record, RecordDate, RecordId, parse_date};
pub use storage::COLUMNS;
pub use store::RecordStore;
pub use timezone::{get_local_offset, today};
