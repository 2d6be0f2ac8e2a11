//! Record aggregation for charts.
//!
//! Provides the two views of a ledger that are plotted: the total spent per
//! category (bar chart) and the spending of each record over time (line chart).
//! Both are pure functions of the records passed in.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{Error, Record};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The total amount spent per category.
///
/// Categories are compared exactly (case-sensitive, whitespace included) and
/// iterate in lexical order. A category only appears if at least one record
/// belongs to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<String, f64>);

impl CategoryTotals {
    /// The total for `category`, or `None` if no record has that category.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.0.get(category).copied()
    }

    /// The categories and their totals in lexical order of category.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0
            .iter()
            .map(|(category, total)| (category.as_str(), *total))
    }

    /// The number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no categories, i.e. there were no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sum over all categories.
    pub fn grand_total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Combine the totals of two record sets.
    pub fn merge(mut self, other: CategoryTotals) -> CategoryTotals {
        for (category, total) in other.0 {
            *self.0.entry(category).or_insert(0.0) += total;
        }

        self
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = (&'a String, &'a f64);
    type IntoIter = std::collections::btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One point of the spending trend: the amount of a single record on its date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// When the money was spent.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// How much was spent.
    pub amount: f64,
}

/// Sums record amounts by category.
///
/// # Returns
/// The total per category, empty if `records` is empty.
pub fn totals_by_category(records: &[Record]) -> CategoryTotals {
    let mut totals = BTreeMap::new();

    for record in records {
        *totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
    }

    CategoryTotals(totals)
}

/// Lists the date and amount of every record in chronological order.
///
/// Records on the same date are not combined and keep their order from
/// `records`.
///
/// # Errors
/// Returns [Error::InvalidDate] for the first record, in the order of
/// `records`, whose date is not a valid `YYYY-MM-DD` date.
pub fn trend_series(records: &[Record]) -> Result<Vec<TrendPoint>, Error> {
    let mut points = records
        .iter()
        .map(|record| {
            let date = record.date.parse().map_err(|_| Error::InvalidDate {
                id: record.id,
                text: record.date.as_str().to_owned(),
            })?;

            Ok(TrendPoint {
                date,
                amount: record.amount,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    // Stable, so records sharing a date stay in input order.
    points.sort_by_key(|point| point.date);

    Ok(points)
}
