//! Renders records and their aggregations as text tables and chart data.
//!
//! The chart data is JSON with parallel `labels` and `values` arrays, ready to
//! be handed to a charting library: category names and totals for the bar
//! chart, dates and amounts for the trend line.

use serde::Serialize;

use crate::{CategoryTotals, CurrencyFormat, Error, Record, TrendPoint};

/// Shown in place of an empty category name.
pub const UNCATEGORIZED_LABEL: &str = "(none)";

/// The labels and values of a chart, in plotting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// The x-axis labels.
    pub labels: Vec<String>,
    /// One value per label.
    pub values: Vec<f64>,
}

impl From<&CategoryTotals> for ChartData {
    fn from(totals: &CategoryTotals) -> Self {
        let (labels, values) = totals
            .iter()
            .map(|(category, total)| (category.to_owned(), total))
            .unzip();

        Self { labels, values }
    }
}

impl From<&[TrendPoint]> for ChartData {
    fn from(points: &[TrendPoint]) -> Self {
        let (labels, values) = points
            .iter()
            .map(|point| (point.date.to_string(), point.amount))
            .unzip();

        Self { labels, values }
    }
}

/// Chart data for the bar chart of totals per category as JSON.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the data could not be serialized.
pub fn totals_chart_json(totals: &CategoryTotals) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&ChartData::from(totals))?)
}

/// Chart data for the spending trend line as JSON.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the data could not be serialized.
pub fn trend_chart_json(points: &[TrendPoint]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&ChartData::from(points))?)
}

/// A table of every record, one per line.
pub fn records_table(records: &[Record], currency: &CurrencyFormat) -> String {
    if records.is_empty() {
        return "No expenses recorded yet.\n".to_owned();
    }

    let rows = records
        .iter()
        .map(|record| {
            vec![
                record.id.to_string(),
                record.date.to_string(),
                category_label(&record.category).to_owned(),
                currency.format(record.amount),
                record.note.replace('\n', " "),
            ]
        })
        .collect();

    render_table(
        &["ID", "Date", "Category", "Amount", "Note"],
        &[Align::Right, Align::Left, Align::Left, Align::Right, Align::Left],
        rows,
    )
}

/// A table of the total spent per category, followed by the grand total.
pub fn totals_table(totals: &CategoryTotals, currency: &CurrencyFormat) -> String {
    if totals.is_empty() {
        return "No expenses to chart yet.\n".to_owned();
    }

    let mut rows: Vec<Vec<String>> = totals
        .iter()
        .map(|(category, total)| {
            vec![
                category_label(category).to_owned(),
                currency.format(total),
            ]
        })
        .collect();
    rows.push(vec!["Total".to_owned(), currency.format(totals.grand_total())]);

    render_table(&["Category", "Amount"], &[Align::Left, Align::Right], rows)
}

/// A table of the spending trend in chronological order.
pub fn trend_table(points: &[TrendPoint], currency: &CurrencyFormat) -> String {
    if points.is_empty() {
        return "No expenses to chart yet.\n".to_owned();
    }

    let rows = points
        .iter()
        .map(|point| vec![point.date.to_string(), currency.format(point.amount)])
        .collect();

    render_table(&["Date", "Amount"], &[Align::Left, Align::Right], rows)
}

fn category_label(category: &str) -> &str {
    if category.is_empty() {
        UNCATEGORIZED_LABEL
    } else {
        category
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

fn render_table(headers: &[&str], alignments: &[Align], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();

    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: &[String]| {
        let line = cells
            .iter()
            .zip(&widths)
            .zip(alignments)
            .map(|((cell, &width), align)| match align {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            })
            .collect::<Vec<_>>()
            .join("  ");

        format!("{}\n", line.trim_end())
    };

    let header: Vec<String> = headers.iter().map(|&header| header.to_owned()).collect();
    let separator: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();

    let mut table = render_row(header.as_slice());
    table.push_str(&render_row(separator.as_slice()));

    for row in &rows {
        table.push_str(&render_row(row.as_slice()));
    }

    table
}
