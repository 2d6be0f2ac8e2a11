//! Formats amounts of money for display.

use numfmt::{Formatter, Precision};

use crate::Error;

/// Formats amounts as currency with a fixed symbol, e.g. "Rp50,000".
pub struct CurrencyFormat {
    symbol: String,
    positive_fmt: Formatter,
    negative_fmt: Formatter,
}

impl CurrencyFormat {
    /// Create a formatter that prefixes amounts with `symbol`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if the symbol is too long to be
    /// used as a prefix.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        let formatter = |prefix: &str| {
            Formatter::currency(prefix)
                .map(|fmt| fmt.precision(Precision::Decimals(0)))
                .map_err(|_| Error::InvalidCurrencySymbol(symbol.to_owned()))
        };

        Ok(Self {
            symbol: symbol.to_owned(),
            positive_fmt: formatter(symbol)?,
            negative_fmt: formatter(format!("-{symbol}").as_str())?,
        })
    }

    /// The currency symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Format `amount` rounded to the nearest whole unit.
    pub fn format(&self, amount: f64) -> String {
        let amount = amount.round();

        if amount < 0.0 {
            self.negative_fmt.fmt_string(amount.abs())
        } else if amount > 0.0 {
            self.positive_fmt.fmt_string(amount)
        } else {
            // Zero is hardcoded as "0", so we must specify the formatted string for zero
            format!("{}0", self.symbol)
        }
    }
}
