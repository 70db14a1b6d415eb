use crate::domain::model::{trim_field, Product};
use bigdecimal::BigDecimal;
use std::str::FromStr;

pub const DEFAULT_DELIMITER: char = ',';

/// Turns one raw input line into a [`Product`].
///
/// Fields are split on a single delimiter with no quoting support, in the
/// order id, name, price, category. Anything after the fourth field is
/// ignored.
#[derive(Debug, Clone, Copy)]
pub struct ProductParser {
    delimiter: char,
}

impl Default for ProductParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl ProductParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns `None` for blank lines, lines with fewer than four fields,
    /// empty required fields and prices that are not exact decimals.
    pub fn parse(&self, line: &str) -> Option<Product> {
        if trim_field(line).is_empty() {
            return None;
        }

        let mut fields = line.split(self.delimiter).map(trim_field);
        let id = fields.next()?;
        let name = fields.next()?;
        let price = fields.next()?;
        let category = fields.next()?;

        if id.is_empty() || name.is_empty() || price.is_empty() || category.is_empty() {
            return None;
        }

        let price = parse_price(price)?;
        Some(Product::new(id, name, price, category))
    }
}

/// Parses an exact decimal of any precision, in plain (`12.50`) or
/// scientific (`1.25E+1`) notation. Nothing is rounded here.
pub fn parse_price(text: &str) -> Option<BigDecimal> {
    // digit separators are accepted by the bigint parser but are not decimal text
    if text.contains('_') {
        return None;
    }

    BigDecimal::from_str(text).ok()
}
