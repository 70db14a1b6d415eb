use bigdecimal::BigDecimal;
use serde::Serialize;
use std::fmt;

/// Strips leading and trailing characters up to and including U+0020
/// (ASCII controls and space). Other Unicode whitespace is kept.
pub fn trim_field(value: &str) -> &str {
    value.trim_matches(|c: char| c <= ' ')
}

/// One product row flowing through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
    pub category: String,
    /// Set once, at the end of transformation.
    pub price_range: Option<PriceRange>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: BigDecimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            price_range: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        !trim_field(&self.id).is_empty()
            && !trim_field(&self.name).is_empty()
            && !trim_field(&self.category).is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceRange {
    Low,
    Medium,
    High,
    Premium,
}

impl PriceRange {
    /// Buckets a final price: `[0, 10]` Low, `(10, 100]` Medium,
    /// `(100, 500]` High, anything else (including negatives) Premium.
    pub fn classify(price: &BigDecimal) -> Self {
        let zero = BigDecimal::from(0);
        let ten = BigDecimal::from(10);
        let one_hundred = BigDecimal::from(100);
        let five_hundred = BigDecimal::from(500);

        if *price >= zero && *price <= ten {
            PriceRange::Low
        } else if *price > ten && *price <= one_hundred {
            PriceRange::Medium
        } else if *price > one_hundred && *price <= five_hundred {
            PriceRange::High
        } else {
            PriceRange::Premium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Low => "Low",
            PriceRange::Medium => "Medium",
            PriceRange::High => "High",
            PriceRange::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing rules applied by the transformer. Immutable once a transformer
/// has been built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRules {
    pub discount_category: String,
    pub premium_category: String,
    pub discount_rate: BigDecimal,
    pub premium_threshold: BigDecimal,
}

impl Default for TransformRules {
    fn default() -> Self {
        Self {
            discount_category: "Electronics".to_string(),
            premium_category: "Premium Electronics".to_string(),
            discount_rate: BigDecimal::new(90i64.into(), 2),
            premium_threshold: BigDecimal::new(50_000i64.into(), 2),
        }
    }
}

/// Output of the transform phase, handed to the writer in one batch.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub products: Vec<Product>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

impl TransformResult {
    pub fn summary(&self) -> RunSummary {
        RunSummary::new(self.rows_read, self.products.len(), self.rows_skipped)
    }
}

/// Counts reported for one run.
///
/// `rows_read` only counts rows the parser accepted; rows the parser rejected
/// appear in none of the three counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    rows_read: usize,
    rows_transformed: usize,
    rows_skipped: usize,
}

impl RunSummary {
    pub fn new(rows_read: usize, rows_transformed: usize, rows_skipped: usize) -> Self {
        Self {
            rows_read,
            rows_transformed,
            rows_skipped,
        }
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn rows_transformed(&self) -> usize {
        self.rows_transformed
    }

    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows_read={}, rows_transformed={}, rows_skipped={}",
            self.rows_read, self.rows_transformed, self.rows_skipped
        )
    }
}
