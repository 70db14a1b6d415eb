use crate::domain::model::Product;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::Path;

pub const OUTPUT_HEADER: [&str; 5] = ["ProductID", "Name", "Price", "Category", "PriceRange"];

/// Serializes transformed products as comma-separated text.
///
/// Fields are written verbatim: no quoting, `\n` line endings, prices in
/// plain notation with the scale the transformer gave them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_csv_bytes(&self, products: &[Product]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(OUTPUT_HEADER)?;

        for product in products {
            let price = product.price.to_plain_string();
            let price_range = product.price_range.map(|r| r.as_str()).unwrap_or_default();
            writer.write_record([
                product.id.as_str(),
                product.name.as_str(),
                price.as_str(),
                product.category.as_str(),
                price_range,
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| EtlError::IoError(e.into_error()))
    }

    /// Writes the header and one row per product, in the order given.
    pub fn write_products<S: Storage + ?Sized>(
        &self,
        storage: &S,
        path: &Path,
        products: &[Product],
    ) -> Result<()> {
        let data = self.to_csv_bytes(products)?;
        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            products.len(),
            data.len(),
            path.display()
        );
        storage.write_file(path, &data)
    }

    pub fn write_header_only<S: Storage + ?Sized>(&self, storage: &S, path: &Path) -> Result<()> {
        self.write_products(storage, path, &[])
    }
}
