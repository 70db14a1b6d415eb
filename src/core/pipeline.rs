use crate::adapters::storage::LocalStorage;
use crate::core::etl::EtlEngine;
use crate::core::parser::ProductParser;
use crate::core::transformer::ProductTransformer;
use crate::core::writer::CsvWriter;
use crate::core::{ConfigProvider, Pipeline, Product, RunSummary, Storage, TransformResult};
use crate::utils::error::Result;
use std::io;
use std::path::{Path, PathBuf};

/// Reads products from one delimited file and writes the transformed rows
/// to another.
pub struct CsvPipeline<S: Storage> {
    storage: S,
    input_path: PathBuf,
    output_path: PathBuf,
    parser: ProductParser,
    transformer: ProductTransformer,
    writer: CsvWriter,
}

impl<S: Storage> CsvPipeline<S> {
    pub fn new(storage: S, input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            input_path: input_path.into(),
            output_path: output_path.into(),
            parser: ProductParser::default(),
            transformer: ProductTransformer::default(),
            writer: CsvWriter::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Result<Self> {
        Ok(Self::new(storage, config.input_path(), config.output_path())
            .with_parser(ProductParser::new(config.delimiter()))
            .with_transformer(ProductTransformer::new(config.transform_rules()?)))
    }

    pub fn with_parser(mut self, parser: ProductParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_transformer(mut self, transformer: ProductTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl<S: Storage> Pipeline for CsvPipeline<S> {
    fn extract(&self) -> Result<Vec<Product>> {
        tracing::debug!("Reading products from {}", self.input_path.display());
        let data = self.storage.read_file(&self.input_path)?;
        let text =
            String::from_utf8(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // The first line is a header and is never inspected.
        let mut products = Vec::new();
        for (index, line) in input_lines(&text).enumerate().skip(1) {
            match self.parser.parse(line) {
                Some(product) => products.push(product),
                None => tracing::debug!("Skipping malformed line {}: {:?}", index + 1, line),
            }
        }

        Ok(products)
    }

    fn transform(&self, products: Vec<Product>) -> TransformResult {
        let rows_read = products.len();
        let mut transformed = Vec::with_capacity(rows_read);
        let mut rows_skipped = 0;

        for product in &products {
            match self.transformer.transform(product) {
                Some(result) => transformed.push(result),
                None => {
                    tracing::warn!("Skipping product '{}': transformation failed", product.id);
                    rows_skipped += 1;
                }
            }
        }

        TransformResult {
            products: transformed,
            rows_read,
            rows_skipped,
        }
    }

    fn load(&self, result: &TransformResult) -> Result<String> {
        self.writer
            .write_products(&self.storage, &self.output_path, &result.products)?;
        Ok(self.output_path.display().to_string())
    }
}

/// Splits on `\n`, `\r\n` or a lone `\r`. A trailing terminator does not
/// start an extra empty line.
fn input_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(end) => {
                let line = &rest[..end];
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

/// Runs the whole pipeline from `input` to `output` on the local filesystem
/// with the default rules.
pub fn run_pipeline(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunSummary> {
    let pipeline = CsvPipeline::new(
        LocalStorage::default(),
        input.as_ref(),
        output.as_ref(),
    );
    EtlEngine::new(pipeline).run()
}
