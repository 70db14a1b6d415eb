use crate::domain::model::{Product, TransformResult, TransformRules};
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> char;
    fn transform_rules(&self) -> Result<TransformRules>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<Product>>;
    fn transform(&self, products: Vec<Product>) -> TransformResult;
    /// Writes the result and returns the output location.
    fn load(&self, result: &TransformResult) -> Result<String>;
}
