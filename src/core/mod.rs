pub mod etl;
pub mod parser;
pub mod pipeline;
pub mod transformer;
pub mod writer;

pub use crate::domain::model::{PriceRange, Product, RunSummary, TransformResult, TransformRules};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
