pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, SummaryFormat};

pub use adapters::storage::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use self::core::{
    etl::EtlEngine,
    parser::ProductParser,
    pipeline::{run_pipeline, CsvPipeline},
    transformer::ProductTransformer,
    writer::CsvWriter,
};
pub use domain::model::{PriceRange, Product, RunSummary, TransformRules};
pub use utils::error::{EtlError, Result};
