pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_distinct_paths, validate_non_empty_string, validate_non_negative,
    validate_path, validate_range,
};
use bigdecimal::BigDecimal;

pub const DEFAULT_INPUT_PATH: &str = "data/products.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "data/transformed_products.csv";

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("input_path", config.input_path())?;
    validate_path("output_path", config.output_path())?;
    validate_distinct_paths(config.input_path(), config.output_path())?;
    validate_delimiter("delimiter", config.delimiter())?;

    let rules = config.transform_rules()?;
    validate_non_empty_string("rules.discount_category", &rules.discount_category)?;
    validate_non_empty_string("rules.premium_category", &rules.premium_category)?;
    validate_range(
        "rules.discount_rate",
        &rules.discount_rate,
        &BigDecimal::from(0),
        &BigDecimal::from(1),
    )?;
    validate_non_negative("rules.premium_threshold", &rules.premium_threshold)?;

    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, SummaryFormat};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::TomlConfig;
    use super::{validate_provider, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
    use crate::core::parser::DEFAULT_DELIMITER;
    use crate::core::{ConfigProvider, TransformRules};
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Parser, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum SummaryFormat {
        Text,
        Json,
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "product-etl")]
    #[command(about = "Uppercase names, discount electronics and bucket prices in a product CSV")]
    pub struct CliConfig {
        /// Input CSV path [default: data/products.csv]
        #[arg(short, long)]
        pub input: Option<String>,

        /// Output CSV path [default: data/transformed_products.csv]
        #[arg(short, long)]
        pub output: Option<String>,

        /// TOML configuration file; --input/--output override its paths
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage after each phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,

        #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
        pub summary_format: SummaryFormat,
    }

    impl CliConfig {
        /// Copies explicitly given CLI values over a file configuration.
        pub fn apply_overrides(&self, config: &mut TomlConfig) {
            if let Some(input) = &self.input {
                config.pipeline.input_path = input.clone();
            }
            if let Some(output) = &self.output {
                config.pipeline.output_path = output.clone();
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            self.input.as_deref().unwrap_or(DEFAULT_INPUT_PATH)
        }

        fn output_path(&self) -> &str {
            self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
        }

        fn delimiter(&self) -> char {
            DEFAULT_DELIMITER
        }

        fn transform_rules(&self) -> Result<TransformRules> {
            Ok(TransformRules::default())
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(self)
        }
    }

}
