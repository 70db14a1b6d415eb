use super::{validate_provider, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use crate::core::parser::{parse_price, DEFAULT_DELIMITER};
use crate::core::{ConfigProvider, TransformRules};
use crate::domain::model::trim_field;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    pub rules: Option<RulesConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: Option<String>,
    #[serde(default = "default_input_path")]
    pub input_path: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    pub delimiter: Option<char>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: None,
            input_path: default_input_path(),
            output_path: default_output_path(),
            delimiter: None,
        }
    }
}

fn default_input_path() -> String {
    DEFAULT_INPUT_PATH.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

/// Overrides for the pricing rules. Decimals are given as strings
/// (`discount_rate = "0.90"`) so they stay exact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub discount_category: Option<String>,
    pub premium_category: Option<String>,
    pub discount_rate: Option<String>,
    pub premium_threshold: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// Loads and parses a TOML file, substituting environment placeholders.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn pipeline_name(&self) -> &str {
        self.pipeline.name.as_deref().unwrap_or("product-etl")
    }
}

fn parse_decimal_setting(field: &str, value: &str) -> Result<BigDecimal> {
    parse_price(trim_field(value)).ok_or_else(|| EtlError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: "Not a decimal number".to_string(),
    })
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.pipeline.input_path
    }

    fn output_path(&self) -> &str {
        &self.pipeline.output_path
    }

    fn delimiter(&self) -> char {
        self.pipeline.delimiter.unwrap_or(DEFAULT_DELIMITER)
    }

    fn transform_rules(&self) -> Result<TransformRules> {
        let mut rules = TransformRules::default();
        let Some(overrides) = &self.rules else {
            return Ok(rules);
        };

        if let Some(category) = &overrides.discount_category {
            rules.discount_category = category.clone();
        }
        if let Some(category) = &overrides.premium_category {
            rules.premium_category = category.clone();
        }
        if let Some(rate) = &overrides.discount_rate {
            rules.discount_rate = parse_decimal_setting("rules.discount_rate", rate)?;
        }
        if let Some(threshold) = &overrides.premium_threshold {
            rules.premium_threshold = parse_decimal_setting("rules.premium_threshold", threshold)?;
        }

        Ok(rules)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.pipeline.name {
            validate_non_empty_string("pipeline.name", name)?;
        }
        validate_provider(self)
    }
}
