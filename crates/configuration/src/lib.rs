use crate::error::ConfigError;
use config::{Environment, File};
use core_types::MissingAmountPolicy;
use rust_decimal::Decimal;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    CleaningSettings, Config, GeneratorSettings, LogFormat, LoggingSettings, OutputSettings,
    ReportSettings,
};

/// The file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "salesboard.toml";

/// Prefix of environment variables that override file values,
/// e.g. `SALESBOARD__OUTPUT__DIR=out`.
pub const ENV_PREFIX: &str = "SALESBOARD";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file, then
/// `SALESBOARD__*` environment variables. An explicitly named file must exist;
/// the default `salesboard.toml` is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_config_with_env(path: Option<&Path>, env: Environment) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Rejects settings the pipeline cannot run with.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.generator.orders == 0 {
        return Err(ConfigError::ValidationError(
            "generator.orders must be greater than 0".to_string(),
        ));
    }
    if config.generator.start_date > config.generator.end_date {
        return Err(ConfigError::ValidationError(format!(
            "generator.start_date ({}) is after generator.end_date ({})",
            config.generator.start_date, config.generator.end_date
        )));
    }
    if !(0.0..=1.0).contains(&config.generator.dirty_fraction) {
        return Err(ConfigError::ValidationError(format!(
            "generator.dirty_fraction ({}) must be between 0.0 and 1.0",
            config.generator.dirty_fraction
        )));
    }
    if config.report.histogram_bins == 0 {
        return Err(ConfigError::ValidationError(
            "report.histogram_bins must be greater than 0".to_string(),
        ));
    }
    if let MissingAmountPolicy::Impute(value) = config.cleaning.missing_amount {
        if value < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "cleaning.missing_amount imputes a negative amount ({value})"
            )));
        }
    }
    Ok(())
}
