// src/config/mod.rs
mod models;

pub use models::*;

use config::Environment;
use std::collections::HashMap;

/// Load configuration from the process environment
pub fn load_config() -> Result<Config, ConfigError> {
    load(Environment::default())
}

/// Load configuration from an explicit set of variables instead of the
/// process environment. Keys use the same names as the environment
/// (`RUNPOD_API_KEY`, `PING_INTERVAL`, ...).
pub fn load_config_from(vars: HashMap<String, String>) -> Result<Config, ConfigError> {
    load(Environment::default().source(Some(vars)))
}

fn load(source: Environment) -> Result<Config, ConfigError> {
    let config: Config = config::Config::builder()
        .add_source(source)
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}
