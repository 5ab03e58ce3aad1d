use super::{evolution::EvolutionConfig, traits::ConfigSection};
use crate::engines::evaluation::interpreter::TerminalBinding;
use crate::error::GpError;
use crate::functions::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Prefix of environment variables overriding file settings,
/// e.g. `GPGYM__EVOLUTION__POPULATION_SIZE=100`
pub const ENV_PREFIX: &str = "GPGYM";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// TOML file with `[terminals.*]` and `[functions.*]` tables
    pub catalog_path: Option<PathBuf>,
    /// Terminal bindings for the evaluator, layered over the built-in ones
    pub bindings: BTreeMap<String, TerminalBinding>,
    pub evolution: EvolutionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GpError> {
        self.evolution.validate()?;
        Ok(())
    }

    /// Catalog named by `catalog_path`, if any
    pub fn load_catalog(&self) -> Result<Option<Catalog>, GpError> {
        self.catalog_path
            .as_ref()
            .map(Catalog::from_path)
            .transpose()
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layer a TOML or JSON file (format from its extension) under
    /// `GPGYM__*` environment variables, then validate.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GpError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| GpError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        log::debug!("loaded {} section from {}", EvolutionConfig::section_name(), path.as_ref().display());

        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| GpError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| GpError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, GpError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| GpError::Configuration("Config lock poisoned".to_string()))
    }

    pub fn update<F>(&self, f: F) -> Result<(), GpError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get()?;
        f(&mut candidate);
        candidate.validate()?;
        *self.write_lock()? = candidate;
        Ok(())
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, GpError> {
        self.config
            .write()
            .map_err(|_| GpError::Configuration("Config lock poisoned".to_string()))
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
