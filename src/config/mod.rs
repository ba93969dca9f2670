use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::underwriting::coverage::{
    CatalogError, CatalogFile, CatalogProvider, CoverageCatalog, FixedCatalog,
};
use crate::workflows::underwriting::renewal::DEFAULT_TREND_FACTOR;

/// Engine configuration sourced from the environment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the coverage catalog document; the builtin catalog serves when
    /// unset.
    pub catalog_path: Option<PathBuf>,
    /// Default market trend factor for renewal recommendations.
    pub trend_factor: f64,
}

impl EngineConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let catalog_path = env::var("UW_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let trend_factor = match env::var("UW_TREND_FACTOR") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or(ConfigError::InvalidTrendFactor)?,
            Err(_) => DEFAULT_TREND_FACTOR,
        };

        Ok(Self {
            catalog_path,
            trend_factor,
        })
    }

    /// Catalog provider per the configuration: file-backed (re-read on every
    /// call) when a path is configured, the builtin snapshot otherwise.
    pub fn catalog_provider(&self) -> ConfiguredCatalog {
        match &self.catalog_path {
            Some(path) => ConfiguredCatalog::File(CatalogFile::new(path.clone())),
            None => ConfiguredCatalog::Builtin(FixedCatalog::builtin()),
        }
    }
}

/// Provider selected by `EngineConfig`.
#[derive(Debug, Clone)]
pub enum ConfiguredCatalog {
    File(CatalogFile),
    Builtin(FixedCatalog),
}

impl CatalogProvider for ConfiguredCatalog {
    fn catalog(&self) -> Result<CoverageCatalog, CatalogError> {
        match self {
            ConfiguredCatalog::File(provider) => provider.catalog(),
            ConfiguredCatalog::Builtin(provider) => provider.catalog(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTrendFactor,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTrendFactor => {
                write!(f, "UW_TREND_FACTOR must be a finite number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("UW_CATALOG_PATH");
        env::remove_var("UW_TREND_FACTOR");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = EngineConfig::load().expect("config loads with defaults");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.trend_factor, DEFAULT_TREND_FACTOR);
        assert!(matches!(
            config.catalog_provider(),
            ConfiguredCatalog::Builtin(_)
        ));
    }

    #[test]
    fn load_rejects_malformed_trend_factor() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("UW_TREND_FACTOR", "five percent");
        let error = EngineConfig::load().expect_err("expected invalid trend factor");
        assert!(matches!(error, ConfigError::InvalidTrendFactor));
        reset_env();
    }

    #[test]
    fn configured_path_selects_file_provider() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("UW_CATALOG_PATH", "/tmp/catalog.json");
        let config = EngineConfig::load().expect("config loads");
        assert!(matches!(
            config.catalog_provider(),
            ConfiguredCatalog::File(_)
        ));
        reset_env();
    }
}
