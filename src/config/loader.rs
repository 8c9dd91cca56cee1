//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! contribution rule sets from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{FeeScheduleKind, RiskClass};

use super::types::{
    ContributionRates, ContributionsConfig, EngineConfig, FeeSchedule, FeesConfig,
    RulesetMetadata,
};

/// Loads and provides access to a rule set.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them, and provides methods to query rates, the bonus ceiling
/// and the fee schedules.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/co_2025/
/// ├── ruleset.yaml        # Rule set metadata
/// ├── contributions.yaml  # Contribution rates, risk-class table, bonus ceiling
/// └── fees.yaml           # Commission schedules and consumption tax
/// ```
///
/// # Example
///
/// ```no_run
/// use parafiscal_engine::config::ConfigLoader;
/// use parafiscal_engine::models::RiskClass;
///
/// let loader = ConfigLoader::load("./config/co_2025").unwrap();
/// println!("Loaded rule set: {}", loader.ruleset().name);
/// println!("ARL class III: {}", loader.work_injury_rate(RiskClass::Class3));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/co_2025")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or a malformed fee table
    /// - Any rate lies outside `[0, 1)` or the ceiling is negative
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RulesetMetadata>(&path.join("ruleset.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;
        let fees = Self::load_yaml::<FeesConfig>(&path.join("fees.yaml"))?;

        let config = EngineConfig::new(metadata, contributions, fees)?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the rule set metadata.
    pub fn ruleset(&self) -> &RulesetMetadata {
        self.config.ruleset()
    }

    /// Returns the contribution rates.
    pub fn contribution_rates(&self) -> &ContributionRates {
        self.config.contribution_rates()
    }

    /// Gets the work-injury insurance rate for a risk class.
    pub fn work_injury_rate(&self, risk_class: RiskClass) -> Decimal {
        self.config.contribution_rates().work_injury.rate(risk_class)
    }

    /// Returns the statutory per-employee bonus ceiling.
    pub fn bonus_ceiling(&self) -> Decimal {
        self.config.bonus_ceiling()
    }

    /// Returns the fee schedule for a kind of bonus.
    pub fn fee_schedule(&self, kind: FeeScheduleKind) -> &FeeSchedule {
        self.config.fee_schedule(kind)
    }
}
