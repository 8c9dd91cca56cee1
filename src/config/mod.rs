//! Configuration loading and management for the Parafiscal Calculation Engine.
//!
//! Statutory rates change with regulation, so none of them are hardcoded:
//! this module loads a versioned rule set from YAML files (contribution
//! rates, the risk-class table, the bonus ceiling, the commission schedules
//! and the consumption tax) and validates it once at load time.
//!
//! # Example
//!
//! ```no_run
//! use parafiscal_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/co_2025").unwrap();
//! println!("Loaded rule set: {}", config.ruleset().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionRates, ContributionsConfig, EngineConfig, FeeBracket, FeeSchedule, FeesConfig,
    FlatRateSchedule, ProgressiveSchedule, RiskClassRates, RulesetMetadata,
};
