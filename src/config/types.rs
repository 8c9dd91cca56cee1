//! Configuration types for payroll contribution rule sets.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Lookup tables are
//! validated once, when they are built, so a malformed rule set fails at
//! startup rather than in the middle of a calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{FeeScheduleKind, RiskClass};

/// Metadata about the rule set.
///
/// Identifies the jurisdiction and the regulatory version the rates belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesetMetadata {
    /// Short code for the rule set (e.g., "CO-2025").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version of the rule set.
    pub version: String,
    /// The date from which these rates apply.
    pub effective_date: NaiveDate,
    /// URL to the regulation the rates come from.
    pub source_url: String,
}

/// Work-injury insurance rate for each of the five risk classes.
///
/// Having one field per class guarantees every class maps to exactly one rate.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskClassRates {
    /// Rate for risk class I.
    #[serde(rename = "I")]
    pub class_1: Decimal,
    /// Rate for risk class II.
    #[serde(rename = "II")]
    pub class_2: Decimal,
    /// Rate for risk class III.
    #[serde(rename = "III")]
    pub class_3: Decimal,
    /// Rate for risk class IV.
    #[serde(rename = "IV")]
    pub class_4: Decimal,
    /// Rate for risk class V.
    #[serde(rename = "V")]
    pub class_5: Decimal,
}

impl RiskClassRates {
    /// Returns the rate for a risk class.
    pub fn rate(&self, risk_class: RiskClass) -> Decimal {
        match risk_class {
            RiskClass::Class1 => self.class_1,
            RiskClass::Class2 => self.class_2,
            RiskClass::Class3 => self.class_3,
            RiskClass::Class4 => self.class_4,
            RiskClass::Class5 => self.class_5,
        }
    }
}

/// Employer contribution rates, as fractions of the salary base.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRates {
    /// Health insurance rate.
    pub health: Decimal,
    /// Pension rate.
    pub pension: Decimal,
    /// Training levy rate.
    pub training_levy: Decimal,
    /// Family-welfare levy rate.
    pub family_welfare: Decimal,
    /// Compensation-fund levy rate.
    pub compensation_fund: Decimal,
    /// Work-injury insurance rate by risk class.
    pub work_injury: RiskClassRates,
}

impl ContributionRates {
    /// Checks that every rate lies in `[0, 1)`.
    pub fn validate(&self) -> EngineResult<()> {
        check_rate("health", self.health)?;
        check_rate("pension", self.pension)?;
        check_rate("training_levy", self.training_levy)?;
        check_rate("family_welfare", self.family_welfare)?;
        check_rate("compensation_fund", self.compensation_fund)?;
        for class in RiskClass::ALL {
            check_rate(
                &format!("work_injury.{}", class.label()),
                self.work_injury.rate(class),
            )?;
        }
        Ok(())
    }
}

/// Contributions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// Contribution rates.
    pub contributions: ContributionRates,
    /// Statutory maximum exempt bonus per employee per month.
    pub bonus_ceiling: Decimal,
}

/// One row of a progressive fee table: pools in `[min, max)` pay `rate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeeBracket {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Exclusive upper bound; `None` means unbounded.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Rate applied to the entire pool.
    pub rate: Decimal,
    /// Optional display label for the tier.
    #[serde(default)]
    pub label: Option<String>,
}

impl FeeBracket {
    /// Returns true if `pool` falls inside `[min, max)`.
    pub fn contains(&self, pool: Decimal) -> bool {
        pool >= self.min && self.max.is_none_or(|max| pool < max)
    }
}

/// A validated progressive fee table.
///
/// Brackets start at zero, follow each other without gaps or overlaps and
/// end with an unbounded bracket, so every non-negative pool matches exactly
/// one of them.
///
/// Each bracket covers the half-open range `[min, max)`, so a pool exactly on
/// a boundary falls in the upper bracket: on a table split at 10,000,000 a
/// pool of 10,000,000 pays the upper rate.
///
/// # Example
///
/// ```
/// use parafiscal_engine::config::{FeeBracket, ProgressiveSchedule};
/// use rust_decimal::Decimal;
///
/// let schedule = ProgressiveSchedule::new(vec![
///     FeeBracket { min: Decimal::ZERO, max: Some(Decimal::from(100)), rate: Decimal::new(4, 2), label: None },
///     FeeBracket { min: Decimal::from(100), max: None, rate: Decimal::new(3, 2), label: None },
/// ]).unwrap();
/// assert_eq!(schedule.bracket_for(Decimal::from(100)).unwrap().rate, Decimal::new(3, 2));
///
/// let gap = ProgressiveSchedule::new(vec![
///     FeeBracket { min: Decimal::ZERO, max: Some(Decimal::from(100)), rate: Decimal::new(4, 2), label: None },
///     FeeBracket { min: Decimal::from(150), max: None, rate: Decimal::new(3, 2), label: None },
/// ]);
/// assert!(gap.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<FeeBracket>")]
pub struct ProgressiveSchedule {
    brackets: Vec<FeeBracket>,
}

impl ProgressiveSchedule {
    /// Builds a schedule, rejecting gaps, overlaps, bad rates and a bounded tail.
    pub fn new(brackets: Vec<FeeBracket>) -> EngineResult<Self> {
        let Some(first) = brackets.first() else {
            return Err(invalid_config("fee schedule has no brackets"));
        };
        if first.min != Decimal::ZERO {
            return Err(invalid_config(format!(
                "first fee bracket must start at 0, starts at {}",
                first.min
            )));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            check_rate(&format!("fee bracket {} rate", index + 1), bracket.rate)?;

            let is_last = index + 1 == brackets.len();
            match (bracket.max, is_last) {
                (None, true) => {}
                (None, false) => {
                    return Err(invalid_config(format!(
                        "fee bracket {} is unbounded but is not the last bracket",
                        index + 1
                    )));
                }
                (Some(max), true) => {
                    return Err(invalid_config(format!(
                        "last fee bracket must be unbounded, ends at {}",
                        max
                    )));
                }
                (Some(max), false) => {
                    if max <= bracket.min {
                        return Err(invalid_config(format!(
                            "fee bracket {} is empty: [{}, {})",
                            index + 1,
                            bracket.min,
                            max
                        )));
                    }
                    let next_min = brackets[index + 1].min;
                    if next_min != max {
                        return Err(invalid_config(format!(
                            "fee bracket {} starts at {}, expected {}",
                            index + 2,
                            next_min,
                            max
                        )));
                    }
                }
            }
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets, lowest first.
    pub fn brackets(&self) -> &[FeeBracket] {
        &self.brackets
    }

    /// Finds the bracket covering `pool`.
    ///
    /// Only a negative pool can miss; a validated table covers `[0, ∞)`.
    pub fn bracket_for(&self, pool: Decimal) -> EngineResult<&FeeBracket> {
        self.brackets
            .iter()
            .find(|b| b.contains(pool))
            .ok_or(EngineError::NoMatchingBracket { pool })
    }

    /// Returns true if no bracket has a lower rate than the one before it.
    ///
    /// Only such tables guarantee that a larger pool never resolves to a
    /// lower rate; volume-discount tables deliberately do the opposite.
    pub fn is_rate_non_decreasing(&self) -> bool {
        self.brackets.windows(2).all(|w| w[0].rate <= w[1].rate)
    }
}

impl TryFrom<Vec<FeeBracket>> for ProgressiveSchedule {
    type Error = EngineError;

    fn try_from(brackets: Vec<FeeBracket>) -> EngineResult<Self> {
        Self::new(brackets)
    }
}

/// A single rate applied to any pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlatRateSchedule {
    /// Rate applied to the entire pool.
    pub rate: Decimal,
    /// Optional display label.
    #[serde(default)]
    pub label: Option<String>,
}

/// A commission schedule, either bracketed or flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeSchedule {
    /// One rate per pool-size bracket.
    Progressive(ProgressiveSchedule),
    /// One rate for every pool.
    Flat(FlatRateSchedule),
}

/// Fees configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct FeesConfig {
    /// Consumption tax charged on the commission (e.g. 0.19).
    pub consumption_tax_rate: Decimal,
    /// Progressive table for discretionary bonuses.
    pub discretionary_bonus: ProgressiveSchedule,
    /// Flat rate for meal-subsidy bonuses.
    pub meal_subsidy: FlatRateSchedule,
}

/// The complete rule set used by every calculation.
///
/// Built from YAML by [`ConfigLoader`](super::ConfigLoader) or directly
/// with [`EngineConfig::new`]; both paths validate.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: RulesetMetadata,
    contribution_rates: ContributionRates,
    bonus_ceiling: Decimal,
    discretionary_bonus: FeeSchedule,
    meal_subsidy: FeeSchedule,
    consumption_tax_rate: Decimal,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: RulesetMetadata,
        contributions: ContributionsConfig,
        fees: FeesConfig,
    ) -> EngineResult<Self> {
        contributions.contributions.validate()?;

        if contributions.bonus_ceiling < Decimal::ZERO {
            return Err(invalid_config(format!(
                "bonus_ceiling must not be negative, got {}",
                contributions.bonus_ceiling
            )));
        }
        check_rate("meal_subsidy rate", fees.meal_subsidy.rate)?;
        check_rate("consumption_tax_rate", fees.consumption_tax_rate)?;

        Ok(Self {
            metadata,
            contribution_rates: contributions.contributions,
            bonus_ceiling: contributions.bonus_ceiling,
            discretionary_bonus: FeeSchedule::Progressive(fees.discretionary_bonus),
            meal_subsidy: FeeSchedule::Flat(fees.meal_subsidy),
            consumption_tax_rate: fees.consumption_tax_rate,
        })
    }

    /// Returns the rule set metadata.
    pub fn ruleset(&self) -> &RulesetMetadata {
        &self.metadata
    }

    /// Returns the contribution rates.
    pub fn contribution_rates(&self) -> &ContributionRates {
        &self.contribution_rates
    }

    /// Returns the statutory per-employee bonus ceiling.
    pub fn bonus_ceiling(&self) -> Decimal {
        self.bonus_ceiling
    }

    /// Returns the schedule that prices the given kind of bonus.
    pub fn fee_schedule(&self, kind: FeeScheduleKind) -> &FeeSchedule {
        match kind {
            FeeScheduleKind::DiscretionaryBonus => &self.discretionary_bonus,
            FeeScheduleKind::MealSubsidy => &self.meal_subsidy,
        }
    }

    /// Returns the consumption tax rate charged on commissions.
    pub fn consumption_tax_rate(&self) -> Decimal {
        self.consumption_tax_rate
    }
}

fn check_rate(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(invalid_config(format!(
            "{} must be in [0, 1), got {}",
            name, rate
        )));
    }
    Ok(())
}

fn invalid_config(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}
