use crate::error::ValidationError;

use super::quiz::{DEFAULT_AGE, MAX_AGE, MIN_AGE, MONTHLY_INVESTMENT_MAX, QuizOutcome};
use super::types::{DiagnosisInput, SimulationParams};

const GROUP_SEPARATORS: [char; 3] = [',', '，', '_'];

/// Parses a user-typed amount, tolerating thousands separators ("1,500,000").
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    const FIELD: &str = "value";
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }
    let digits: String = trimmed
        .chars()
        .filter(|c| !GROUP_SEPARATORS.contains(c))
        .collect();
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotANumber { field: FIELD }),
    }
}

fn parse_non_negative(raw: &str, field: &'static str) -> Result<f64, ValidationError> {
    let value = parse_amount(raw).map_err(|e| e.for_field(field))?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

fn parse_whole_in_range(
    raw: &str,
    field: &'static str,
    min: u32,
    max: u32,
) -> Result<u32, ValidationError> {
    let value = parse_amount(raw).map_err(|e| e.for_field(field))?;
    if value.fract() != 0.0 || value < f64::from(min) || value > f64::from(max) {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(value as u32)
}

/// Raw text fields of the diagnosis screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosisForm {
    pub bank_balance: String,
    pub monthly_surplus: String,
}

impl DiagnosisForm {
    pub fn new(bank_balance: impl Into<String>, monthly_surplus: impl Into<String>) -> Self {
        Self {
            bank_balance: bank_balance.into(),
            monthly_surplus: monthly_surplus.into(),
        }
    }

    pub fn validate(&self) -> Result<DiagnosisInput, ValidationError> {
        Ok(DiagnosisInput {
            bank_balance: parse_non_negative(&self.bank_balance, "bank balance")?,
            monthly_surplus: parse_non_negative(&self.monthly_surplus, "monthly surplus")?,
        })
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Raw text fields of the simulation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterForm {
    pub age: String,
    pub monthly_investment: String,
    pub risk_tolerance: String,
    pub initial_assets: String,
}

impl Default for ParameterForm {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE.to_string(),
            monthly_investment: "50,000".to_string(),
            risk_tolerance: String::new(),
            initial_assets: "0".to_string(),
        }
    }
}

impl ParameterForm {
    pub fn apply_quiz(&mut self, outcome: QuizOutcome) {
        self.age = outcome.age.to_string();
        self.monthly_investment = outcome.monthly_investment.to_string();
        self.risk_tolerance = outcome.risk_tolerance.to_string();
    }

    /// Age and monthly investment checked against the quiz's first step, whose
    /// slider stops at `MONTHLY_INVESTMENT_MAX`.
    pub fn quiz_basic_info(&self) -> Result<(u32, f64), ValidationError> {
        let age = parse_whole_in_range(&self.age, "age", MIN_AGE, MAX_AGE)?;
        let monthly_investment =
            parse_non_negative(&self.monthly_investment, "monthly investment")?;
        if monthly_investment > MONTHLY_INVESTMENT_MAX {
            return Err(ValidationError::AboveMax {
                field: "monthly investment",
                max: MONTHLY_INVESTMENT_MAX as u32,
            });
        }
        Ok((age, monthly_investment))
    }

    pub fn validate(&self) -> Result<SimulationParams, ValidationError> {
        let initial_assets = if self.initial_assets.trim().is_empty() {
            0.0
        } else {
            parse_non_negative(&self.initial_assets, "initial assets")?
        };
        Ok(SimulationParams {
            age: parse_whole_in_range(&self.age, "age", MIN_AGE, MAX_AGE)?,
            monthly_investment: parse_non_negative(
                &self.monthly_investment,
                "monthly investment",
            )?,
            risk_tolerance: parse_whole_in_range(&self.risk_tolerance, "risk tolerance", 0, 100)?,
            initial_assets,
        })
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }
}
