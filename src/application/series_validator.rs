// Series validator - Length and per-element checks for collected input
use crate::domain::error::ChartError;
use crate::domain::series::{Calendar, ElementConstraint, Series, SeriesKind};
use serde::Deserialize;

/// How many elements must satisfy the per-element constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Every element must satisfy the constraint.
    #[default]
    All,
    /// At least one element must satisfy the constraint (legacy behaviour).
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub message: Option<String>,
}

impl ValidationOutcome {
    fn from_result(result: Result<(), ChartError>) -> Self {
        match result {
            Ok(()) => Self {
                passed: true,
                message: None,
            },
            Err(e) => Self {
                passed: false,
                message: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesValidator {
    policy: ValidationPolicy,
}

impl SeriesValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Pass/fail plus a diagnostic; never returns an error.
    pub fn validate(
        &self,
        series: &[f64],
        expected_len: usize,
        constraint: ElementConstraint,
    ) -> ValidationOutcome {
        ValidationOutcome::from_result(self.check(series, expected_len, constraint, "values"))
    }

    pub fn validate_monthly(&self, series: &[f64]) -> ValidationOutcome {
        ValidationOutcome::from_result(self.check_kind(series, SeriesKind::Monthly))
    }

    pub fn validate_weekly(&self, series: &[f64]) -> ValidationOutcome {
        ValidationOutcome::from_result(self.check_kind(series, SeriesKind::Weekly))
    }

    /// Validates and wraps the values in the typed series for `C`.
    pub fn validate_series<C: Calendar>(&self, values: Vec<f64>) -> Result<Series<C>, ChartError> {
        self.check_kind(&values, C::KIND)?;
        Ok(Series::from_validated(values))
    }

    fn check_kind(&self, series: &[f64], kind: SeriesKind) -> Result<(), ChartError> {
        self.check(
            series,
            kind.expected_len(),
            kind.constraint(),
            kind.shape_description(),
        )
    }

    pub fn check(
        &self,
        series: &[f64],
        expected_len: usize,
        constraint: ElementConstraint,
        what: &'static str,
    ) -> Result<(), ChartError> {
        if series.len() != expected_len {
            tracing::warn!(
                "The data list should have {} elements, {}; got {}",
                expected_len,
                what,
                series.len()
            );
            return Err(ChartError::Shape {
                expected: expected_len,
                actual: series.len(),
                what,
            });
        }

        match self.policy {
            ValidationPolicy::All => {
                if let Some((i, value)) = series
                    .iter()
                    .enumerate()
                    .find(|(_, v)| !constraint.accepts(**v))
                {
                    tracing::warn!("Value #{} ({}) violates {:?}", i + 1, value, constraint);
                    return Err(ChartError::Range {
                        position: i + 1,
                        value: *value,
                        requirement: constraint.describe(),
                    });
                }
            }
            ValidationPolicy::Any => {
                if !series.is_empty() && !series.iter().any(|v| constraint.accepts(*v)) {
                    tracing::warn!("No value satisfies {:?}", constraint);
                    return Err(ChartError::Range {
                        position: 1,
                        value: series[0],
                        requirement: format!("{} (no value qualified)", constraint.describe()),
                    });
                }
            }
        }

        tracing::debug!("Validated {} values under {:?} policy", series.len(), self.policy);
        Ok(())
    }
}
