// Error taxonomy shared by the chart and image pipelines
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("'{token}' (value #{position}) is not a number")]
    InputParse { token: String, position: usize },

    #[error("expected {expected} values ({what}), got {actual}")]
    Shape {
        expected: usize,
        actual: usize,
        what: &'static str,
    },

    #[error("value #{position} ({value}) must be {requirement}")]
    Range {
        position: usize,
        value: f64,
        requirement: String,
    },

    #[error("cubic interpolation needs at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("cannot smooth series: {0}")]
    InvalidSmoothing(String),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("image service failed: {0}")]
    ExternalService(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("no valid input after {attempts} attempt(s)")]
    InputExhausted { attempts: u32 },
}

impl ChartError {
    /// Errors the user can fix by typing the line again.
    pub fn is_retryable_input(&self) -> bool {
        matches!(
            self,
            ChartError::InputParse { .. } | ChartError::Shape { .. } | ChartError::Range { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_input_errors() {
        let parse = ChartError::InputParse {
            token: "abc".to_string(),
            position: 2,
        };
        assert!(parse.is_retryable_input());
        assert_eq!(parse.to_string(), "'abc' (value #2) is not a number");

        let data = ChartError::InsufficientData {
            required: 4,
            actual: 3,
        };
        assert!(!data.is_retryable_input());
        assert!(!ChartError::ExternalService("timeout".to_string()).is_retryable_input());
    }
}
