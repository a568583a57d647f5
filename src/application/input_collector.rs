// Input collector - Token parsing and bounded reprompting
use crate::domain::error::ChartError;
use std::fmt::Display;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Line-oriented user input.
pub trait LineSource {
    /// Shows `prompt` and returns the next line, or `None` once input is closed.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;

    /// Shows a message (usually why the previous line was rejected).
    fn notify(&mut self, message: &str);
}

/// Parses whitespace-separated numbers; the first bad token fails the line.
pub fn parse_values(line: &str) -> Result<Vec<f64>, ChartError> {
    line.split_whitespace()
        .enumerate()
        .map(|(i, token)| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ChartError::InputParse {
                token: token.to_string(),
                position: i + 1,
            }),
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct InputCollector {
    max_attempts: u32,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl InputCollector {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Asks until `accept` takes a line or the attempts run out.
    pub fn prompt_until<T, E, F>(
        &self,
        source: &mut dyn LineSource,
        prompt: &str,
        mut accept: F,
    ) -> anyhow::Result<T>
    where
        E: Display,
        F: FnMut(&str) -> Result<T, E>,
    {
        for attempt in 1..=self.max_attempts {
            let Some(line) = source.read_line(prompt)? else {
                tracing::debug!("Input closed after {} attempt(s)", attempt - 1);
                return Err(ChartError::InputExhausted {
                    attempts: attempt - 1,
                }
                .into());
            };

            match accept(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!("Rejected input on attempt {}: {}", attempt, e);
                    let remaining = self.max_attempts - attempt;
                    if remaining > 0 {
                        source.notify(&format!("{} Please try again ({} left).", e, remaining));
                    } else {
                        source.notify(&e.to_string());
                    }
                }
            }
        }

        Err(ChartError::InputExhausted {
            attempts: self.max_attempts,
        }
        .into())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned lines and records everything shown to the user.
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        lines: VecDeque<String>,
        pub prompts: Vec<String>,
        pub notices: Vec<String>,
    }

    impl ScriptedSource {
        pub(crate) fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl LineSource for ScriptedSource {
        fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.lines.pop_front())
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("1 2.5  3\t4").unwrap(), vec![1.0, 2.5, 3.0, 4.0]);
        assert_eq!(parse_values("   ").unwrap(), Vec::<f64>::new());
        assert_eq!(parse_values("-3 0").unwrap(), vec![-3.0, 0.0]);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert_eq!(
            parse_values("1 2 three 4").unwrap_err(),
            ChartError::InputParse {
                token: "three".to_string(),
                position: 3
            }
        );
        assert!(parse_values("1 NaN").is_err());
        assert!(parse_values("inf 2").is_err());
    }

    #[test]
    fn test_prompt_until_retries_then_accepts() {
        let mut source = ScriptedSource::new(&["x", "1 2", "4"]);
        let collector = InputCollector::new(3);

        let value = collector
            .prompt_until(&mut source, "> ", |line| {
                let values = parse_values(line)?;
                if values.len() == 1 {
                    Ok(values[0])
                } else {
                    Err(ChartError::Shape {
                        expected: 1,
                        actual: values.len(),
                        what: "a single number",
                    })
                }
            })
            .unwrap();

        assert_eq!(value, 4.0);
        assert_eq!(source.prompts.len(), 3);
        assert_eq!(source.notices.len(), 2);
        assert!(source.notices[0].contains("2 left"));
    }

    #[test]
    fn test_prompt_until_is_bounded() {
        let mut source = ScriptedSource::new(&["a", "b", "c", "d"]);
        let collector = InputCollector::new(2);

        let err = collector
            .prompt_until(&mut source, "> ", parse_values)
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ChartError>(),
            Some(&ChartError::InputExhausted { attempts: 2 })
        );
        assert_eq!(source.prompts.len(), 2);
    }

    #[test]
    fn test_prompt_until_stops_at_end_of_input() {
        let mut source = ScriptedSource::new(&["bad"]);
        let err = InputCollector::new(5)
            .prompt_until(&mut source, "> ", parse_values)
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ChartError>(),
            Some(&ChartError::InputExhausted { attempts: 1 })
        );
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(InputCollector::new(0).max_attempts(), 1);
    }
}
