use crate::application::input_collector::DEFAULT_MAX_ATTEMPTS;
use crate::application::series_validator::ValidationPolicy;
use crate::domain::error::ChartError;
use crate::domain::smoothing::DEFAULT_SMOOTH_POINTS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/app";
pub const ENV_PREFIX: &str = "READING_CHARTS";
pub const API_KEY_FALLBACK_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub input: InputConfig,
    pub validation: ValidationConfig,
    pub smoothing: SmoothingConfig,
    pub chart: ChartConfig,
    pub image: ImageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub max_attempts: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ValidationConfig {
    pub policy: ValidationPolicy,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SmoothingConfig {
    pub num_points: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImageConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub size: String,
    pub quality: String,
    pub response_format: String,
    pub count: u32,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            input: InputConfig::default(),
            validation: ValidationConfig::default(),
            smoothing: SmoothingConfig::default(),
            chart: ChartConfig::default(),
            image: ImageConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_SMOOTH_POINTS,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "dall-e-2".to_string(),
            size: "512x512".to_string(),
            quality: "standard".to_string(),
            response_format: "b64_json".to_string(),
            count: 1,
            timeout_secs: 30,
        }
    }
}

impl ImageConfig {
    /// The API key, which has no default and must come from the environment or a file.
    pub fn require_api_key(&self) -> Result<&str, ChartError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ChartError::Config(format!(
                    "no image API key; set {}__IMAGE__API_KEY or {}",
                    ENV_PREFIX, API_KEY_FALLBACK_VAR
                ))
            })
    }
}

/// Loads `config/app.{toml,...}` if present, then `READING_CHARTS__*` environment overrides.
pub fn load_app_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let file = path
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let settings = config::Config::builder()
        .add_source(config::File::with_name(&file).required(path.is_some()))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut app: AppConfig = settings.try_deserialize()?;
    if app.image.api_key.is_none() {
        app.image.api_key = std::env::var(API_KEY_FALLBACK_VAR).ok();
    }

    tracing::debug!(
        "Loaded configuration from {} (output_dir={}, policy={:?})",
        file,
        app.output_dir.display(),
        app.validation.policy
    );
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let app = from_toml("");
        assert_eq!(app.output_dir, PathBuf::from("charts"));
        assert_eq!(app.input.max_attempts, 3);
        assert_eq!(app.validation.policy, ValidationPolicy::All);
        assert_eq!(app.smoothing.num_points, 100);
        assert_eq!(app.image.model, "dall-e-2");
        assert_eq!(app.image.timeout_secs, 30);
        assert!(app.image.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let app = from_toml(
            r#"
            output_dir = "out"

            [validation]
            policy = "any"

            [image]
            size = "256x256"
            api_key = "sk-test"
            "#,
        );
        assert_eq!(app.output_dir, PathBuf::from("out"));
        assert_eq!(app.validation.policy, ValidationPolicy::Any);
        assert_eq!(app.image.size, "256x256");
        assert_eq!(app.image.quality, "standard");
        assert_eq!(app.image.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_missing_api_key() {
        let image = ImageConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(image.require_api_key(), Err(ChartError::Config(_))));
        assert!(ImageConfig::default().require_api_key().is_err());
    }
}
