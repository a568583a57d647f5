// Image service - Use case for turning selected text into a generated image
use crate::application::input_collector::{InputCollector, LineSource};
use crate::domain::error::ChartError;
use crate::domain::image::{GeneratedImage, ImageRequest};
use crate::domain::prompt::{
    compose_prompt, menu_text, MenuChoice, SelectedText, UserPrompt, MAX_CUSTOM_PROMPT_CHARS,
    MAX_SELECTED_TEXT_CHARS,
};
use crate::infrastructure::config::ImageConfig;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Hosted text-to-image model.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns the base64 payload of the first generated image.
    async fn generate(&self, request: &ImageRequest) -> anyhow::Result<String>;
}

/// Where decoded images are shown or stored.
pub trait ImageSink: Send + Sync {
    fn save(&self, image: &GeneratedImage) -> anyhow::Result<PathBuf>;
}

#[derive(Clone)]
pub struct ImageService {
    generator: Arc<dyn ImageGenerator>,
    sink: Arc<dyn ImageSink>,
    collector: InputCollector,
    settings: ImageConfig,
}

impl ImageService {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        sink: Arc<dyn ImageSink>,
        collector: InputCollector,
        settings: ImageConfig,
    ) -> Self {
        Self {
            generator,
            sink,
            collector,
            settings,
        }
    }

    pub fn collect_selected_text(&self, source: &mut dyn LineSource) -> anyhow::Result<SelectedText> {
        let prompt = format!(
            "Paste your selected text here (at most {} characters):\n",
            MAX_SELECTED_TEXT_CHARS
        );
        self.collector.prompt_until(source, &prompt, SelectedText::parse)
    }

    pub fn collect_user_prompt(&self, source: &mut dyn LineSource) -> anyhow::Result<UserPrompt> {
        let menu = menu_text();
        let choice = self.collector.prompt_until(source, &menu, |line| {
            MenuChoice::parse(line).ok_or("Invalid input for prompt selection.")
        })?;

        match choice {
            MenuChoice::Preset(index) => UserPrompt::preset(index)
                .ok_or_else(|| anyhow::anyhow!("no preset prompt #{}", index + 1)),
            MenuChoice::Custom => {
                let prompt = format!("Your prompt within {} characters:\n", MAX_CUSTOM_PROMPT_CHARS);
                self.collector.prompt_until(source, &prompt, UserPrompt::custom)
            }
        }
    }

    pub fn build_request(&self, prompt: String) -> ImageRequest {
        ImageRequest {
            model: self.settings.model.clone(),
            prompt,
            size: self.settings.size.clone(),
            quality: self.settings.quality.clone(),
            response_format: self.settings.response_format.clone(),
            count: self.settings.count,
        }
    }

    /// One request, no retries; failures surface as `ExternalService`.
    pub async fn generate(&self, prompt: String) -> Result<GeneratedImage, ChartError> {
        let request = self.build_request(prompt);
        tracing::debug!(
            "Requesting {} image from {} ({} prompt chars)",
            request.size,
            request.model,
            request.prompt.chars().count()
        );

        let payload = self.generator.generate(&request).await.map_err(|e| {
            tracing::error!("Image generation failed: {:#}", e);
            ChartError::ExternalService(format!("{:#}", e))
        })?;

        GeneratedImage::from_base64(&payload)
    }

    pub async fn run(&self, source: &mut dyn LineSource) -> anyhow::Result<PathBuf> {
        let text = self.collect_selected_text(source)?;
        let user_prompt = self.collect_user_prompt(source)?;
        let prompt = compose_prompt(&user_prompt, &text);

        let image = self.generate(prompt).await?;
        let path = self.sink.save(&image)?;
        tracing::info!("Image written to {}", path.display());
        Ok(path)
    }
}
