// Command handlers
use crate::application::chart_service::Chartable;
use crate::application::image_service::ImageService;
use crate::application::input_collector::LineSource;
use crate::domain::series::{Monthly, Weekly};
use crate::infrastructure::image_file_sink::FileImageSink;
use crate::infrastructure::openai_client::OpenAiImageClient;
use crate::presentation::app_state::AppState;
use std::path::PathBuf;
use std::sync::Arc;

/// Charts `values` when given, otherwise prompts on `source`.
fn plot<C: Chartable>(
    state: &AppState,
    values: Option<&str>,
    source: &mut dyn LineSource,
) -> anyhow::Result<PathBuf> {
    match values {
        Some(line) => state.chart_service.run_line::<C>(line),
        None => state.chart_service.run::<C>(source),
    }
}

pub fn plot_books(
    state: &AppState,
    values: Option<&str>,
    source: &mut dyn LineSource,
) -> anyhow::Result<PathBuf> {
    plot::<Monthly>(state, values, source)
}

pub fn plot_hours(
    state: &AppState,
    values: Option<&str>,
    source: &mut dyn LineSource,
) -> anyhow::Result<PathBuf> {
    plot::<Weekly>(state, values, source)
}

/// Wires the hosted image API; fails before prompting when no API key is configured.
pub async fn generate_image(state: &AppState, source: &mut dyn LineSource) -> anyhow::Result<PathBuf> {
    let image_config = state.config.image.clone();
    let generator = Arc::new(OpenAiImageClient::new(&image_config)?);
    let sink = Arc::new(FileImageSink::new(&state.config.output_dir));

    let service = ImageService::new(generator, sink, state.collector, image_config);
    service.run(source).await
}
