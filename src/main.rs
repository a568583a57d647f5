// Main entry point - Configuration, dependency injection and command dispatch
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use reading_charts::application::chart_service::ChartService;
use reading_charts::application::input_collector::InputCollector;
use reading_charts::application::series_validator::SeriesValidator;
use reading_charts::infrastructure::config::load_app_config;
use reading_charts::infrastructure::plotters_renderer::PlottersRenderer;
use reading_charts::presentation::app_state::AppState;
use reading_charts::presentation::cli::{Cli, Command};
use reading_charts::presentation::console::StdinConsole;
use reading_charts::presentation::handlers::{generate_image, plot_books, plot_hours};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reading_charts=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = load_app_config(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    // Create renderer (infrastructure layer)
    let renderer = Arc::new(PlottersRenderer::new(
        config.output_dir.clone(),
        config.chart.width,
        config.chart.height,
    ));

    // Create services (application layer)
    let collector = InputCollector::new(config.input.max_attempts);
    let chart_service = ChartService::new(
        renderer,
        SeriesValidator::new(config.validation.policy),
        collector,
        config.smoothing.num_points,
    );

    let state = AppState {
        config,
        collector,
        chart_service,
    };

    let mut console = StdinConsole;
    let result = match &cli.command {
        Command::Books { values } => plot_books(&state, values.as_deref(), &mut console),
        Command::Hours { values } => plot_hours(&state, values.as_deref(), &mut console),
        Command::Image => generate_image(&state, &mut console).await,
    };

    match result {
        Ok(path) => {
            println!("Saved to {}", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
