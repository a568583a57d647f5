// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod image_file_sink;
pub mod openai_client;
pub mod plotters_renderer;
