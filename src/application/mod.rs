// Application layer - Use cases and the seams they depend on
pub mod chart_service;
pub mod image_service;
pub mod input_collector;
pub mod series_validator;
