// Domain layer - Pure types and algorithms
pub mod chart;
pub mod error;
pub mod image;
pub mod prompt;
pub mod scale;
pub mod series;
pub mod smoothing;
