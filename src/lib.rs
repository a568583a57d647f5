// Reading charts - Layered library behind the books, hours and image commands
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
