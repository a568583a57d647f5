// Presentation layer - CLI parsing, console I/O and command handlers
pub mod app_state;
pub mod cli;
pub mod console;
pub mod handlers;
