// Command-line interface
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "reading-charts",
    version,
    about = "Chart your reading log and illustrate passages"
)]
pub struct Cli {
    /// Configuration file (without extension is fine); defaults to config/app
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for rendered charts and generated images
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Line chart of books read per month, January to December
    Books {
        /// Twelve whitespace-separated counts; prompts when omitted
        #[arg(long, allow_hyphen_values = true)]
        values: Option<String>,
    },
    /// Bar chart of hours read per day, Monday to Sunday
    Hours {
        /// Seven whitespace-separated hour values; prompts when omitted
        #[arg(long, allow_hyphen_values = true)]
        values: Option<String>,
    },
    /// Generate an image illustrating a passage of text
    Image,
}
