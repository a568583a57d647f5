// Interactive stdin/stdout prompt
use crate::application::input_collector::LineSource;
use anyhow::Context;
use std::io::{self, BufRead, Write};

#[derive(Debug, Default)]
pub struct StdinConsole;

impl LineSource for StdinConsole {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", prompt).context("Failed to write prompt")?;
        stdout.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}
