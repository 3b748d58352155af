//! Line input from stdin.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next line, without its newline. `None` at end of input.
    ///
    /// Cancel safe, so it can sit in a `select!` next to the game clock.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    /// Print `label` and read the answer.
    pub async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}: ");
        std::io::stdout().flush()?;
        let line = self.next_line().await?;
        if line.is_none() {
            println!();
        }
        Ok(line)
    }
}
