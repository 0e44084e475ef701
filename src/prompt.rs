use crossterm::style::{self, Color, Stylize};
use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// A line-oriented question/answer channel with the user
pub trait Prompt {
    /// Ask a question and return the trimmed answer.
    ///
    /// Returns [`Error::Aborted`] when the input stream is closed.
    fn ask(&mut self, message: &str) -> Result<String>;
}

/// Prompts on the controlling terminal via stdin/stdout
pub struct TerminalPrompt<R> {
    input: R,
}

impl TerminalPrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> Prompt for TerminalPrompt<R> {
    fn ask(&mut self, message: &str) -> Result<String> {
        let mut stdout = io::stdout();
        print!("{}", style::style(message).with(Color::Yellow));
        stdout.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            println!();
            return Err(Error::Aborted);
        }

        Ok(answer.trim().to_string())
    }
}
