//! Yes/no prompts on stdin.

use std::io::{self, BufRead, Write};

use aria_core::{Prompter, Result};

/// Asks questions on stdout and reads answers from stdin.
///
/// Anything other than `y`/`yes` counts as no, including end of input.
pub struct StdinPrompter<R> {
    input: R,
}

impl StdinPrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> StdinPrompter<R> {
    #[cfg(test)]
    fn from_reader(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompter for StdinPrompter<R> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let mut out = io::stdout();
        write!(out, "{question} [y/N]: ")?;
        out.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
