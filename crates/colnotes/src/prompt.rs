use crate::prelude::*;
use std::io::{BufRead, Write};

/// Line-based prompt over any reader and writer
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and read one line of input, without the line ending
    ///
    /// Closed input is reported as a user abort.
    pub fn ask(&mut self, message: &str) -> Result<String, Error> {
        write!(self.output, "{message} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::UserAbort("No input received. Aborting.".to_string()));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask a yes/no question that defaults to yes
    pub fn confirm(&mut self, message: &str) -> Result<bool, Error> {
        let answer = self.ask(&f!("{message} (Y/n)"))?;
        Ok(!is_decline(&answer))
    }
}

/// Whether an answer declines a confirmation. Anything else accepts.
pub fn is_decline(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "n" | "no")
}
