//! Interactive prompts for `login`

use std::io::{self, BufRead, Write};

/// Source of answers for the login questions.
pub trait Prompter {
    /// Ask a question with the answer echoed back
    fn prompt(&mut self, label: &str) -> io::Result<String>;

    /// Ask a question without echoing the answer
    fn prompt_secret(&mut self, label: &str) -> io::Result<String>;
}

/// Prompts on the controlling terminal; answers are trimmed.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{label}")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before an answer was given",
            ));
        }

        Ok(line.trim().to_string())
    }

    fn prompt_secret(&mut self, label: &str) -> io::Result<String> {
        let answer = rpassword::prompt_password(label)?;
        Ok(answer.trim().to_string())
    }
}
