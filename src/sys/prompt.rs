/// Interactive prompts: free-text answers, hidden answers, yes/no confirmation.
use std::io::{self, BufRead, IsTerminal, Write};

use log::warn;

use super::errors::SysError;

/// Capability to ask the operator something.
pub trait Prompter {
    /// Ask for a line of text. The trailing newline is stripped.
    ///
    /// # Errors
    ///
    /// Returns `SysError` if no answer can be read.
    fn ask(&mut self, question: &str) -> Result<String, SysError>;

    /// Ask for a line of text without echoing it.
    ///
    /// # Errors
    ///
    /// Returns `SysError` if no answer can be read.
    fn ask_secret(&mut self, question: &str) -> Result<String, SysError>;

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    ///
    /// # Errors
    ///
    /// Returns `SysError` if the terminal cannot be read or written.
    fn confirm(&mut self, question: &str) -> Result<bool, SysError>;
}

/// Prompter bound to the process stdin, with questions on stderr.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn ensure_interactive() -> Result<(), SysError> {
        if io::stdin().is_terminal() {
            Ok(())
        } else {
            Err(SysError::NotInteractive)
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String, SysError> {
        Self::ensure_interactive()?;
        let stdin = io::stdin();
        let mut stderr = io::stderr();
        read_answer(&mut stdin.lock(), &mut stderr, question)?.ok_or(SysError::NotInteractive)
    }

    fn ask_secret(&mut self, question: &str) -> Result<String, SysError> {
        Self::ensure_interactive()?;
        Ok(rpassword::prompt_password(question)?)
    }

    fn confirm(&mut self, question: &str) -> Result<bool, SysError> {
        if !io::stdin().is_terminal() {
            warn!("stdin is not a terminal; treating '{question}' as declined");
            return Ok(false);
        }
        let stdin = io::stdin();
        let mut stderr = io::stderr();
        confirm_with(&mut stdin.lock(), &mut stderr, question)
    }
}

/// Write `question`, read one line. `None` on EOF.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<Option<String>, SysError> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// Yes/no loop shared by the terminal prompter and tests.
///
/// Empty answer and EOF mean no. Unrecognised answers re-ask.
fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool, SysError> {
    let full = format!("{question} [y/N] ");
    loop {
        let Some(answer) = read_answer(input, output, &full)? else {
            writeln!(output)?;
            return Ok(false);
        };
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer 'y' or 'n'.")?,
        }
    }
}
