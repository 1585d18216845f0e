/// External command runner: one blocking invocation in, exit code + captured output out.
///
/// Commands talk to `ansible-vault` and `ansible` only through [`CommandRunner`],
/// so they can be driven by a scripted fake in tests.
use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};

use log::debug;

use super::errors::SysError;

/// A single external program call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Program name (looked up on `PATH`) or path.
    pub program: String,
    /// Arguments, passed as-is (no shell). Paths keep their exact bytes.
    pub args: Vec<OsString>,
    /// Extra environment for the child only; the parent environment is inherited.
    pub env: Vec<(String, String)>,
    /// Text written to the child's stdin, which is then closed.
    pub stdin: Option<String>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Render as a shell-like line for log output. Never includes stdin.
    #[must_use]
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push_str(&format!("'{arg}'"));
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an [`Invocation`] to completion.
pub trait CommandRunner {
    /// Run the invocation and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns `SysError` if the program cannot be spawned or its pipes fail.
    /// A non-zero exit is *not* an error at this layer.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, SysError>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, SysError> {
        debug!("running: {}", invocation.display());

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::inherit()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| SysError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        if let Some(input) = &invocation.stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input.as_bytes())?;
                // Dropping the handle closes stdin so the child sees EOF.
            }
        }

        let output = child.wait_with_output()?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            "{} exited with {:?} ({} bytes stdout, {} bytes stderr)",
            invocation.program,
            result.code,
            result.stdout.len(),
            result.stderr.len()
        );
        Ok(result)
    }
}
