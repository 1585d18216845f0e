/// Errors from the process and terminal layer.
use std::io;

use thiserror::Error;

/// Typed errors from spawning collaborator tools or talking to the terminal.
#[derive(Debug, Error)]
pub enum SysError {
    /// The external program could not be started (not installed, not executable).
    #[error("Could not run '{program}': {source}")]
    Spawn {
        /// Program name or path as given on the command line.
        program: String,
        #[source]
        source: io::Error,
    },

    /// A value had to be prompted for but stdin is not a terminal.
    #[error("Input required but stdin is not a terminal")]
    NotInteractive,

    /// Any other I/O failure while piping to a child or reading an answer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
