/// Errors from the vault domain layer.
use std::path::PathBuf;

use thiserror::Error;

use crate::sys::SysError;

/// Errors that end a command. All are fatal and reported once.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The host pattern matched nothing in the inventory.
    #[error("No host in the inventory matches '{pattern}'")]
    HostNotFound {
        /// The host name or pattern that was queried.
        pattern: String,
    },

    /// The file to encrypt or decrypt does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path as given by the operator.
        path: PathBuf,
    },

    /// ansible-vault refused to decrypt (wrong password, corrupt or unencrypted file).
    #[error("Could not decrypt {}: {}", path.display(), stderr.trim())]
    Decryption {
        /// File that was being decrypted.
        path: PathBuf,
        /// Raw stderr of ansible-vault.
        stderr: String,
    },

    /// ansible-vault exited non-zero while encrypting.
    #[error("Could not encrypt {target}: {}", stderr.trim())]
    Encryption {
        /// "string" or the file path.
        target: String,
        /// Raw stderr of ansible-vault.
        stderr: String,
    },

    /// ansible did not print a usable JSON execution report.
    #[error("Unexpected output from ansible: {reason}")]
    MalformedReport {
        /// Parser message, plus ansible's stderr when it failed.
        reason: String,
    },

    /// A required value was empty.
    #[error("No {what} given")]
    MissingInput {
        /// Human name of the value, e.g. "host" or "variable".
        what: &'static str,
    },

    /// Process or terminal failure.
    #[error(transparent)]
    Sys(#[from] SysError),
}

impl VaultError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HostNotFound { .. } | Self::FileNotFound { .. } => 4,
            Self::Decryption { .. } | Self::Encryption { .. } => 5,
            Self::MalformedReport { .. } => 6,
            Self::MissingInput { .. } | Self::Sys(SysError::NotInteractive) => 2,
            Self::Sys(_) => 1,
        }
    }

    /// Machine-readable error code for JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::HostNotFound { .. } => "host_not_found",
            Self::FileNotFound { .. } => "file_not_found",
            Self::Decryption { .. } => "decryption_failed",
            Self::Encryption { .. } => "encryption_failed",
            Self::MalformedReport { .. } => "malformed_report",
            Self::MissingInput { .. } => "missing_input",
            Self::Sys(SysError::NotInteractive) => "not_interactive",
            Self::Sys(SysError::Spawn { .. }) => "tool_not_runnable",
            Self::Sys(SysError::Io(_)) => "io_error",
        }
    }
}
