/// Shared serializable output types for all commands.
///
/// These are what gets written to stdout in the JSON output formats. Text output
/// is rendered from the same values by `cli::output`.
use serde::{Deserialize, Serialize};

use crate::vault::VaultError;

/// Result of `avt encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptOutput {
    /// Always `true`.
    pub ok: bool,
    /// `!vault` blob from `encrypt_string`, when a string was encrypted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciphertext: Option<String>,
    /// Encrypted file, when a file was encrypted in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Result of `avt decrypt --file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptFileOutput {
    /// Always `true`.
    pub ok: bool,
    /// The decrypted file.
    pub path: String,
    /// Decrypted content.
    pub content: String,
    /// Whether the file was rewritten decrypted on disk after confirmation.
    pub rewritten: bool,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `VaultError`.
    #[must_use]
    pub fn from_vault_error(err: &VaultError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
