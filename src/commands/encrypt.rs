/// `encrypt` command: vault-encrypt a string or a file with ansible-vault.
use std::path::Path;

use log::info;

use super::Context;
use crate::cli::args::EncryptArgs;
use crate::cli::output::write_encrypted;
use crate::sys::{CommandRunner, Invocation};
use crate::types::EncryptOutput;
use crate::vault::VaultError;

/// Run `avt encrypt`.
///
/// # Errors
///
/// Returns `VaultError` if the file is missing, ansible-vault cannot be run or
/// exits non-zero, or the plaintext cannot be prompted for.
pub fn run(args: &EncryptArgs, ctx: &mut Context<'_>) -> Result<(), VaultError> {
    let output = if let Some(path) = &args.file {
        let _t = ctx.out.timer("encrypt_file");
        encrypt_file(ctx.runner, &ctx.tools.vault, path)?;
        EncryptOutput {
            ok: true,
            ciphertext: None,
            path: Some(path.display().to_string()),
        }
    } else {
        let plaintext = match &args.string {
            Some(s) => s.clone(),
            None => ctx.prompter.ask_secret("Enter string: ")?,
        };
        let _t = ctx.out.timer("encrypt_string");
        let ciphertext = encrypt_string(ctx.runner, &ctx.tools.vault, &plaintext)?;
        EncryptOutput {
            ok: true,
            ciphertext: Some(ciphertext),
            path: None,
        }
    };

    write_encrypted(&output, ctx.out);
    Ok(())
}

/// Encrypt `plaintext` with `ansible-vault encrypt_string`, fed on stdin.
///
/// The plaintext is passed as-is, empty included. The `!vault` blob is returned
/// with surrounding whitespace stripped.
///
/// # Errors
///
/// Returns `VaultError::Encryption` with ansible-vault's stderr on non-zero exit.
pub fn encrypt_string(
    runner: &dyn CommandRunner,
    vault: &str,
    plaintext: &str,
) -> Result<String, VaultError> {
    let invocation = Invocation::new(vault).arg("encrypt_string").stdin(plaintext);
    let output = runner.run(&invocation)?;
    if !output.success() {
        return Err(VaultError::Encryption {
            target: "string".to_owned(),
            stderr: output.stderr,
        });
    }
    Ok(output.stdout.trim().to_owned())
}

/// Encrypt `path` in place with `ansible-vault encrypt`.
///
/// # Errors
///
/// - `VaultError::FileNotFound` — checked before ansible-vault is started
/// - `VaultError::Encryption` — ansible-vault exited non-zero (e.g. already encrypted)
pub fn encrypt_file(runner: &dyn CommandRunner, vault: &str, path: &Path) -> Result<(), VaultError> {
    if !path.exists() {
        return Err(VaultError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let invocation = Invocation::new(vault)
        .arg("encrypt")
        .arg(path.as_os_str());
    let output = runner.run(&invocation)?;
    if !output.success() {
        return Err(VaultError::Encryption {
            target: path.display().to_string(),
            stderr: output.stderr,
        });
    }
    info!("encrypted {} in place", path.display());
    Ok(())
}
