/// `decrypt` command: print a host variable through ansible, or a vaulted file
/// through ansible-vault.
use std::path::Path;

use log::{debug, info, warn};

use super::Context;
use crate::cli::args::DecryptArgs;
use crate::cli::output::{write_decrypted_file, write_decrypted_preview, write_host_results};
use crate::sys::{CommandRunner, Invocation, Prompter};
use crate::types::DecryptFileOutput;
use crate::vault::{ExecutionReport, HostResultMap, VaultError, normalize_message};

/// Child-only environment that makes ansible print one JSON report on stdout.
const JSON_CALLBACK_ENV: [(&str, &str); 2] = [
    ("ANSIBLE_LOAD_CALLBACK_PLUGINS", "1"),
    ("ANSIBLE_STDOUT_CALLBACK", "json"),
];

/// Run `avt decrypt`.
///
/// # Errors
///
/// Returns `VaultError` on a missing host/file, a failed decryption, an
/// unreadable ansible report, or a prompt that cannot be answered.
pub fn run(args: &DecryptArgs, ctx: &mut Context<'_>) -> Result<(), VaultError> {
    if let Some(path) = &args.file {
        return run_file(path, ctx);
    }

    let host = required(args.host.as_deref(), ctx.prompter, "Enter host: ", "host")?;
    let var = required(args.var.as_deref(), ctx.prompter, "Enter variable: ", "variable")?;

    let _t = ctx.out.timer("decrypt_host_variable");
    let results = decrypt_host_variable(ctx.runner, &ctx.tools.ansible, &host, &var)?;
    write_host_results(&results, ctx.out);
    Ok(())
}

fn run_file(path: &Path, ctx: &mut Context<'_>) -> Result<(), VaultError> {
    let out = ctx.out;
    let preview_timer = out.timer("decrypt_preview");
    let decrypted = decrypt_file(ctx.runner, ctx.prompter, &ctx.tools.vault, path, |content| {
        drop(preview_timer);
        write_decrypted_preview(content, out);
    })?;

    write_decrypted_file(
        &DecryptFileOutput {
            ok: true,
            path: path.display().to_string(),
            content: decrypted.content,
            rewritten: decrypted.rewritten,
        },
        out,
    );
    Ok(())
}

/// Take a flag value, or ask for it when absent or empty.
fn required(
    given: Option<&str>,
    prompter: &mut dyn Prompter,
    question: &str,
    what: &'static str,
) -> Result<String, VaultError> {
    let value = match given {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => prompter.ask(question)?.trim().to_owned(),
    };
    if value.is_empty() {
        return Err(VaultError::MissingInput { what });
    }
    Ok(value)
}

/// Evaluate `var` on every host matching `pattern` and collect display values.
///
/// Runs `ansible <pattern> -m debug -a "msg={{ <var> }}"` with the JSON stdout
/// callback, reads the first task of the report and passes each host's message
/// through [`normalize_message`]. Ansible exits non-zero when a host fails the
/// task but still prints the report, so the exit code alone is not an error.
///
/// # Errors
///
/// - `VaultError::HostNotFound` — the pattern matched no host
/// - `VaultError::MalformedReport` — stdout was not a JSON report
/// - `VaultError::Sys` — ansible could not be started
pub fn decrypt_host_variable(
    runner: &dyn CommandRunner,
    ansible: &str,
    pattern: &str,
    var: &str,
) -> Result<HostResultMap, VaultError> {
    let mut invocation = Invocation::new(ansible)
        .arg(pattern)
        .arg("-m")
        .arg("debug")
        .arg("-a")
        .arg(format!("msg={{{{ {var} }}}}"));
    for (key, value) in JSON_CALLBACK_ENV {
        invocation = invocation.env(key, value);
    }

    let output = runner.run(&invocation)?;
    let host_not_found = || VaultError::HostNotFound {
        pattern: pattern.to_owned(),
    };

    // Without matching hosts ansible only warns on stderr and prints no report.
    if output.stdout.trim().is_empty() && output.success() {
        debug!("ansible printed no report: {}", output.stderr.trim());
        return Err(host_not_found());
    }

    let report = ExecutionReport::parse(&output)?;
    let hosts = report.first_task_hosts().ok_or_else(host_not_found)?;
    if hosts.is_empty() {
        return Err(host_not_found());
    }

    let results: HostResultMap = hosts
        .iter()
        .map(|(host, result)| {
            if result.unreachable {
                warn!("{host} is unreachable");
            } else if result.failed {
                info!("{host} failed to evaluate '{var}'");
            }
            (host.as_str(), normalize_message(&result.message()))
        })
        .collect();
    Ok(results)
}

/// Outcome of [`decrypt_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedFile {
    pub content: String,
    /// Whether the operator agreed to rewrite the file decrypted.
    pub rewritten: bool,
}

/// Show a vaulted file decrypted, then offer to decrypt it in place.
///
/// The preview uses `ansible-vault decrypt --output - <file>` so the file is not
/// touched. `show` receives the content before the operator is asked. Only a
/// confirmed answer runs `ansible-vault decrypt <file>`; declining is not an error.
///
/// # Errors
///
/// - `VaultError::FileNotFound` — checked before ansible-vault is started
/// - `VaultError::Decryption` — either ansible-vault call exited non-zero
pub fn decrypt_file(
    runner: &dyn CommandRunner,
    prompter: &mut dyn Prompter,
    vault: &str,
    path: &Path,
    show: impl FnOnce(&str),
) -> Result<DecryptedFile, VaultError> {
    if !path.exists() {
        return Err(VaultError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let preview = Invocation::new(vault)
        .arg("decrypt")
        .arg("--output")
        .arg("-")
        .arg(path.as_os_str());
    let output = runner.run(&preview)?;
    if !output.success() {
        return Err(VaultError::Decryption {
            path: path.to_path_buf(),
            stderr: output.stderr,
        });
    }
    show(&output.stdout);

    let question = format!("Write the decrypted content to {}?", path.display());
    if !prompter.confirm(&question)? {
        info!("left {} encrypted", path.display());
        return Ok(DecryptedFile {
            content: output.stdout,
            rewritten: false,
        });
    }

    let in_place = Invocation::new(vault).arg("decrypt").arg(path.as_os_str());
    let rewrite = runner.run(&in_place)?;
    if !rewrite.success() {
        return Err(VaultError::Decryption {
            path: path.to_path_buf(),
            stderr: rewrite.stderr,
        });
    }
    info!("decrypted {} in place", path.display());
    Ok(DecryptedFile {
        content: output.stdout,
        rewritten: true,
    })
}
