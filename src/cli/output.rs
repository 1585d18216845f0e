/// Output formatting: plain text and JSON modes, error envelopes, debug timers.
use std::io::Write;

use log::{Level, debug, log_enabled};
use serde::Serialize;

use super::args::OutputFormat;
use crate::types::{DecryptFileOutput, EncryptOutput, ErrorOutput};
use crate::vault::{HostResultMap, format_host_results};

/// Resolve the effective output format, handling the `--json` flag.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag { OutputFormat::Json } else { fmt }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    /// Start a named timer. Logs elapsed time on drop when debug logging is on.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, log_enabled!(Level::Debug))
    }
}

// --- Host variables ---

/// Render host results in the context's format.
#[must_use]
pub fn render_host_results(results: &HostResultMap, ctx: &OutputCtx) -> String {
    match ctx.format {
        OutputFormat::Text => format_host_results(results),
        OutputFormat::Json => to_json(results),
        OutputFormat::Compact => to_compact_json(results),
    }
}

/// Write host results to stdout.
pub fn write_host_results(results: &HostResultMap, ctx: &OutputCtx) {
    println!("{}", render_host_results(results, ctx));
}

// --- Encrypt ---

/// Render an encryption result. Text mode prints the vault blob, or nothing for files.
#[must_use]
pub fn render_encrypted(result: &EncryptOutput, ctx: &OutputCtx) -> Option<String> {
    match ctx.format {
        OutputFormat::Text => result.ciphertext.clone(),
        OutputFormat::Json => Some(to_json(result)),
        OutputFormat::Compact => Some(to_compact_json(result)),
    }
}

/// Write an encryption result to stdout.
pub fn write_encrypted(result: &EncryptOutput, ctx: &OutputCtx) {
    if let Some(s) = render_encrypted(result, ctx) {
        println!("{s}");
    }
}

// --- Decrypt file ---

/// Show decrypted content before asking anything. Text mode only.
pub fn write_decrypted_preview(content: &str, ctx: &OutputCtx) {
    if ctx.is_text() {
        print!("{content}");
        if !content.is_empty() && !content.ends_with('\n') {
            println!();
        }
        let _ = std::io::stdout().flush();
    }
}

/// Write the final file-decrypt result. JSON modes only; text mode already
/// showed the content through [`write_decrypted_preview`].
pub fn write_decrypted_file(result: &DecryptFileOutput, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Text => {}
        OutputFormat::Json => println!("{}", to_json(result)),
        OutputFormat::Compact => println!("{}", to_compact_json(result)),
    }
}

// --- Error output ---

/// Render a structured error for stderr.
#[must_use]
pub fn render_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) -> String {
    match resolve_format(format, json_flag) {
        OutputFormat::Json => to_json(err),
        OutputFormat::Compact => to_compact_json(err),
        OutputFormat::Text => format!("Error: {}", err.error.message),
    }
}

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "{}", render_error(err, format, json_flag));
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing unless debug logging is enabled.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            debug!("{}: {ms:.2}ms", self.label);
        }
    }
}

// --- Generic JSON helpers ---

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"ok":false,"error":{{"code":"serialization","message":"{e}"}}}}"#))
}

fn to_compact_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!(r#"{{"ok":false,"error":{{"code":"serialization","message":"{e}"}}}}"#))
}
