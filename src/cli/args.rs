/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

/// avt — encrypt strings and inspect vaulted values with ansible-vault and ansible.
#[derive(Debug, Parser)]
#[command(
    name = "avt",
    about = "Encrypt strings and inspect vaulted variables or files with ansible-vault and ansible",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Log subprocess calls and timings to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// ansible-vault executable.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "AVT_VAULT_BIN",
        default_value = "ansible-vault"
    )]
    pub vault_bin: String,

    /// ansible executable.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "AVT_ANSIBLE_BIN",
        default_value = "ansible"
    )]
    pub ansible_bin: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Plain values; `host: value` lines for several hosts.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Compact single-line JSON.
    Compact,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt a string (or a file in place) using ansible-vault.
    Encrypt(EncryptArgs),
    /// Print a variable of one or multiple hosts, or a vaulted file, decrypted.
    Decrypt(DecryptArgs),
}

/// Arguments for `avt encrypt`.
#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("source").args(["string", "file"])))]
pub struct EncryptArgs {
    /// String that shall be encrypted. Prompted for (hidden) when neither
    /// --string nor --file is given.
    #[arg(short, long, value_name = "STRING")]
    pub string: Option<String>,

    /// File that shall be encrypted in place.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for `avt decrypt`.
#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("target").args(["host", "file"])))]
pub struct DecryptArgs {
    /// Host name or pattern from the Ansible inventory.
    #[arg(short = 'H', long, value_name = "PATTERN")]
    pub host: Option<String>,

    /// Vault-encrypted file to print.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Variable to print (host mode).
    #[arg(short, long, value_name = "NAME", conflicts_with = "file")]
    pub var: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("avt").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_decrypt_host_and_var() {
        let cli = parse(&["decrypt", "-H", "web*", "-v", "db_password"]).unwrap();
        let Command::Decrypt(args) = cli.command else {
            panic!("expected decrypt");
        };
        assert_eq!(args.host.as_deref(), Some("web*"));
        assert_eq!(args.var.as_deref(), Some("db_password"));
        assert!(args.file.is_none());
    }

    #[test]
    fn test_decrypt_host_and_file_conflict() {
        assert!(parse(&["decrypt", "-H", "web01", "-f", "vault.yml"]).is_err());
    }

    #[test]
    fn test_decrypt_var_and_file_conflict() {
        assert!(parse(&["decrypt", "-f", "vault.yml", "-v", "x"]).is_err());
    }

    #[test]
    fn test_encrypt_string_and_file_conflict() {
        assert!(parse(&["encrypt", "-s", "x", "-f", "vault.yml"]).is_err());
    }

    #[test]
    fn test_encrypt_without_source_is_allowed() {
        let cli = parse(&["encrypt"]).unwrap();
        let Command::Encrypt(args) = cli.command else {
            panic!("expected encrypt");
        };
        assert!(args.string.is_none() && args.file.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["encrypt", "-s", "x", "--json", "--vault-bin", "/opt/av"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.vault_bin, "/opt/av");
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_json_conflicts_with_output() {
        assert!(parse(&["--json", "--output", "compact", "encrypt"]).is_err());
    }
}
