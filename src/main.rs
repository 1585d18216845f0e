#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! avt — encrypt strings and inspect vaulted values with ansible-vault and ansible.

mod cli;
mod commands;
mod sys;
mod types;
mod vault;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use commands::{Context, Tools};
use sys::{SystemRunner, TerminalPrompter};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, default_level),
    );

    let out = OutputCtx::new(cli.output, cli.json);
    let tools = Tools {
        vault: cli.vault_bin.clone(),
        ansible: cli.ansible_bin.clone(),
    };
    let mut prompter = TerminalPrompter;
    let mut ctx = Context {
        out: &out,
        tools: &tools,
        runner: &SystemRunner,
        prompter: &mut prompter,
    };

    match commands::dispatch(&cli.command, &mut ctx) {
        Ok(()) => {}
        Err(err) => {
            log::debug!("command failed: {err:?}");
            let error_output = ErrorOutput::from_vault_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
