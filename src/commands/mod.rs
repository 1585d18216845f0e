/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod decrypt;
pub mod encrypt;

use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::sys::{CommandRunner, Prompter};
use crate::vault::VaultError;

/// Collaborator executables.
#[derive(Debug, Clone)]
pub struct Tools {
    /// `ansible-vault`.
    pub vault: String,
    /// `ansible`.
    pub ansible: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            vault: "ansible-vault".to_owned(),
            ansible: "ansible".to_owned(),
        }
    }
}

/// Everything a command needs from the outside world.
pub struct Context<'a> {
    pub out: &'a OutputCtx,
    pub tools: &'a Tools,
    pub runner: &'a dyn CommandRunner,
    pub prompter: &'a mut dyn Prompter,
}

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `VaultError` on any command failure.
pub fn dispatch(command: &Command, ctx: &mut Context<'_>) -> Result<(), VaultError> {
    match command {
        Command::Encrypt(args) => encrypt::run(args, ctx),
        Command::Decrypt(args) => decrypt::run(args, ctx),
    }
}
