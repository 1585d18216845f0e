/// Process and terminal seam: everything that touches the outside world.
pub mod errors;
pub mod prompt;
pub mod runner;

pub use errors::SysError;
pub use prompt::{Prompter, TerminalPrompter};
pub use runner::{CommandRunner, Invocation, SystemRunner};
