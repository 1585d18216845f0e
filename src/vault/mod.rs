/// Vault domain layer: execution report model, message normalization, host-result rendering.
pub mod errors;
pub mod format;
pub mod normalize;
pub mod report;

pub use errors::VaultError;
pub use format::{HostResultMap, format_host_results};
pub use normalize::normalize_message;
pub use report::ExecutionReport;
