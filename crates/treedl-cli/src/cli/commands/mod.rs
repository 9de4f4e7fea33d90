//! CLI command handlers, one per file.

mod checksum;
mod fetch;
mod list;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use list::run_list;

/// Token from the environment; overrides `token` in config.
pub(crate) fn env_token() -> Option<String> {
    std::env::var("TREEDL_TOKEN").ok()
}
