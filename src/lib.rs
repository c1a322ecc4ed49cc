pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod packager;
pub mod source;
pub mod test_utils;
pub mod utils;

pub use error::{PackagerError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
