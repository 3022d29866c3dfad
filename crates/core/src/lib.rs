pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod version;

pub use config::ResolverConfig;
pub use error::{ForkpathError, Result};
pub use version::is_within_version_spec;
