pub mod config;
pub mod error;
pub mod templates;

pub use config::SiteConfig;
pub use error::ConfigError;
