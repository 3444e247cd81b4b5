//! Document processing.
//!
//! - [`core`]: the processor implementation and file discovery
//! - [`process`]: high-level functions with error recovery
//! - [`types`]: options and the processor type
pub mod core;
pub mod process;
pub mod types;

pub use self::core::{ORG_EXTENSION, collect_org_files};

pub use process::{process_org_file, process_with_recovery};
pub use types::{OrgOptions, OrgOptionsBuilder, OrgProcessor};
