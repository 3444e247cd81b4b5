pub mod assets;
pub mod output;

// Re-export commonly used utilities
pub use assets::copy_assets;
pub use output::{DocumentKind, classify, output_path, public_uri};
