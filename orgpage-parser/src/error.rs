//! Error types for document loading.
use std::{io, path::PathBuf};

/// Errors that can occur while loading a document.
///
/// Converting text never fails: malformed directives, unparseable dates and
/// unterminated blocks all degrade into default values or open containers.
/// Only getting hold of the text can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
  #[error("Failed to read document {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
}
