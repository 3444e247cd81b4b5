//! High-level processing functions with error recovery.
use std::{fs, path::Path};

use log::error;

use super::types::OrgProcessor;
use crate::{error::ParseError, metadata::extract_metadata, types::ParseResult};

/// Process document content with error recovery.
///
/// If rendering panics, the panic is logged and a result carrying the
/// metadata but an empty body and table of contents is returned instead.
#[must_use]
pub fn process_with_recovery(
  processor: &OrgProcessor,
  content: &str,
) -> ParseResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render(content)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      error!("Panic during document processing: {panic_err:?}");
      ParseResult {
        metadata: extract_metadata(content),
        ..Default::default()
      }
    },
  }
}

/// Read and process a document from disk.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read.
pub fn process_org_file(
  processor: &OrgProcessor,
  file_path: &Path,
) -> Result<ParseResult, ParseError> {
  let content =
    fs::read_to_string(file_path).map_err(|source| ParseError::Io {
      path: file_path.to_path_buf(),
      source,
    })?;

  Ok(process_with_recovery(processor, &content))
}
