//! Expose orgpage's command line and build pipeline for integration tests.
pub mod cli;
pub mod site;
