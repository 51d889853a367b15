//! CLI command implementations

pub mod export;

pub use export::{ExportArgs, handle_export};
