//! Output formatting for CLI

use crate::cli::CliError;
use crate::pipeline::ExportOutcome;

/// Report printed on stdout after a successful export
pub fn format_success(outcome: &ExportOutcome) -> String {
    outcome.summary()
}

/// Single message printed on stderr when the export aborts
pub fn format_error(err: &CliError) -> String {
    format!("ERROR: {}", err.user_message())
}
