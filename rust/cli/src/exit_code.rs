//! Exit code constants for the CLI application.

use crate::error::CliError;

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code.
pub const ERROR: i32 = 2;

pub fn from_result(result: &Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(_) => ERROR,
    }
}
