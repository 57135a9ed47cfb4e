//! Kiosk error types.

use domain::OrderError;
use thiserror::Error;

use crate::command::ParseCommandError;

/// Anything that can go wrong handling one line of input.
#[derive(Debug, Error)]
pub enum KioskError {
    /// The line was not a valid command.
    #[error(transparent)]
    Parse(#[from] ParseCommandError),

    /// The order session rejected the command.
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl KioskError {
    /// Soft notices are shown as plain messages rather than errors.
    pub fn is_notice(&self) -> bool {
        matches!(self, KioskError::Order(err) if err.is_notice())
    }
}
