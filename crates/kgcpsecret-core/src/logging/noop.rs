//! Silent logger

use super::traits::Logger;

/// A logger that discards everything
///
/// Used by `SecretAssembler` unless a logger is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
