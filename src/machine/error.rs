//! Defines the error types for the machine module.
use thiserror::Error;

/// A machine description that cannot be solved because it is internally inconsistent.
///
/// Raised eagerly by [`Machine::new`](super::Machine::new) so that solvers can
/// index lights and slots without bounds checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    #[error("button {button} references position {index}, but the machine has {lights} lights")]
    IndexOutOfRange { button: usize, index: usize, lights: usize },
    #[error("machine has {lights} lights but {joltage} joltage targets")]
    DimensionMismatch { lights: usize, joltage: usize },
}

/// A puzzle line that does not follow the machine grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number in the parsed text.
    pub line: usize,
    pub message: String,
}
