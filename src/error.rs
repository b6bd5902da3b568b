//! error.rs
//! Failure signals of the solvers and the batch aggregator.

use crate::machine::MachineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("no combination of buttons produces the target light pattern")]
    Unreachable,
    #[error("no non-negative integer press counts reach the joltage targets")]
    Infeasible,
    #[error("malformed machine: {0}")]
    Malformed(#[from] MachineError),
    #[error("{what} is {actual}, above the limit of {limit}")]
    CapacityExceeded { what: &'static str, actual: u64, limit: u64 },
    #[error("branch and bound gave up after {nodes} nodes")]
    BudgetExhausted { nodes: u64 },
    #[error("numerical fault in the integer program solver: {0}")]
    NumericalFault(String),
    #[error("machine {index} failed")]
    Machine { index: usize, source: Box<SolveError> },
}

impl SolveError {
    /// The innermost error, looking through batch context.
    pub fn root(&self) -> &SolveError {
        match self {
            SolveError::Machine { source, .. } => source.root(),
            other => other,
        }
    }
}
