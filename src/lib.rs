//! Minimum button presses for toggle and accumulator machines.
//!
//! The Rust API is the primary surface: build or parse [`Machine`]s, then call
//! [`solve_toggle`], [`solve_joltage`] or a [`BatchSolver`]. With the `python`
//! feature the crate also compiles to the `_core` Python extension module.

pub mod batch;
pub mod config;
pub mod error;
pub mod machine;
pub mod solver;

#[cfg(feature = "python")]
mod bindings;

pub use batch::{total_presses, BatchSolver};
pub use config::{ConfigError, SolverConfig, SolverKind, ToggleStrategy};
pub use error::SolveError;
pub use machine::{parse_machines, Button, Machine, MachineError, ParseError};
pub use solver::{solve_joltage, solve_toggle, JoltagePlan, TogglePlan};

#[cfg(feature = "python")]
use pyo3::prelude::*;

// --- Module Definition ---
/// This function defines the `switchboard._core` Python module.
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    bindings::python::register(m)
}
