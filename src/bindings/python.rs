use crate::batch::BatchSolver;
use crate::config::{SolverConfig, SolverKind};
use crate::error::SolveError;
use crate::machine::{parse_machines, Machine};
use crate::solver::{solve_joltage, solve_toggle};
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn solve_err(e: SolveError) -> PyErr {
    match e.root() {
        SolveError::Unreachable | SolveError::Infeasible | SolveError::Malformed(_) => {
            PyValueError::new_err(e.to_string())
        }
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

/// Puzzle machines parsed once and solved on demand.
#[pyclass(name = "_Machines")]
#[derive(Debug, Clone)]
pub struct PyMachines {
    machines: Vec<Machine>,
    solver: BatchSolver,
}

impl PyMachines {
    fn machine(&self, index: usize) -> PyResult<&Machine> {
        self.machines
            .get(index)
            .ok_or_else(|| PyIndexError::new_err(format!("no machine at index {index}")))
    }
}

#[pymethods]
impl PyMachines {
    #[new]
    #[pyo3(signature = (text, config_json=None))]
    pub fn new(text: &str, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => SolverConfig::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => SolverConfig::default(),
        };
        let machines = parse_machines(text).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { machines, solver: BatchSolver::new(config) })
    }

    pub fn __len__(&self) -> usize { self.machines.len() }

    pub fn total_toggle_presses(&self) -> PyResult<u64> {
        self.solver.total(&self.machines, SolverKind::Toggle).map_err(solve_err)
    }

    pub fn total_joltage_presses(&self) -> PyResult<u64> {
        self.solver.total(&self.machines, SolverKind::Joltage).map_err(solve_err)
    }

    /// Returns `(presses, button_indices)` for one machine.
    pub fn toggle_plan(&self, index: usize) -> PyResult<(usize, Vec<usize>)> {
        let plan = solve_toggle(self.machine(index)?, self.solver.config()).map_err(solve_err)?;
        Ok((plan.presses, plan.buttons))
    }

    /// Returns `(presses, per_button_counts)` for one machine.
    pub fn joltage_plan(&self, index: usize) -> PyResult<(u64, Vec<u64>)> {
        let plan = solve_joltage(self.machine(index)?, self.solver.config()).map_err(solve_err)?;
        Ok((plan.presses, plan.counts))
    }
}

/// Sum of minimum toggle presses over every machine in `text`.
#[pyfunction]
pub fn min_toggle_presses(text: &str) -> PyResult<u64> {
    PyMachines::new(text, None)?.total_toggle_presses()
}

/// Sum of minimum accumulator presses over every machine in `text`.
#[pyfunction]
pub fn min_joltage_presses(text: &str) -> PyResult<u64> {
    PyMachines::new(text, None)?.total_joltage_presses()
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMachines>()?;
    m.add_function(wrap_pyfunction!(min_toggle_presses, m)?)?;
    m.add_function(wrap_pyfunction!(min_joltage_presses, m)?)?;
    Ok(())
}
