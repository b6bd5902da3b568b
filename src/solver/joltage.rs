//! Minimum presses to bring every accumulator slot to its exact joltage target.
//!
//! Each press of button `b` adds one to every slot in `b`, so the question is the
//! integer program: minimize `Σ x_b` subject to `A x = joltage`, `x ≥ 0` integral,
//! where `A[i][b] = 1` iff slot `i` belongs to button `b`.
use super::branch_bound::BranchAndBound;
use super::problem::IntegerProgram;
use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::machine::Machine;
use serde::Serialize;
use tracing::{debug, error, instrument};

/// Largest target accepted; every integer up to 2^53 is exact in an `f64`.
pub const MAX_JOLTAGE_TARGET: u64 = 1 << 53;

/// A minimal accumulator solution: how many times to press each button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoltagePlan {
    pub presses: u64,
    /// One entry per button, in machine order.
    pub counts: Vec<u64>,
}

/// Builds the integer program for `machine`.
///
/// A button can be pressed at most as often as the smallest target among its
/// slots; a no-op button is capped at the total of all targets. Targets above
/// [`MAX_JOLTAGE_TARGET`], alone or summed, are `CapacityExceeded`.
pub fn formulate(machine: &Machine) -> Result<IntegerProgram, SolveError> {
    let n = machine.button_count();
    let joltage = machine.joltage();
    if let Some(&largest) = joltage.iter().max().filter(|&&j| j > MAX_JOLTAGE_TARGET) {
        return Err(SolveError::CapacityExceeded {
            what: "joltage target",
            actual: largest,
            limit: MAX_JOLTAGE_TARGET,
        });
    }
    let total = joltage
        .iter()
        .try_fold(0u64, |sum, &j| sum.checked_add(j))
        .filter(|&sum| sum <= MAX_JOLTAGE_TARGET)
        .ok_or_else(|| SolveError::CapacityExceeded {
            what: "joltage total",
            actual: joltage.iter().fold(0u64, |sum, &j| sum.saturating_add(j)),
            limit: MAX_JOLTAGE_TARGET,
        })?;

    let mut equalities = vec![vec![0.0; n]; joltage.len()];
    for (b, button) in machine.buttons().iter().enumerate() {
        for &slot in button.indices() {
            equalities[slot][b] = 1.0;
        }
    }

    let upper = machine
        .buttons()
        .iter()
        .map(|button| {
            button.indices().iter().map(|&slot| joltage[slot]).min().unwrap_or(total) as f64
        })
        .collect();

    Ok(IntegerProgram {
        objective: vec![1.0; n],
        equalities,
        rhs: joltage.iter().map(|&j| j as f64).collect(),
        lower: vec![0.0; n],
        upper,
        integral: vec![true; n],
    })
}

#[instrument(skip_all, fields(slots = machine.light_count(), buttons = machine.button_count()))]
pub fn solve_joltage(machine: &Machine, config: &SolverConfig) -> Result<JoltagePlan, SolveError> {
    let program = formulate(machine)?;
    let solution = BranchAndBound::new(&program)
        .tolerance(config.integrality_tolerance)
        .node_limit(config.node_limit)
        .solve()?;

    let counts = round_counts(&solution.values, config.integrality_tolerance)?;

    // Exact integer replay; the float solver only proposes.
    let reached = machine.simulate_counters(&counts);
    if reached != machine.joltage() {
        error!(?counts, ?reached, target = ?machine.joltage(), "rounded solution misses the targets");
        return Err(SolveError::NumericalFault(format!(
            "rounded press counts reach {reached:?} instead of {:?}",
            machine.joltage()
        )));
    }

    let presses: u64 = counts.iter().sum();
    debug!(presses, nodes = solution.nodes, "joltage targets reached");
    Ok(JoltagePlan { presses, counts })
}

/// Rounds each relaxed value to the nearest non-negative integer, refusing values
/// that are not already within `tolerance` of one.
fn round_counts(values: &[f64], tolerance: f64) -> Result<Vec<u64>, SolveError> {
    values
        .iter()
        .enumerate()
        .map(|(b, &v)| {
            let rounded = v.round();
            if (v - rounded).abs() > tolerance || rounded < 0.0 {
                error!(button = b, value = v, "integer solver returned a non-integral press count");
                return Err(SolveError::NumericalFault(format!(
                    "button {b} has non-integral press count {v}"
                )));
            }
            Ok(rounded as u64)
        })
        .collect()
}
