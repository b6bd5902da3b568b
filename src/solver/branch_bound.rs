//! Depth-first branch and bound over the simplex relaxation.
use super::problem::IntegerProgram;
use super::simplex::{solve_relaxation, LpOutcome};
use crate::error::SolveError;
use tracing::{debug, trace};

/// The optimal integer point found by [`BranchAndBound::solve`].
///
/// `values` are the raw relaxation values at the accepted node; integral columns
/// lie within the tolerance of an integer but are not rounded here.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerSolution {
    pub values: Vec<f64>,
    pub objective: f64,
    /// Relaxations solved, including pruned and infeasible ones.
    pub nodes: u64,
}

pub struct BranchAndBound<'a> {
    program: &'a IntegerProgram,
    tolerance: f64,
    node_limit: Option<u64>,
}

/// A subproblem: the program with tightened column bounds.
struct Node {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(program: &'a IntegerProgram) -> Self {
        Self { program, tolerance: 1e-6, node_limit: None }
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn node_limit(mut self, limit: Option<u64>) -> Self {
        self.node_limit = limit;
        self
    }

    /// Finds an optimal point satisfying every integrality flag.
    ///
    /// # Returns
    /// - `Err(SolveError::Infeasible)` if no integer point satisfies the rows and bounds.
    /// - `Err(SolveError::BudgetExhausted)` if the node limit runs out first.
    pub fn solve(&self) -> Result<IntegerSolution, SolveError> {
        self.program.check_shape()?;
        let integral_objective = self.program.has_integral_objective();

        let mut stack = vec![Node { lower: self.program.lower.clone(), upper: self.program.upper.clone() }];
        let mut incumbent: Option<(Vec<f64>, f64)> = None;
        let mut nodes = 0u64;

        while let Some(node) = stack.pop() {
            if let Some(limit) = self.node_limit {
                if nodes >= limit {
                    return Err(SolveError::BudgetExhausted { nodes });
                }
            }
            nodes += 1;

            let (x, objective) = match solve_relaxation(self.program, &node.lower, &node.upper)? {
                LpOutcome::Optimal { x, objective } => (x, objective),
                LpOutcome::Infeasible => continue,
                LpOutcome::Unbounded => {
                    return Err(SolveError::NumericalFault("integer program relaxation is unbounded".into()));
                }
            };

            if let Some((_, best)) = &incumbent {
                // With an integral objective, a bound of 6.2 can do no better than 7.
                let bound = if integral_objective { (objective - self.tolerance).ceil() } else { objective };
                if bound >= best - self.tolerance {
                    continue;
                }
            }

            match self.most_fractional(&x) {
                None => {
                    trace!(nodes, objective, "new incumbent");
                    incumbent = Some((x, objective));
                }
                Some(j) => {
                    let value = x[j];
                    let mut down = Node { lower: node.lower.clone(), upper: node.upper.clone() };
                    down.upper[j] = value.floor();
                    let mut up = node;
                    up.lower[j] = value.ceil();
                    // Down is explored first: fewer presses is the direction of the objective.
                    stack.push(up);
                    stack.push(down);
                }
            }
        }

        debug!(nodes, found = incumbent.is_some(), "branch and bound finished");
        let (values, objective) = incumbent.ok_or(SolveError::Infeasible)?;
        Ok(IntegerSolution { values, objective, nodes })
    }

    /// The integral column furthest from an integer, lowest index on ties.
    fn most_fractional(&self, x: &[f64]) -> Option<usize> {
        let mut pick: Option<(usize, f64)> = None;
        for (j, (&v, &integral)) in x.iter().zip(&self.program.integral).enumerate() {
            if !integral {
                continue;
            }
            let distance = (v - v.round()).abs();
            if distance > self.tolerance && pick.map_or(true, |(_, d)| distance > d) {
                pick = Some((j, distance));
            }
        }
        pick.map(|(j, _)| j)
    }
}
