//! Dense two-phase primal simplex for the LP relaxation of an [`IntegerProgram`].
//!
//! Columns are shifted to their lower bounds, finite upper bounds become slack
//! rows, and each equality row gets an artificial column for phase one.
//! Bland's rule (lowest entering index, lowest leaving basis index on ties)
//! keeps degenerate problems from cycling.
use super::problem::IntegerProgram;
use crate::error::SolveError;

/// Smallest magnitude accepted as a pivot or as a negative reduced cost.
const PIVOT_EPS: f64 = 1e-9;
/// Phase one residual above which the relaxation is declared infeasible.
const FEASIBILITY_EPS: f64 = 1e-6;
/// Entries below this are flushed to zero after elimination.
const ZERO_EPS: f64 = 1e-12;
const MAX_PIVOTS: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    Optimal { x: Vec<f64>, objective: f64 },
    Infeasible,
    Unbounded,
}

struct Tableau {
    /// Constraint rows; entry `width` holds the right-hand side.
    rows: Vec<Vec<f64>>,
    /// Reduced costs; entry `width` holds the negated objective value.
    reduced: Vec<f64>,
    basis: Vec<usize>,
    width: usize,
}

impl Tableau {
    #[inline(always)]
    fn rhs(&self, r: usize) -> f64 { self.rows[r][self.width] }

    /// Recomputes the reduced cost row for `cost` against the current basis.
    fn price(&mut self, cost: &[f64]) {
        let mut reduced = cost.to_vec();
        reduced.push(0.0);
        for (row, &b) in self.rows.iter().zip(&self.basis) {
            let cb = cost[b];
            if cb != 0.0 {
                for (d, &a) in reduced.iter_mut().zip(row) {
                    *d -= cb * a;
                }
            }
        }
        self.reduced = reduced;
    }

    fn pivot(&mut self, r: usize, c: usize) {
        let p = self.rows[r][c];
        for v in self.rows[r].iter_mut() {
            *v /= p;
        }
        let pivot_row = self.rows[r].clone();
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i != r {
                eliminate(row, &pivot_row, c);
            }
        }
        eliminate(&mut self.reduced, &pivot_row, c);
        self.basis[r] = c;
    }

    /// Pivots until no column below `enterable` has a negative reduced cost.
    /// Returns `Ok(false)` if an entering column has no leaving row (unbounded).
    fn optimize(&mut self, enterable: usize) -> Result<bool, SolveError> {
        for _ in 0..MAX_PIVOTS {
            let Some(enter) = (0..enterable).find(|&j| self.reduced[j] < -PIVOT_EPS) else {
                return Ok(true);
            };

            let mut leave: Option<(usize, f64)> = None;
            for r in 0..self.rows.len() {
                let a = self.rows[r][enter];
                if a <= PIVOT_EPS {
                    continue;
                }
                let ratio = self.rhs(r).max(0.0) / a;
                let better = match leave {
                    None => true,
                    Some((l, best)) => {
                        ratio < best - PIVOT_EPS
                            || (ratio <= best + PIVOT_EPS && self.basis[r] < self.basis[l])
                    }
                };
                if better {
                    leave = Some((r, ratio));
                }
            }

            let Some((r, _)) = leave else {
                return Ok(false);
            };
            self.pivot(r, enter);
        }
        Err(SolveError::NumericalFault(format!("simplex did not settle within {MAX_PIVOTS} pivots")))
    }

    /// Replaces artificial basics (all at zero after a feasible phase one) with real
    /// columns. Rows with no real column left are redundant and keep their artificial.
    fn evict_artificials(&mut self, artificial_start: usize) {
        for r in 0..self.rows.len() {
            if self.basis[r] < artificial_start {
                continue;
            }
            if let Some(c) = (0..artificial_start).find(|&c| self.rows[r][c].abs() > PIVOT_EPS) {
                self.pivot(r, c);
            }
        }
    }
}

fn eliminate(row: &mut [f64], pivot_row: &[f64], c: usize) {
    let f = row[c];
    if f == 0.0 {
        return;
    }
    for (v, &p) in row.iter_mut().zip(pivot_row) {
        *v -= f * p;
        if v.abs() < ZERO_EPS {
            *v = 0.0;
        }
    }
}

/// Solves the relaxation of `program` with the column bounds replaced by `lower`/`upper`.
pub fn solve_relaxation(
    program: &IntegerProgram,
    lower: &[f64],
    upper: &[f64],
) -> Result<LpOutcome, SolveError> {
    let n = program.columns();
    let m = program.rows();
    if lower.iter().zip(upper).any(|(&l, &u)| u < l - FEASIBILITY_EPS) {
        return Ok(LpOutcome::Infeasible);
    }

    let bounded: Vec<usize> = (0..n).filter(|&j| upper[j].is_finite()).collect();
    let slack_start = n;
    let artificial_start = n + bounded.len();
    let width = artificial_start + m;

    let mut rows = Vec::with_capacity(m + bounded.len());
    let mut basis = Vec::with_capacity(m + bounded.len());

    for (i, coeffs) in program.equalities.iter().enumerate() {
        let shifted = program.rhs[i] - coeffs.iter().zip(lower).map(|(a, l)| a * l).sum::<f64>();
        // Phase one needs a non-negative right-hand side.
        let sign = if shifted < 0.0 { -1.0 } else { 1.0 };
        let mut row = vec![0.0; width + 1];
        for (j, &a) in coeffs.iter().enumerate() {
            row[j] = sign * a;
        }
        row[artificial_start + i] = 1.0;
        row[width] = sign * shifted;
        rows.push(row);
        basis.push(artificial_start + i);
    }

    for (k, &j) in bounded.iter().enumerate() {
        let mut row = vec![0.0; width + 1];
        row[j] = 1.0;
        row[slack_start + k] = 1.0;
        row[width] = (upper[j] - lower[j]).max(0.0);
        rows.push(row);
        basis.push(slack_start + k);
    }

    let mut tableau = Tableau { rows, reduced: Vec::new(), basis, width };

    // Phase one: minimize the sum of artificials.
    let mut phase_one = vec![0.0; width];
    phase_one[artificial_start..].fill(1.0);
    tableau.price(&phase_one);
    if !tableau.optimize(artificial_start)? {
        return Err(SolveError::NumericalFault("phase one reported an unbounded ray".into()));
    }
    if -tableau.reduced[width] > FEASIBILITY_EPS {
        return Ok(LpOutcome::Infeasible);
    }
    tableau.evict_artificials(artificial_start);

    // Phase two: the real objective; artificials may no longer enter.
    let mut cost = vec![0.0; width];
    cost[..n].copy_from_slice(&program.objective);
    tableau.price(&cost);
    if !tableau.optimize(artificial_start)? {
        return Ok(LpOutcome::Unbounded);
    }

    let mut x = lower.to_vec();
    for (r, &b) in tableau.basis.iter().enumerate() {
        if b < n {
            x[b] += tableau.rhs(r);
        }
    }
    let objective = program.objective.iter().zip(&x).map(|(c, v)| c * v).sum();
    Ok(LpOutcome::Optimal { x, objective })
}
