//! Minimum-weight solutions of `A x = t` over GF(2).
//!
//! Rows are lights, columns are buttons. The augmented matrix is brought to
//! reduced row echelon form; every solution is then the particular solution
//! (free columns at zero) XOR a combination of the null space basis, and the
//! combinations are walked in Gray-code order so each step costs one row XOR.
use super::toggle::TogglePlan;
use crate::config::MAX_FREE_VARIABLES;
use crate::error::SolveError;
use crate::machine::Machine;
use bitvec::prelude::*;
use tracing::trace;

type Row = BitVec<usize, Lsb0>;

struct LinearSystem {
    /// Augmented rows `[A | t]`; the last bit of each row is the target.
    rows: Vec<Row>,
    columns: usize,
    /// Pivot row of each column, `None` for free columns.
    pivot_of: Vec<Option<usize>>,
    free: Vec<usize>,
}

impl LinearSystem {
    fn new(machine: &Machine) -> Self {
        let columns = machine.button_count();
        let mut rows = vec![Row::repeat(false, columns + 1); machine.light_count()];
        for (b, button) in machine.buttons().iter().enumerate() {
            for &light in button.indices() {
                rows[light].set(b, true);
            }
        }
        for (light, &on) in machine.lights().iter().enumerate() {
            if on {
                rows[light].set(columns, true);
            }
        }
        Self { rows, columns, pivot_of: vec![None; columns], free: Vec::new() }
    }

    /// Reduces to RREF. Returns `false` when some row reads `0 = 1`.
    fn reduce(&mut self) -> bool {
        let mut rank = 0;
        for c in 0..self.columns {
            let Some(found) = (rank..self.rows.len()).find(|&r| self.rows[r][c]) else {
                self.free.push(c);
                continue;
            };
            self.rows.swap(rank, found);
            let pivot = self.rows[rank].clone();
            for (r, row) in self.rows.iter_mut().enumerate() {
                if r != rank && row[c] {
                    *row ^= &pivot;
                }
            }
            self.pivot_of[c] = Some(rank);
            rank += 1;
        }
        self.rows[rank..].iter().all(|row| !row[self.columns])
    }

    /// The solution with every free column unpressed.
    fn particular(&self) -> Row {
        let mut x = Row::repeat(false, self.columns);
        for (c, pivot) in self.pivot_of.iter().enumerate() {
            if let Some(r) = *pivot {
                x.set(c, self.rows[r][self.columns]);
            }
        }
        x
    }

    /// One null space vector per free column: that column pressed, pivots compensating.
    fn null_basis(&self) -> Vec<Row> {
        self.free
            .iter()
            .map(|&f| {
                let mut v = Row::repeat(false, self.columns);
                v.set(f, true);
                for (c, pivot) in self.pivot_of.iter().enumerate() {
                    if let Some(r) = *pivot {
                        v.set(c, self.rows[r][f]);
                    }
                }
                v
            })
            .collect()
    }
}

pub(super) fn min_weight_solution(
    machine: &Machine,
    max_free_variables: usize,
) -> Result<TogglePlan, SolveError> {
    let mut system = LinearSystem::new(machine);
    if !system.reduce() {
        return Err(SolveError::Unreachable);
    }

    let limit = max_free_variables.min(MAX_FREE_VARIABLES);
    if system.free.len() > limit {
        return Err(SolveError::CapacityExceeded {
            what: "null space dimension",
            actual: system.free.len() as u64,
            limit: limit as u64,
        });
    }

    let basis = system.null_basis();
    let mut current = system.particular();
    let mut best = current.clone();
    let mut best_weight = best.count_ones();
    trace!(free = basis.len(), "enumerating null space");

    // Gray code: between step i-1 and i exactly the bit at trailing_zeros(i) flips.
    for i in 1u64..(1u64 << basis.len()) {
        current ^= &basis[i.trailing_zeros() as usize];
        let weight = current.count_ones();
        if weight < best_weight {
            best_weight = weight;
            best.clone_from(&current);
        }
    }

    Ok(TogglePlan::from_buttons(best.iter_ones().collect()))
}
