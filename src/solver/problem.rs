use crate::error::SolveError;

/// A linear program with equality rows, column bounds and integrality flags:
///
/// minimize `objective · x` subject to `equalities · x = rhs`,
/// `lower ≤ x ≤ upper`, and `x_j` integral wherever `integral[j]`.
///
/// `upper` may hold `f64::INFINITY`; `lower` must be finite.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerProgram {
    pub objective: Vec<f64>,
    /// Dense rows, each of length `objective.len()`.
    pub equalities: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub integral: Vec<bool>,
}

impl IntegerProgram {
    pub fn columns(&self) -> usize { self.objective.len() }
    pub fn rows(&self) -> usize { self.equalities.len() }

    /// Whether every feasible integer point has an integral objective value,
    /// which lets branch and bound round relaxation bounds up.
    pub fn has_integral_objective(&self) -> bool {
        self.objective
            .iter()
            .zip(&self.integral)
            .all(|(&c, &int)| c == 0.0 || (int && c.fract() == 0.0))
    }

    pub(crate) fn check_shape(&self) -> Result<(), SolveError> {
        let n = self.columns();
        let columns_ok = self.lower.len() == n && self.upper.len() == n && self.integral.len() == n;
        let rows_ok = self.rhs.len() == self.rows() && self.equalities.iter().all(|row| row.len() == n);
        if !columns_ok || !rows_ok {
            return Err(SolveError::NumericalFault(format!(
                "inconsistent program shape: {} columns, {} rows, {} right-hand sides",
                n,
                self.rows(),
                self.rhs.len()
            )));
        }
        if self.lower.iter().any(|l| !l.is_finite()) {
            return Err(SolveError::NumericalFault("lower bounds must be finite".into()));
        }
        Ok(())
    }
}
