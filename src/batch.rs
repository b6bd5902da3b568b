//! Sums minimum press counts over a list of machines.
use crate::config::{SolverConfig, SolverKind};
use crate::error::SolveError;
use crate::machine::Machine;
use crate::solver::{solve_joltage, solve_toggle};
use rayon::prelude::*;
use tracing::{info, instrument};

/// Runs one solver over many machines.
///
/// Machines are independent, so with `parallel` set they are spread across the
/// rayon pool. Either way, results come back in input order and the reported
/// failure is the first failing machine in that order.
#[derive(Debug, Clone, Default)]
pub struct BatchSolver {
    config: SolverConfig,
}

impl BatchSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig { &self.config }

    /// The minimum press count of one machine under `kind`.
    pub fn solve_one(&self, machine: &Machine, kind: SolverKind) -> Result<u64, SolveError> {
        match kind {
            SolverKind::Toggle => solve_toggle(machine, &self.config).map(|plan| plan.presses as u64),
            SolverKind::Joltage => solve_joltage(machine, &self.config).map(|plan| plan.presses),
        }
    }

    /// Per-machine minimum press counts, in input order.
    pub fn solve_each(&self, machines: &[Machine], kind: SolverKind) -> Result<Vec<u64>, SolveError> {
        let tag = |index: usize| move |e: SolveError| SolveError::Machine { index, source: Box::new(e) };

        if self.config.parallel {
            let results: Vec<Result<u64, SolveError>> =
                machines.par_iter().map(|m| self.solve_one(m, kind)).collect();
            results.into_iter().enumerate().map(|(i, r)| r.map_err(tag(i))).collect()
        } else {
            machines
                .iter()
                .enumerate()
                .map(|(i, m)| self.solve_one(m, kind).map_err(tag(i)))
                .collect()
        }
    }

    /// The sum of every machine's minimum press count.
    #[instrument(skip_all, fields(machines = machines.len(), kind = ?kind))]
    pub fn total(&self, machines: &[Machine], kind: SolverKind) -> Result<u64, SolveError> {
        let total: u64 = self.solve_each(machines, kind)?.into_iter().sum();
        info!(total, "batch solved");
        Ok(total)
    }
}

/// Sums minimum press counts with the default configuration.
pub fn total_presses(machines: &[Machine], kind: SolverKind) -> Result<u64, SolveError> {
    BatchSolver::default().total(machines, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::parse_machines;
    use rstest::rstest;

    const EXAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[rstest]
    #[case(SolverKind::Toggle, 7)]
    #[case(SolverKind::Joltage, 33)]
    fn test_example_totals(#[case] kind: SolverKind, #[case] expected: u64) {
        let machines = parse_machines(EXAMPLE).unwrap();
        assert_eq!(total_presses(&machines, kind).unwrap(), expected);
        let sequential = BatchSolver::new(SolverConfig::default().sequential());
        assert_eq!(sequential.total(&machines, kind).unwrap(), expected);
    }

    #[test]
    fn test_per_machine_counts_keep_order() {
        let machines = parse_machines(EXAMPLE).unwrap();
        let counts = BatchSolver::default().solve_each(&machines, SolverKind::Joltage).unwrap();
        assert_eq!(counts, vec![10, 12, 11]);
    }

    #[test]
    fn test_empty_batch_sums_to_zero() {
        assert_eq!(total_presses(&[], SolverKind::Toggle).unwrap(), 0);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_first_failure_in_input_order_wins(#[case] parallel: bool) {
        // Machine 1 cannot reach its lights; machine 2 cannot reach its joltage.
        let machines = parse_machines(
            "[#.] (0) {1,0}\n\
             [#.] (0,1) {1,1}\n\
             [.] () {1}\n\
             [#] (0) {1}",
        )
        .unwrap();
        let mut config = SolverConfig::default();
        config.parallel = parallel;
        let solver = BatchSolver::new(config);

        match solver.total(&machines, SolverKind::Toggle).unwrap_err() {
            SolveError::Machine { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(*source, SolveError::Unreachable);
            }
            other => panic!("Wrong error type: {other:?}"),
        }

        let err = solver.total(&machines, SolverKind::Joltage).unwrap_err();
        assert!(matches!(err, SolveError::Machine { index: 2, .. }));
        assert_eq!(err.root(), &SolveError::Infeasible);
    }
}
