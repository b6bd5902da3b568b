//! Property-based tests for both solvers.
//!
//! Random small machines are checked against re-simulation and against
//! exhaustive search, and the two toggle strategies against each other.

use proptest::prelude::*;
use switchboard_core::{solve_joltage, solve_toggle, Machine, SolveError, SolverConfig, ToggleStrategy};

/// Strategy for machines with up to 8 lights and 8 buttons of up to 3 positions each.
fn arb_toggle_machine() -> impl Strategy<Value = Machine> {
    (1usize..=8)
        .prop_flat_map(|lights| {
            (
                prop::collection::vec(any::<bool>(), lights),
                prop::collection::vec(prop::collection::vec(0..lights, 0..=3), 0..=8),
            )
        })
        .prop_map(|(target, buttons)| {
            let n = target.len();
            Machine::new(target, buttons, vec![0; n]).unwrap()
        })
}

/// Strategy for accumulator machines small enough to enumerate exhaustively.
fn arb_joltage_machine() -> impl Strategy<Value = Machine> {
    (1usize..=3)
        .prop_flat_map(|slots| {
            (
                prop::collection::vec(prop::collection::vec(0..slots, 0..=slots), 1..=4),
                prop::collection::vec(0u64..=4, slots),
            )
        })
        .prop_map(|(buttons, joltage)| {
            Machine::new(vec![false; joltage.len()], buttons, joltage).unwrap()
        })
}

/// Smallest total over every press vector within the per-button caps, if any fits.
fn brute_force_joltage(machine: &Machine) -> Option<u64> {
    let caps: Vec<u64> = machine
        .buttons()
        .iter()
        .map(|b| b.indices().iter().map(|&i| machine.joltage()[i]).min().unwrap_or(0))
        .collect();

    fn search(machine: &Machine, caps: &[u64], counts: &mut Vec<u64>, best: &mut Option<u64>) {
        if counts.len() == caps.len() {
            if machine.simulate_counters(counts.as_slice()) == machine.joltage() {
                let total: u64 = counts.iter().sum();
                if best.map_or(true, |b| total < b) {
                    *best = Some(total);
                }
            }
            return;
        }
        for c in 0..=caps[counts.len()] {
            counts.push(c);
            search(machine, caps, counts, best);
            counts.pop();
        }
    }

    let mut best = None;
    search(machine, &caps, &mut Vec::new(), &mut best);
    best
}

proptest! {
    /// Both strategies agree, and the witness is a set of distinct buttons that
    /// reproduces the target when replayed.
    #[test]
    fn toggle_strategies_agree_and_witness_replays(machine in arb_toggle_machine()) {
        let bfs = solve_toggle(&machine, &SolverConfig::default().with_strategy(ToggleStrategy::BreadthFirst));
        let gf2 = solve_toggle(&machine, &SolverConfig::default().with_strategy(ToggleStrategy::Elimination));

        match (bfs, gf2) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.presses, b.presses);
                for plan in [a, b] {
                    prop_assert_eq!(plan.presses, plan.buttons.len());
                    prop_assert!(plan.buttons.windows(2).all(|w| w[0] < w[1]));
                    prop_assert_eq!(machine.simulate_toggles(&plan.buttons), machine.lights());
                }
            }
            (Err(a), Err(b)) => {
                prop_assert_eq!(a, SolveError::Unreachable);
                prop_assert_eq!(b, SolveError::Unreachable);
            }
            (a, b) => prop_assert!(false, "strategies disagree: {:?} vs {:?}", a, b),
        }
    }

    /// An all-off target never needs a press.
    #[test]
    fn toggle_all_off_is_free(machine in arb_toggle_machine()) {
        let off = Machine::new(
            vec![false; machine.light_count()],
            machine.buttons().iter().map(|b| b.indices().to_vec()).collect(),
            vec![0; machine.light_count()],
        ).unwrap();
        prop_assert_eq!(solve_toggle(&off, &SolverConfig::default()).unwrap().presses, 0);
    }

    /// Branch and bound finds exactly the exhaustive minimum, or reports infeasibility
    /// exactly when exhaustive search finds nothing.
    #[test]
    fn joltage_matches_exhaustive_search(machine in arb_joltage_machine()) {
        let expected = brute_force_joltage(&machine);
        match solve_joltage(&machine, &SolverConfig::default()) {
            Ok(plan) => {
                prop_assert_eq!(Some(plan.presses), expected);
                prop_assert_eq!(machine.simulate_counters(&plan.counts), machine.joltage());
            }
            Err(e) => {
                prop_assert_eq!(e, SolveError::Infeasible);
                prop_assert_eq!(expected, None);
            }
        }
    }

    /// Solving twice gives the same answer.
    #[test]
    fn solvers_are_deterministic(machine in arb_joltage_machine()) {
        let config = SolverConfig::default();
        prop_assert_eq!(solve_joltage(&machine, &config), solve_joltage(&machine, &config));
        prop_assert_eq!(solve_toggle(&machine, &config), solve_toggle(&machine, &config));
    }
}
