//! Minimum presses to reach a light pattern when every press toggles its lights.
//!
//! Pressing a button twice cancels out, so a minimal answer is a set of distinct
//! buttons. Small machines are searched breadth-first over light bitmasks; larger
//! ones go through Gaussian elimination over GF(2) (see `gf2`).
use super::gf2;
use crate::config::{SolverConfig, ToggleStrategy, MAX_BFS_LIGHTS};
use crate::error::SolveError;
use crate::machine::Machine;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, trace};

/// A minimal toggle solution: which buttons to press, once each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TogglePlan {
    pub presses: usize,
    /// Distinct button indices, ascending.
    pub buttons: Vec<usize>,
}

impl TogglePlan {
    pub(crate) fn from_buttons(mut buttons: Vec<usize>) -> Self {
        buttons.sort_unstable();
        Self { presses: buttons.len(), buttons }
    }
}

/// Visited masks mapped to the (previous mask, button) edge that first reached them.
/// The start mask maps to `None`.
type Parents = HashMap<u64, Option<(u64, usize)>>;

#[instrument(skip_all, fields(lights = machine.light_count(), buttons = machine.button_count()))]
pub fn solve_toggle(machine: &Machine, config: &SolverConfig) -> Result<TogglePlan, SolveError> {
    let lights = machine.light_count();
    let use_bfs = match config.toggle_strategy {
        ToggleStrategy::Auto => lights <= config.bfs_max_lights.min(MAX_BFS_LIGHTS),
        ToggleStrategy::BreadthFirst => {
            if lights > MAX_BFS_LIGHTS {
                return Err(SolveError::CapacityExceeded {
                    what: "light count",
                    actual: lights as u64,
                    limit: MAX_BFS_LIGHTS as u64,
                });
            }
            true
        }
        ToggleStrategy::Elimination => false,
    };

    let plan = if use_bfs {
        breadth_first(machine)?
    } else {
        match gf2::min_weight_solution(machine, config.max_free_variables) {
            // Too many free columns to enumerate, but the light masks still fit.
            Err(SolveError::CapacityExceeded { actual, limit, .. })
                if config.toggle_strategy == ToggleStrategy::Auto && lights <= MAX_BFS_LIGHTS =>
            {
                debug!(free = actual, limit, "null space too wide, searching breadth-first");
                breadth_first(machine)?
            }
            outcome => outcome?,
        }
    };
    debug!(presses = plan.presses, bfs = use_bfs, "toggle target reached");
    Ok(plan)
}

/// Unit-cost shortest path from the all-off mask to the target mask.
/// Callers guarantee the machine has at most `MAX_BFS_LIGHTS` lights.
fn breadth_first(machine: &Machine) -> Result<TogglePlan, SolveError> {
    let target = machine.target_mask().ok_or(SolveError::CapacityExceeded {
        what: "light count",
        actual: machine.light_count() as u64,
        limit: u64::from(u64::BITS),
    })?;
    if target == 0 {
        return Ok(TogglePlan::from_buttons(Vec::new()));
    }

    let moves = distinct_moves(machine);
    let mut parents: Parents = HashMap::from([(0, None)]);
    let mut frontier = vec![0u64];
    let mut depth = 0usize;

    while !frontier.is_empty() {
        depth += 1;
        let mut next = Vec::new();
        for &state in &frontier {
            for &(mask, button) in &moves {
                let reached = state ^ mask;
                match parents.entry(reached) {
                    Entry::Occupied(_) => continue,
                    Entry::Vacant(slot) => {
                        slot.insert(Some((state, button)));
                    }
                }
                if reached == target {
                    trace!(depth, visited = parents.len(), "target discovered");
                    return Ok(TogglePlan::from_buttons(walk_back(&parents, target)));
                }
                next.push(reached);
            }
        }
        trace!(depth, frontier = next.len(), visited = parents.len(), "level expanded");
        frontier = next;
    }

    Err(SolveError::Unreachable)
}

/// One (mask, button) edge per distinct non-zero toggle mask, keeping the first button.
fn distinct_moves(machine: &Machine) -> Vec<(u64, usize)> {
    let mut seen = HashSet::new();
    machine
        .buttons()
        .iter()
        .enumerate()
        .filter_map(|(i, b)| b.toggle_mask().map(|mask| (mask, i)))
        .filter(|&(mask, _)| mask != 0 && seen.insert(mask))
        .collect()
}

fn walk_back(parents: &Parents, goal: u64) -> Vec<usize> {
    let mut presses = Vec::new();
    let mut cursor = goal;
    while let Some(Some((previous, button))) = parents.get(&cursor) {
        presses.push(*button);
        cursor = *previous;
    }
    presses
}
