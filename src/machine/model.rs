//! model.rs
//! The validated, read-only machine handed to the solvers.

use super::button::Button;
use super::error::MachineError;
use serde::{Deserialize, Serialize};

/// A machine: its buttons, the light pattern to reach and the per-slot joltage targets.
///
/// Construction validates every button against the light count, so the solvers
/// index lights and accumulator slots without further checks. The fields are
/// private and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMachine")]
pub struct Machine {
    target_lights: Vec<bool>,
    buttons: Vec<Button>,
    joltage: Vec<u64>,
}

/// The unchecked wire shape of a [`Machine`].
#[derive(Deserialize)]
struct RawMachine {
    target_lights: Vec<bool>,
    buttons: Vec<Vec<usize>>,
    joltage: Vec<u64>,
}

impl TryFrom<RawMachine> for Machine {
    type Error = MachineError;

    fn try_from(raw: RawMachine) -> Result<Self, Self::Error> {
        Machine::new(raw.target_lights, raw.buttons, raw.joltage)
    }
}

impl Machine {
    pub fn new(
        target_lights: Vec<bool>,
        buttons: Vec<Vec<usize>>,
        joltage: Vec<u64>,
    ) -> Result<Self, MachineError> {
        let lights = target_lights.len();
        if joltage.len() != lights {
            return Err(MachineError::DimensionMismatch { lights, joltage: joltage.len() });
        }

        let buttons: Vec<Button> = buttons.into_iter().map(Button::new).collect();
        for (button, b) in buttons.iter().enumerate() {
            // Indices are sorted, so the last one is the only candidate for overflow.
            if let Some(index) = b.max_index().filter(|&i| i >= lights) {
                return Err(MachineError::IndexOutOfRange { button, index, lights });
            }
        }

        Ok(Self { target_lights, buttons, joltage })
    }

    pub fn lights(&self) -> &[bool] { &self.target_lights }
    pub fn buttons(&self) -> &[Button] { &self.buttons }
    pub fn joltage(&self) -> &[u64] { &self.joltage }

    pub fn light_count(&self) -> usize { self.target_lights.len() }
    pub fn button_count(&self) -> usize { self.buttons.len() }

    /// The target pattern as a bitmask (bit `i` = light `i`), or `None` past 64 lights.
    pub fn target_mask(&self) -> Option<u64> {
        if self.light_count() > 64 {
            return None;
        }
        Some(
            self.target_lights
                .iter()
                .enumerate()
                .filter(|&(_, &on)| on)
                .fold(0u64, |mask, (i, _)| mask | (1 << i)),
        )
    }

    /// Replays button presses (indices into `buttons()`, repeats allowed) from all-off.
    ///
    /// # Panics
    /// If a press refers to a button the machine does not have.
    pub fn simulate_toggles(&self, presses: &[usize]) -> Vec<bool> {
        let mut lights = vec![false; self.light_count()];
        for &b in presses {
            for &i in self.buttons[b].indices() {
                lights[i] = !lights[i];
            }
        }
        lights
    }

    /// Applies `counts[b]` presses of every button to zeroed accumulators.
    /// Slots saturate at `u64::MAX`.
    ///
    /// # Panics
    /// If `counts` is longer than the button list.
    pub fn simulate_counters(&self, counts: &[u64]) -> Vec<u64> {
        let mut slots = vec![0u64; self.light_count()];
        for (b, &count) in counts.iter().enumerate() {
            for &i in self.buttons[b].indices() {
                slots[i] = slots[i].saturating_add(count);
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_button_outside_light_range() {
        let err = Machine::new(vec![true], vec![vec![1]], vec![0]).unwrap_err();
        assert_eq!(err, MachineError::IndexOutOfRange { button: 0, index: 1, lights: 1 });
    }

    #[test]
    fn test_rejects_joltage_length_mismatch() {
        let err = Machine::new(vec![true, false], vec![vec![0]], vec![1]).unwrap_err();
        assert_eq!(err, MachineError::DimensionMismatch { lights: 2, joltage: 1 });
    }

    #[test]
    fn test_accepts_noop_button() {
        let m = Machine::new(vec![false], vec![vec![]], vec![0]).unwrap();
        assert!(m.buttons()[0].is_noop());
    }

    #[test]
    fn test_target_mask_and_simulation() {
        let m = Machine::new(
            vec![false, true, true, false],
            vec![vec![3], vec![1, 3], vec![2], vec![2, 3], vec![0, 2], vec![0, 1]],
            vec![3, 5, 4, 7],
        )
        .unwrap();
        assert_eq!(m.target_mask(), Some(0b0110));
        assert_eq!(m.simulate_toggles(&[4, 5]), vec![false, true, true, false]);
        assert_eq!(m.simulate_counters(&[1, 3, 0, 3, 1, 2]), vec![3, 5, 4, 7]);
    }

    #[test]
    fn test_counter_simulation_saturates() {
        let m = Machine::new(vec![false], vec![vec![0], vec![0]], vec![0]).unwrap();
        assert_eq!(m.simulate_counters(&[u64::MAX, 1]), vec![u64::MAX]);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Machine = serde_json::from_str(
            r#"{"target_lights":[true,false],"buttons":[[1,0],[1]],"joltage":[2,3]}"#,
        )
        .unwrap();
        assert_eq!(ok.buttons()[0].indices(), &[0, 1]);

        let bad = serde_json::from_str::<Machine>(
            r#"{"target_lights":[true],"buttons":[[1]],"joltage":[0]}"#,
        );
        assert!(bad.unwrap_err().to_string().contains("references position 1"));
    }

    #[test]
    fn test_serialize_round_trips_through_validation() {
        let m = Machine::new(vec![true, true], vec![vec![0], vec![0, 1]], vec![1, 1]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: Machine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
