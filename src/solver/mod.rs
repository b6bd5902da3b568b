//! Minimum-press solvers for both machine models.
//!
//! `toggle` (with the `gf2` fallback) answers the light pattern question;
//! `joltage` formulates the accumulator question as an integer program and hands
//! it to `branch_bound`, which drives the `simplex` relaxation.
pub mod branch_bound;
mod gf2;
pub mod joltage;
pub mod problem;
pub mod simplex;
pub mod toggle;

pub use joltage::{solve_joltage, JoltagePlan};
pub use toggle::{solve_toggle, TogglePlan};
