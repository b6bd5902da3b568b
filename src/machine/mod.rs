//! The immutable machine description shared by both solvers.
pub mod button;
pub mod error;
pub mod model;
pub mod parse;

// Re-export key types for convenient access
pub use button::Button;
pub use error::{MachineError, ParseError};
pub use model::Machine;
pub use parse::parse_machines;
