//! Player command pipeline
//!
//! Line -> parse_command -> Command -> apply_move -> MoveOutcome

pub mod parser;
pub mod resolver;

pub use parser::{parse_command, Command, MoveError, EXIT_COMMAND};
pub use resolver::{apply_attack, apply_move, check_gate, MoveOutcome};
