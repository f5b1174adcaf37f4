//! # Gridasm - Assembly Grid Emulator
//!
//! The evaluation engine of a node-programming puzzle game: a 4×3 mesh of
//! tiny assembly machines that talk through blocking ports, fed from input
//! streams at the top edge and judged by the output streams they emit at
//! the bottom edge.
//!
//! ## Core Components
//!
//! - **Parser**: per-node programs in a `MOV/ADD/SUB/J*/SAV/SWP/NEG/RES`
//!   dialect, labels resolved at parse time
//! - **Node**: one instruction per tick; `ACC`/`BAK` registers saturating
//!   at ±999, cursor wrap, four geographic ports
//! - **Port arbitration**: rendezvous handshakes, with fixed `ANY` search
//!   orders on the reader and writer side
//! - **Driver**: deterministic tick order and quiescence detection (five
//!   consecutive fully-blocked ticks end the run)
//!
//! ## Design Principles
//!
//! - Nodes live in one arena; ports hold indices, never references
//! - Output streams are scoped to a single run, so runs never alias
//! - Given identical streams and programs, `run` is bit-deterministic
//!
//! ## Example
//!
//! ```ignore
//! use gridasm::{emu, level, eval};
//!
//! let lvl = level::load_level("levels/echo.json")?;
//! let reference = level::load_solution("code/echo.json")?;
//!
//! // Fresh inputs + the outputs the reference solution produces
//! let (inputs, expected) = eval::expected_outputs(&lvl, &reference)?;
//!
//! // Judge a player's submission against them
//! let report = eval::evaluate(&lvl, &submission, &inputs, &expected);
//! assert!(report.check_status);
//! ```

// Emulator core - parser, nodes, port arbitration, grid driver
pub mod emu;
pub use emu::{
    check, parse_program, run, Dir, Instruction, Machine, NodeCode, Op, Operand, ParseError,
    Stream, StreamType,
};

// Error types
mod error;
pub use error::{GridasmError, Result};

// Level and solution files
pub mod level;
pub use level::{list_levels, load_level, load_solution, LevelSpec, LevelStore, NodeLayout, NodeType};

// Input generation and submission judging
pub mod eval;
pub use eval::{evaluate, expected_outputs, generate_values, EvalReport};

// Batch validation of solution files
pub mod validate;
pub use validate::{validate_directory, validate_solution_file, ValidationError, ValidationResult};
