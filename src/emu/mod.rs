//! Emulator core - the asynchronous multi-node assembly machine
//!
//! A machine is a 4×3 mesh of compute nodes, each running a short assembly
//! program one instruction per tick. Nodes talk through blocking ports:
//! a port `MOV` holds the writer in place until a neighbour reads the value,
//! and the whole machine stops once every active node has reported itself
//! blocked for five consecutive ticks.
//!
//! ## Pipeline
//!
//! ```text
//! [Stream]s + [NodeCode]s
//!       │ parse
//!       ▼
//! Machine ── input stubs ── compute grid ── output stubs
//!       │ tick until quiescent
//!       ▼
//! [Stream]s (OUT, populated by RES)
//! ```
//!
//! ## Node dialect
//!
//! ```text
//! START: MOV UP, ACC      ; read one value from above
//!        JEZ SKIP
//!        JLZ SKIP
//!        MOV ACC, DOWN    ; forward positives only
//! SKIP:  JMP START
//! ```
//!
//! Operands are immediates or addresses (`UP DOWN LEFT RIGHT NIL ACC ANY
//! LAST`); `ANY` arbitrates over the geographic ports with a fixed search
//! order, `LAST` re-targets the peer the previous `ANY` picked.

mod instruction;
mod machine;
mod node;
mod parser;
mod stream;

pub use instruction::{Dir, Instruction, Op, Operand};
pub use machine::{run, Machine};
pub use node::{saturate, Node, NodeId, Pending};
pub use parser::{parse_program, ParseError, Parser};
pub use stream::{check, NodeCode, Stream, StreamType};

/// Number of compute nodes in the grid
pub const NODE_COUNT: usize = 12;

/// Compute nodes per grid row
pub const GRID_WIDTH: usize = 4;

/// Grid rows
pub const GRID_HEIGHT: usize = 3;

/// Smallest value ACC can hold
pub const MIN_ACC: i16 = -999;

/// Largest value ACC can hold
pub const MAX_ACC: i16 = 999;

/// Consecutive fully-blocked ticks before the machine counts as quiescent
pub const QUIESCENT_TICKS: usize = 5;

/// Values drawn per generated input stream
pub const STREAM_LENGTH: usize = 30;
