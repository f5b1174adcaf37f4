//! Stream and node-code transport types, plus the result comparator
//!
//! These are the wire shapes the machine is fed with: levels carry their
//! streams in JSON, submissions carry twelve blocks of raw program lines.

use serde::{Deserialize, Serialize};

/// Whether a stream feeds the top edge or leaves the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreamType {
    In,
    Out,
}

/// A named, indexed sequence of values crossing the machine boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub stream_type: StreamType,
    #[serde(default)]
    pub values: Vec<i16>,
    #[serde(default)]
    pub min_value: i16,
    #[serde(default)]
    pub max_value: i16,
}

impl Stream {
    /// Fresh OUT stream collecting RES emissions for `index`
    pub fn output(index: u8) -> Self {
        Self {
            index,
            name: None,
            stream_type: StreamType::Out,
            values: Vec::new(),
            min_value: 0,
            max_value: 0,
        }
    }
}

/// The raw program lines of one compute node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCode {
    pub index: u8,
    pub code: Vec<String>,
}

/// Stream-by-stream equality of expected vs produced outputs
pub fn check(expected: &[Stream], produced: &[Stream]) -> bool {
    if expected.len() != produced.len() {
        return false;
    }
    expected
        .iter()
        .zip(produced)
        .all(|(expected, produced)| expected.values == produced.values)
}
