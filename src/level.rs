//! Level definitions - JSON level and solution files
//!
//! A level file describes the puzzle: a title, the node layout, and the
//! streams crossing the machine boundary. A solution file is a JSON array
//! of twelve node programs. A [`LevelStore`] pairs the two directories the
//! way the service lays them out on disk:
//!
//! ```text
//! levels/<name>.json     level definition
//! code/<name>.json       reference solution
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::emu::{NodeCode, Stream};

/// Whether a grid cell accepts a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    Compute,
    Damaged,
}

/// One cell of the level layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLayout {
    pub index: u8,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

/// A complete level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub layout: Vec<NodeLayout>,
    pub streams: Vec<Stream>,
}

/// Load one level definition file
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelSpec> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read level {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed level {}", path.display()))
}

/// Load a twelve-entry solution file
pub fn load_solution<P: AsRef<Path>>(path: P) -> Result<Vec<NodeCode>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read solution {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed solution {}", path.display()))
}

/// Level names available in a directory: the file stems of its entries
pub fn list_levels<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list levels in {}", dir.display()))?;

    let mut levels = Vec::new();
    for entry in entries {
        let entry = entry?;
        if let Some(stem) = entry.path().file_stem() {
            levels.push(stem.to_string_lossy().into_owned());
        }
    }
    levels.sort();
    Ok(levels)
}

/// Paired level and reference-solution directories
#[derive(Debug, Clone)]
pub struct LevelStore {
    level_dir: PathBuf,
    code_dir: PathBuf,
}

impl LevelStore {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(level_dir: P, code_dir: Q) -> Self {
        Self {
            level_dir: level_dir.into(),
            code_dir: code_dir.into(),
        }
    }

    /// Available level names
    pub fn levels(&self) -> Result<Vec<String>> {
        list_levels(&self.level_dir)
    }

    /// The level definition for `name`
    pub fn level(&self, name: &str) -> Result<LevelSpec> {
        load_level(self.level_dir.join(name).with_extension("json"))
    }

    /// The reference solution for `name`
    pub fn reference(&self, name: &str) -> Result<Vec<NodeCode>> {
        load_solution(self.code_dir.join(name).with_extension("json"))
    }
}
