//! Validation utilities for solution files
//!
//! Provides batch validation with per-node error reporting.
//!
//! # Example
//!
//! ```ignore
//! use gridasm::validate::{validate_directory, ValidationResult};
//!
//! for result in validate_directory("path/to/solutions")? {
//!     match result {
//!         ValidationResult::Ok { path, programs } => {
//!             println!("✓ {}: {} instructions",
//!                 path.display(),
//!                 programs.iter().map(|p| p.len()).sum::<usize>());
//!         }
//!         ValidationResult::Err { path, error } => {
//!             eprintln!("✗ {}: {}", path.display(), error);
//!         }
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::emu::{parse_program, Instruction, NodeCode, ParseError, NODE_COUNT};

/// Result of validating a single solution file
#[derive(Debug)]
pub enum ValidationResult {
    /// Every node program parsed
    Ok {
        path: PathBuf,
        programs: Vec<Vec<Instruction>>,
    },
    /// The file failed to load or a node program failed to parse
    Err { path: PathBuf, error: ValidationError },
}

impl ValidationResult {
    /// Returns true if validation succeeded
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns true if validation failed
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err { .. })
    }

    /// Get the path
    pub fn path(&self) -> &Path {
        match self {
            Self::Ok { path, .. } => path,
            Self::Err { path, .. } => path,
        }
    }
}

/// Validation error with context
#[derive(Debug)]
pub struct ValidationError {
    /// Node index the error belongs to (if the file itself was readable)
    pub node: Option<u8>,
    /// Line number within the node program (if available)
    pub line: Option<usize>,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(node) = self.node {
            write!(f, "node {}: ", node)?;
        }
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        write!(f, "{}", self.message)
    }
}

impl From<std::io::Error> for ValidationError {
    fn from(e: std::io::Error) -> Self {
        Self {
            node: None,
            line: None,
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            node: None,
            line: None,
            message: e.to_string(),
        }
    }
}

/// Validate a single solution file
pub fn validate_solution_file<P: AsRef<Path>>(path: P) -> ValidationResult {
    let path = path.as_ref().to_path_buf();

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            return ValidationResult::Err {
                path,
                error: e.into(),
            };
        }
    };

    let code: Vec<NodeCode> = match serde_json::from_str(&raw) {
        Ok(code) => code,
        Err(e) => {
            return ValidationResult::Err {
                path,
                error: e.into(),
            };
        }
    };

    if code.len() != NODE_COUNT {
        return ValidationResult::Err {
            path,
            error: ValidationError {
                node: None,
                line: None,
                message: format!("expected {} node programs, got {}", NODE_COUNT, code.len()),
            },
        };
    }

    let mut programs = Vec::with_capacity(code.len());
    for node in &code {
        match parse_program(&node.code) {
            Ok(program) => programs.push(program),
            Err(ParseError { line, message }) => {
                return ValidationResult::Err {
                    path,
                    error: ValidationError {
                        node: Some(node.index),
                        line: Some(line),
                        message,
                    },
                };
            }
        }
    }

    ValidationResult::Ok { path, programs }
}

/// Validate every `.json` file in a directory
pub fn validate_directory<P: AsRef<Path>>(dir: P) -> std::io::Result<Vec<ValidationResult>> {
    let mut results = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            results.push(validate_solution_file(&path));
        }
    }
    results.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn solution_json(node0: &[&str]) -> String {
        let code: Vec<NodeCode> = (0..12)
            .map(|index| NodeCode {
                index: index as u8,
                code: if index == 0 {
                    node0.iter().map(|s| s.to_string()).collect()
                } else {
                    Vec::new()
                },
            })
            .collect();
        serde_json::to_string(&code).unwrap()
    }

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_validate_good_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "good.json",
            &solution_json(&["MOV UP, ACC", "ADD 1", "MOV ACC, DOWN"]),
        );

        let result = validate_solution_file(&path);
        assert!(result.is_ok());
        match result {
            ValidationResult::Ok { programs, .. } => {
                assert_eq!(programs[0].len(), 3);
                assert!(programs[1..].iter().all(|p| p.is_empty()));
            }
            ValidationResult::Err { error, .. } => panic!("unexpected error: {}", error),
        }
    }

    #[test]
    fn test_validate_bad_mnemonic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.json", &solution_json(&["FROB 1"]));

        match validate_solution_file(&path) {
            ValidationResult::Err { error, .. } => {
                assert_eq!(error.node, Some(0));
                assert_eq!(error.line, Some(1));
                assert!(error.to_string().contains("node 0"));
            }
            ValidationResult::Ok { .. } => panic!("expected a parse failure"),
        }
    }

    #[test]
    fn test_validate_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "short.json", r#"[{"index": 0, "code": []}]"#);

        match validate_solution_file(&path) {
            ValidationResult::Err { error, .. } => {
                assert!(error.message.contains("expected 12"));
            }
            ValidationResult::Ok { .. } => panic!("expected a shape failure"),
        }
    }

    #[test]
    fn test_validate_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.json", &solution_json(&["NOP"]));
        write_file(dir.path(), "b.json", &solution_json(&["BOGUS"]));
        write_file(dir.path(), "notes.txt", "not a solution");

        let results = validate_directory(dir.path()).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
