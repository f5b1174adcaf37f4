//! gridasm-validate - Pre-run validation tool for solution files
//!
//! # Usage
//!
//! ```bash
//! # Validate a single solution file
//! gridasm-validate code/echo.json
//!
//! # Validate every .json file in a directory
//! gridasm-validate code/
//!
//! # Verbose output with instruction counts
//! gridasm-validate -v code/
//! ```
//!
//! # Exit Codes
//!
//! - 0: All files validated successfully
//! - 1: One or more files failed validation
//! - 2: Invalid arguments or IO error

use std::path::Path;
use std::process::ExitCode;

use gridasm::validate::{validate_directory, validate_solution_file, ValidationResult};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut verbose = false;
    let mut paths = Vec::new();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            _ if arg.starts_with('-') => {
                eprintln!("Unknown option: {}\n", arg);
                print_help();
                return ExitCode::from(2);
            }
            _ => paths.push(arg.clone()),
        }
    }

    if paths.is_empty() {
        eprintln!("Error: No path specified\n");
        print_help();
        return ExitCode::from(2);
    }

    let mut all_results = Vec::new();

    for path_str in &paths {
        let path = Path::new(path_str);

        if !path.exists() {
            eprintln!("Error: Path does not exist: {}", path.display());
            return ExitCode::from(2);
        }

        if path.is_file() {
            let result = validate_solution_file(path);
            print_result(&result, verbose);
            all_results.push(result);
        } else if path.is_dir() {
            match validate_directory(path) {
                Ok(results) => {
                    for result in &results {
                        print_result(result, verbose);
                    }
                    all_results.extend(results);
                }
                Err(e) => {
                    eprintln!("Error reading directory {}: {}", path.display(), e);
                    return ExitCode::from(2);
                }
            }
        }
    }

    let failed = all_results.iter().filter(|r| r.is_err()).count();
    eprintln!();
    eprintln!("{} files checked, {} failed", all_results.len(), failed);

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_result(result: &ValidationResult, verbose: bool) {
    match result {
        ValidationResult::Ok { path, programs } => {
            if verbose {
                let instructions: usize = programs.iter().map(|p| p.len()).sum();
                let used = programs.iter().filter(|p| !p.is_empty()).count();
                println!(
                    "+ {} ({} nodes, {} instrs)",
                    path.display(),
                    used,
                    instructions
                );
            } else {
                println!("+ {}", path.display());
            }
        }
        ValidationResult::Err { path, error } => {
            eprintln!("x {}", path.display());
            eprintln!("  {}", error);
        }
    }
}

fn print_help() {
    eprintln!("gridasm-validate - Validate solution files");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    gridasm-validate [OPTIONS] <PATH>...");
    eprintln!();
    eprintln!("ARGS:");
    eprintln!("    <PATH>    Solution file or directory of .json solutions");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -v, --verbose    Show node and instruction counts");
    eprintln!("    -h, --help       Print this help message");
    eprintln!();
    eprintln!("EXIT CODES:");
    eprintln!("    0    All files validated successfully");
    eprintln!("    1    One or more files failed validation");
    eprintln!("    2    Invalid arguments or IO error");
}
