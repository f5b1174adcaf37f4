//! gridasm-eval — runs a level's reference solution against fresh inputs.
//!
//! Loads a level definition and a solution file, draws a new input sequence
//! for every IN stream, runs the machine to quiescence and prints the
//! streams it saw and produced.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gridasm-eval -- levels/echo.json code/echo.json
//! ```

use std::process::ExitCode;

use gridasm::{eval, level, Stream};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: gridasm-eval <level.json> <solution.json>");
        return ExitCode::from(2);
    }

    match evaluate_level(&args[1], &args[2]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn evaluate_level(level_path: &str, solution_path: &str) -> anyhow::Result<()> {
    let lvl = level::load_level(level_path)?;
    let reference = level::load_solution(solution_path)?;

    println!("{}", lvl.title);
    if !lvl.description.is_empty() {
        println!("{}", lvl.description);
    }
    println!();

    let (inputs, expected) = eval::expected_outputs(&lvl, &reference)?;

    for stream in &inputs {
        print_stream("in", stream);
    }
    for stream in &expected {
        print_stream("expected", stream);
    }

    Ok(())
}

fn print_stream(kind: &str, stream: &Stream) {
    let name = stream.name.as_deref().unwrap_or("-");
    println!("  {:>8} [{}] {}: {:?}", kind, stream.index, name, stream.values);
}
