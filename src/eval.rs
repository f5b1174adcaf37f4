//! Evaluation - generated inputs, reference runs and submission reports
//!
//! This is the seam the transport layer sits on: it turns a level plus a
//! reference solution into fresh inputs and expected outputs, and a level
//! plus a submission into a pass/fail report. Core errors never escape a
//! submission run; they collapse into `code_validation = false`.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::emu::{self, check, NodeCode, Stream, StreamType, STREAM_LENGTH};
use crate::error::Result;
use crate::level::LevelSpec;

/// Outcome of judging one submission against a level
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    /// False when the submission failed to parse or faulted mid-run
    pub code_validation: bool,
    /// True when every output stream matched the expected one
    pub check_status: bool,
    pub input: Vec<Stream>,
    pub expected: Vec<Stream>,
    pub output: Vec<Stream>,
}

/// `STREAM_LENGTH` samples drawn uniformly from `[min, max)`
pub fn generate_values(min: i16, max: i16) -> Vec<i16> {
    if max <= min {
        return vec![min; STREAM_LENGTH];
    }
    let mut rng = rand::thread_rng();
    (0..STREAM_LENGTH).map(|_| rng.gen_range(min..max)).collect()
}

/// Populate the level's IN streams with fresh values and run the reference
/// solution. Returns the generated inputs and the outputs they produce.
pub fn expected_outputs(
    level: &LevelSpec,
    reference: &[NodeCode],
) -> Result<(Vec<Stream>, Vec<Stream>)> {
    let mut streams = level.streams.clone();
    for stream in &mut streams {
        if stream.stream_type == StreamType::In {
            stream.values = generate_values(stream.min_value, stream.max_value);
        }
    }

    let expected = emu::run(&streams, reference)?;
    let inputs = streams
        .into_iter()
        .filter(|stream| stream.stream_type == StreamType::In)
        .collect();
    Ok((inputs, expected))
}

/// Run a submission against caller-supplied inputs and classify the result
pub fn evaluate(
    level: &LevelSpec,
    submission: &[NodeCode],
    inputs: &[Stream],
    expected: &[Stream],
) -> EvalReport {
    let mut streams = level.streams.clone();
    for stream in &mut streams {
        if stream.stream_type == StreamType::In {
            if let Some(input) = inputs.iter().find(|input| input.index == stream.index) {
                stream.values = input.values.clone();
            }
        }
    }

    match emu::run(&streams, submission) {
        Ok(output) => {
            let check_status = check(expected, &output);
            EvalReport {
                code_validation: true,
                check_status,
                input: inputs.to_vec(),
                expected: expected.to_vec(),
                output,
            }
        }
        Err(err) => {
            debug!(%err, "submission rejected");
            EvalReport {
                code_validation: false,
                check_status: false,
                input: inputs.to_vec(),
                expected: expected.to_vec(),
                output: Vec::new(),
            }
        }
    }
}
