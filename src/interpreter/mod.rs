//! Interpreter bridge.
//!
//! The demo's output comes from an external interpreter that evaluates every
//! command in one batch. The [`Interpreter`] trait hides how that happens so
//! the rest of the pipeline can run against canned output.

mod process;

pub use process::ProcessInterpreter;

use crate::ansi::ParseError;

/// Errors from evaluating a batch of commands.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    #[error("Failed to start interpreter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Interpreter exited with code {code}: {stderr}")]
    ExitCode { code: i32, stderr: String },

    #[error("Interpreter I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Records(#[from] ParseError),
}

pub type InterpreterResult<T> = Result<T, InterpreterError>;

/// Evaluates a batch of sources and returns one output per source.
pub trait Interpreter {
    /// Human-readable name for logs and errors.
    fn name(&self) -> &str;

    /// Evaluate every source in order.
    ///
    /// The returned vector has exactly one (possibly empty) output per
    /// source, still containing the interpreter's ANSI sequences.
    fn evaluate(&self, sources: &[String]) -> InterpreterResult<Vec<String>>;
}

/// Interpreter returning fixed output, for tests.
#[derive(Debug, Clone, Default)]
pub struct CannedInterpreter {
    outputs: Vec<String>,
}

impl CannedInterpreter {
    pub fn new(outputs: Vec<String>) -> Self {
        Self { outputs }
    }
}

impl Interpreter for CannedInterpreter {
    fn name(&self) -> &str {
        "canned"
    }

    fn evaluate(&self, sources: &[String]) -> InterpreterResult<Vec<String>> {
        if self.outputs.len() != sources.len() {
            return Err(ParseError::RecordCount {
                expected: sources.len(),
                actual: self.outputs.len(),
            }
            .into());
        }
        Ok(self.outputs.clone())
    }
}
