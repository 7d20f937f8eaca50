//! Subprocess-backed interpreter.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, info};

use super::{Interpreter, InterpreterError, InterpreterResult};
use crate::ansi::{split_records, DEFAULT_END_OF_RECORD};

/// Runs an interpreter program once per batch.
///
/// All sources go to stdin joined by line feeds. The program prints each
/// command's output followed by (or separated by) the end-of-record marker.
#[derive(Debug, Clone)]
pub struct ProcessInterpreter {
    program: String,
    args: Vec<String>,
    end_of_record: String,
}

impl ProcessInterpreter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            end_of_record: DEFAULT_END_OF_RECORD.to_string(),
        }
    }

    /// Use a different end-of-record marker.
    pub fn with_end_of_record(mut self, marker: impl Into<String>) -> Self {
        self.end_of_record = marker.into();
        self
    }

    pub fn end_of_record(&self) -> &str {
        &self.end_of_record
    }

    /// Run the program and return its normalized stdout.
    fn run(&self, input: String) -> InterpreterResult<String> {
        info!(program = %self.program, args = ?self.args, "Starting interpreter");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| InterpreterError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from a separate thread so a chatty interpreter
        // cannot block on a full stdout pipe while we are still writing.
        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        let write_result = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));

        if !output.status.success() {
            return Err(InterpreterError::ExitCode {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match write_result {
            // The program may legitimately stop reading early
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("Interpreter closed stdin before reading all input")
            }
            other => other?,
        }

        let stdout = String::from_utf8_lossy(&output.stdout).replace("\r\n", "\n");
        debug!(bytes = stdout.len(), "Interpreter finished");
        Ok(stdout)
    }
}

impl Interpreter for ProcessInterpreter {
    fn name(&self) -> &str {
        &self.program
    }

    fn evaluate(&self, sources: &[String]) -> InterpreterResult<Vec<String>> {
        let mut input = sources.join("\n");
        input.push('\n');

        let stdout = self.run(input)?;
        let records = split_records(&stdout, &self.end_of_record, sources.len())?;
        Ok(records.into_iter().map(str::to_string).collect())
    }
}
