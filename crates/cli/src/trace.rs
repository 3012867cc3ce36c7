//! Streaming trace reader.
//!
//! One instruction per non-blank line:
//!
//! ```text
//! <hex address> <op code> <dest> <src1> <src2>
//! ```
//!
//! Registers are decimal in `[0, 32)`, with `-1` for "none". Op codes `0`, `1`
//! and `2` select the functional-unit class (`-1` is accepted as class 1).
//! Lines are parsed lazily as dispatch pulls them, so arbitrarily long traces
//! run in constant memory.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use procsim_core::common::ConfigError;
use procsim_core::isa::{Instruction, InstructionSource};
use thiserror::Error;
use tracing::warn;

/// A trace line that could not be turned into an instruction.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Reading the underlying stream failed.
    #[error("line {line}: read failed: {source}")]
    Io {
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Wrong number of fields.
    #[error("line {line}: expected 5 fields, found {found}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Fields present.
        found: usize,
    },

    /// A field is not a number.
    #[error("line {line}: invalid {field} `{text}`")]
    Number {
        /// 1-based line number.
        line: usize,
        /// Field name.
        field: &'static str,
        /// Offending text.
        text: String,
    },

    /// Numeric fields out of range.
    #[error("line {line}: {source}")]
    Instruction {
        /// 1-based line number.
        line: usize,
        /// Range error from the instruction constructor.
        source: ConfigError,
    },
}

/// Pulls instructions from a line-oriented trace.
///
/// The first malformed line ends the stream: the simulator sees end of trace,
/// drains what it already admitted, and the error is available from
/// [`TraceReader::take_error`] afterwards.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line: usize,
    buf: String,
    error: Option<TraceError>,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
            error: None,
        }
    }

    /// Takes ownership of the stored error.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.error.take()
    }

    /// Lines consumed so far, including blank ones.
    pub const fn lines_read(&self) -> usize {
        self.line
    }

    fn read_next(&mut self) -> Result<Option<Instruction>, TraceError> {
        loop {
            self.buf.clear();
            self.line += 1;
            let n = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|source| TraceError::Io {
                    line: self.line,
                    source,
                })?;
            if n == 0 {
                self.line -= 1;
                return Ok(None);
            }
            if self.buf.trim().is_empty() {
                continue;
            }
            return parse_line(&self.buf, self.line).map(Some);
        }
    }
}

impl<R: BufRead> InstructionSource for TraceReader<R> {
    fn next_instruction(&mut self) -> Option<Instruction> {
        if self.error.is_some() {
            return None;
        }
        match self.read_next() {
            Ok(inst) => inst,
            Err(err) => {
                warn!(%err, "trace stopped");
                self.error = Some(err);
                None
            }
        }
    }
}

/// Parses one non-blank trace line.
pub fn parse_line(text: &str, line: usize) -> Result<Instruction, TraceError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [address, op, dest, src1, src2] = fields[..] else {
        return Err(TraceError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    let address = u32::from_str_radix(digits, 16).map_err(|_| TraceError::Number {
        line,
        field: "address",
        text: address.to_owned(),
    })?;

    let number = |field: &'static str, text: &str| {
        text.parse::<i32>().map_err(|_| TraceError::Number {
            line,
            field,
            text: text.to_owned(),
        })
    };

    Instruction::from_raw(
        address,
        number("op code", op)?,
        number("dest", dest)?,
        number("src1", src1)?,
        number("src2", src2)?,
    )
    .map_err(|source| TraceError::Instruction { line, source })
}

/// Opens the trace at `path`, or standard input when `None`.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}
