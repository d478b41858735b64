//! Operator-facing output of a placement attempt.

use dialer_core::CallResult;
use std::io::{self, Write};

/// Writes the outcome, or the classified failure, as the final lines on `out`.
pub fn write_report<W: Write>(out: &mut W, result: &CallResult) -> io::Result<()> {
    match result {
        Ok(outcome) => writeln!(out, "{}", outcome),
        Err(err) => writeln!(out, "{}", err),
    }
}
