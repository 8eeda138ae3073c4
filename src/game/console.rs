//! Line-oriented console used by every state handler.
//!
//! Reads come from any `BufRead` and writes go to any `Write`, so the game runs
//! against stdin/stdout in the binary and against in-memory buffers in tests.

use std::io::{self, BufRead, Write};

use log::debug;

pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Console { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Print without a trailing newline and flush, for inline prompts.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Read the next line, trimmed and lowercased. `None` on end of input.
    /// Bytes that are not UTF-8 are replaced, so garbage reads as an
    /// unrecognised choice rather than an error.
    pub fn read_choice(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            debug!("console: end of input");
            return Ok(None);
        }
        let choice = normalize(&String::from_utf8_lossy(&raw));
        debug!("console: read {:?}", choice);
        Ok(Some(choice))
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

/// Trim and lowercase, collapsing inner runs of whitespace so "pick   up" matches.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
