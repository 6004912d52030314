use crate::error::{HandlerError, ValidationError};
use std::io::{BufRead, Write};

/// The operator's terminal: one input stream, one stream for prompts and
/// results, one for error messages.
pub struct Console<R, W, E> {
    pub input: R,
    pub out: W,
    pub err: E,
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Console { input, out, err }
    }

    /// Prints `prompt` and reads one line without its line terminator.
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, HandlerError> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(HandlerError::InputClosed);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Asks until `parse` accepts the answer. Each rejection is reported on
    /// the error stream and the same prompt is shown again.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, HandlerError> {
        loop {
            let raw = self.read_line(prompt)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => self.report(&e)?,
            }
        }
    }

    /// Asks exactly once; a rejected answer aborts the caller.
    pub fn ask_once<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, HandlerError> {
        let raw = self.read_line(prompt)?;
        Ok(parse(&raw)?)
    }

    pub fn say(&mut self, text: &str) -> Result<(), HandlerError> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn report(&mut self, error: &dyn std::fmt::Display) -> Result<(), HandlerError> {
        writeln!(self.err, "{}", error)?;
        self.err.flush()?;
        Ok(())
    }

    pub fn banner(&mut self, title: &str) -> Result<(), HandlerError> {
        let rule = "*".repeat(55);
        write!(self.out, "\n\n{rule}\n              {title}\n{rule}\n\n")?;
        Ok(())
    }
}
