//! Incremental JSON array scanner
//!
//! Walks a top-level JSON array through a `BufRead`, capturing the raw bytes
//! of one element at a time and handing them to serde_json. The scanner only
//! tracks enough structure (strings, escapes, bracket nesting, separators) to
//! find element boundaries; serde_json does the real parsing of each element.

use crate::types::JsonValue;
use std::io::{self, BufRead};
use thiserror::Error;

/// Failure while scanning the array
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{message} at byte {offset}")]
    Syntax { offset: u64, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    Start,
    FirstElement,
    NextElement,
    Finished,
}

/// Pull-based reader over the elements of a top-level JSON array
#[derive(Debug)]
pub struct JsonArrayReader<R> {
    reader: R,
    state: ArrayState,
    max_record_bytes: usize,
    /// Bytes of the element being captured
    buf: Vec<u8>,
    /// Bytes consumed from `reader`
    offset: u64,
}

fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn describe(b: u8) -> String {
    if b.is_ascii_graphic() {
        format!("'{}'", b as char)
    } else {
        format!("byte 0x{b:02x}")
    }
}

impl<R: BufRead> JsonArrayReader<R> {
    /// Create a reader over `reader` with a per-element size cap
    pub fn new(reader: R, max_record_bytes: usize) -> Self {
        Self {
            reader,
            state: ArrayState::Start,
            max_record_bytes,
            buf: Vec::new(),
            offset: 0,
        }
    }

    /// Bytes consumed so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether the array has been fully read or a failure has fused the reader
    pub fn is_finished(&self) -> bool {
        self.state == ArrayState::Finished
    }

    /// Read the next array element.
    ///
    /// Returns `Ok(None)` once the closing `]` (and only whitespace after it)
    /// has been read. After any error the reader is finished and keeps
    /// returning `Ok(None)`.
    pub fn next_value(&mut self) -> Result<Option<JsonValue>, ScanError> {
        let result = self.advance();
        if result.is_err() {
            self.state = ArrayState::Finished;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<JsonValue>, ScanError> {
        loop {
            match self.state {
                ArrayState::Finished => return Ok(None),
                ArrayState::Start => match self.skip_whitespace()? {
                    Some(b'[') => {
                        self.bump();
                        self.state = ArrayState::FirstElement;
                    }
                    Some(b) => {
                        return Err(self.syntax(format!(
                            "expected '[' at start of document, found {}",
                            describe(b)
                        )))
                    }
                    None => return Err(self.syntax("empty document, expected a JSON array")),
                },
                ArrayState::FirstElement => match self.skip_whitespace()? {
                    Some(b']') => {
                        self.bump();
                        return self.finish();
                    }
                    Some(_) => return self.element().map(Some),
                    None => return Err(self.syntax("unexpected end of input, array is not closed")),
                },
                ArrayState::NextElement => match self.skip_whitespace()? {
                    Some(b',') => {
                        self.bump();
                        self.skip_whitespace()?;
                        return self.element().map(Some);
                    }
                    Some(b']') => {
                        self.bump();
                        return self.finish();
                    }
                    Some(b) => {
                        return Err(self.syntax(format!(
                            "expected ',' or ']' after array element, found {}",
                            describe(b)
                        )))
                    }
                    None => return Err(self.syntax("unexpected end of input, array is not closed")),
                },
            }
        }
    }

    fn finish(&mut self) -> Result<Option<JsonValue>, ScanError> {
        self.state = ArrayState::Finished;
        match self.skip_whitespace()? {
            Some(b) => Err(self.syntax(format!(
                "trailing characters after array, found {}",
                describe(b)
            ))),
            None => Ok(None),
        }
    }

    fn element(&mut self) -> Result<JsonValue, ScanError> {
        let start = self.offset;
        self.buf.clear();

        match self.peek()? {
            Some(b'{' | b'[') => self.capture_container()?,
            Some(b'"') => {
                let quote = self.take()?;
                self.push(quote)?;
                self.capture_string_body()?;
            }
            Some(b @ (b']' | b'}' | b',')) => {
                return Err(self.syntax(format!("expected a value, found {}", describe(b))))
            }
            Some(_) => self.capture_scalar()?,
            None => return Err(self.syntax("unexpected end of input, expected a value")),
        }

        let value = serde_json::from_slice(&self.buf).map_err(|e| ScanError::Syntax {
            offset: start,
            message: format!("invalid array element ({e})"),
        })?;
        self.state = ArrayState::NextElement;
        Ok(value)
    }

    fn capture_container(&mut self) -> Result<(), ScanError> {
        let mut closers = Vec::new();
        loop {
            let b = self.take()?;
            self.push(b)?;
            match b {
                b'"' => self.capture_string_body()?,
                b'{' => closers.push(b'}'),
                b'[' => closers.push(b']'),
                b'}' | b']' => {
                    if closers.pop() != Some(b) {
                        return Err(self.syntax(format!("mismatched {}", describe(b))));
                    }
                    if closers.is_empty() {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    // The opening quote has already been captured.
    fn capture_string_body(&mut self) -> Result<(), ScanError> {
        let mut escaped = false;
        loop {
            let b = self.take()?;
            self.push(b)?;
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                return Ok(());
            }
        }
    }

    fn capture_scalar(&mut self) -> Result<(), ScanError> {
        while let Some(b) = self.peek()? {
            if b == b',' || b == b']' || is_json_whitespace(b) {
                break;
            }
            self.bump();
            self.push(b)?;
        }
        Ok(())
    }

    fn push(&mut self, b: u8) -> Result<(), ScanError> {
        if self.buf.len() >= self.max_record_bytes {
            return Err(self.syntax(format!(
                "array element exceeds {} bytes",
                self.max_record_bytes
            )));
        }
        self.buf.push(b);
        Ok(())
    }

    fn skip_whitespace(&mut self) -> Result<Option<u8>, ScanError> {
        while let Some(b) = self.peek()? {
            if !is_json_whitespace(b) {
                return Ok(Some(b));
            }
            self.bump();
        }
        Ok(None)
    }

    fn take(&mut self) -> Result<u8, ScanError> {
        match self.peek()? {
            Some(b) => {
                self.bump();
                Ok(b)
            }
            None => Err(self.syntax("unexpected end of input inside array element")),
        }
    }

    fn peek(&mut self) -> Result<Option<u8>, ScanError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(ScanError::Io(e)),
            }
        }
    }

    fn bump(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn syntax(&self, message: impl Into<String>) -> ScanError {
        ScanError::Syntax {
            offset: self.offset,
            message: message.into(),
        }
    }
}
