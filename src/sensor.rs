//! Raw sample sources
//!
//! The ADC driver is an external collaborator; the engine only consumes
//! [`SampleSource`]. [`ReplaySource`] feeds recorded readings, one integer
//! per line, for offline runs.

use crate::error::SensorError;
use std::io::BufRead;

/// Source of raw microphone readings
pub trait SampleSource {
    /// Read the next averaged sample
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    fn read_sample(&mut self) -> Result<Option<u16>, SensorError>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Replays raw readings from a text stream
///
/// Blank lines and lines starting with `#` are ignored. In lenient mode
/// malformed lines are skipped with a warning instead of failing the run.
pub struct ReplaySource<R> {
    reader: R,
    name: String,
    line: usize,
    lenient: bool,
    buffer: String,
}

impl<R: BufRead> ReplaySource<R> {
    /// Create a strict replay source
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line: 0,
            lenient: false,
            buffer: String::new(),
        }
    }

    /// Skip malformed lines instead of failing
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> SampleSource for ReplaySource<R> {
    fn read_sample(&mut self) -> Result<Option<u16>, SensorError> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buffer.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            match text.parse::<u16>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) if self.lenient => {
                    log::warn!(
                        "{}: skipping malformed sample on line {}: '{}'",
                        self.name,
                        self.line,
                        text
                    );
                }
                Err(_) => {
                    return Err(SensorError::InvalidSample {
                        line: self.line,
                        value: text.to_string(),
                    })
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
