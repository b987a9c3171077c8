use chainlog_application::{Sink, SinkError};
use std::io::{self, Write};

/// Sink writing to standard output.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn append(&self, text: &str) -> Result<(), SinkError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
