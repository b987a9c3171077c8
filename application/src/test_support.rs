//! Sinks and helpers shared by the unit tests of this crate.

use crate::logger::Logger;
use crate::ports::sink::{Sink, SinkError};
use chainlog_domain::ConfigRegistry;
use std::io;
use std::sync::{Arc, Mutex};

/// Sink remembering every append call.
#[derive(Default)]
pub struct RecordingSink {
    appends: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn appends(&self) -> Vec<String> {
        self.appends.lock().unwrap().clone()
    }

    pub fn contents(&self) -> String {
        self.appends.lock().unwrap().concat()
    }

    /// Completed entries, without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Sink for RecordingSink {
    fn append(&self, text: &str) -> Result<(), SinkError> {
        self.appends.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Sink whose medium always rejects writes.
pub struct FailingSink;

impl Sink for FailingSink {
    fn append(&self, _text: &str) -> Result<(), SinkError> {
        Err(SinkError::Write(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "medium closed",
        )))
    }
}

pub fn recording_logger(
    name: &str,
    config: Arc<ConfigRegistry>,
) -> (Arc<Logger>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let logger = Logger::shared(name, sink.clone(), config);
    (logger, sink)
}
