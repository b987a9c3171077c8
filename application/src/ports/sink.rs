//! Port for terminal log destinations.
//!
//! A [`Sink`] durably records raw text: it performs no framing and no
//! buffering beyond "write now". Entry boundaries are decided by the logger
//! chain, which appends the terminator as ordinary text.
//!
//! Sinks are always called while the emission lock is held, so an
//! implementation never sees fragments of two entries interleaved.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a sink
#[derive(Error, Debug)]
pub enum SinkError {
    /// The sink's medium could not be opened; fatal at construction.
    #[error("Could not open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Sink write failed: {0}")]
    Write(#[from] io::Error),
}

/// Port for appending raw text to a log medium.
pub trait Sink: Send + Sync {
    /// Append `text` to the medium and flush it.
    fn append(&self, text: &str) -> Result<(), SinkError>;
}

/// Sink that discards everything, for when output is not wanted.
pub struct NullSink;

impl Sink for NullSink {
    fn append(&self, _text: &str) -> Result<(), SinkError> {
        Ok(())
    }
}
