use super::{Decorated, Decoration, DecoratorError};
use crate::target::LogTarget;
use chainlog_domain::EntryMeta;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::sync::Arc;

/// Pattern used when none is configured.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefixes each message with the local time at termination, `[<time>] `.
#[derive(Debug, Clone)]
pub struct TimestampDecoration {
    format: String,
}

impl TimestampDecoration {
    /// Build a decoration for a strftime pattern, rejecting patterns chrono
    /// cannot render.
    pub fn new(format: impl Into<String>) -> Result<Self, DecoratorError> {
        let format = format.into();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(DecoratorError::InvalidTimestampFormat(format));
        }
        Ok(Self { format })
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for TimestampDecoration {
    fn default() -> Self {
        Self {
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Decoration for TimestampDecoration {
    fn kind(&self) -> &'static str {
        "timestamped"
    }

    fn decorate(&self, message: &str, _meta: &EntryMeta) -> String {
        format!("[{}] {}", Local::now().format(&self.format), message)
    }
}

pub type TimestampDecorator = Decorated<TimestampDecoration>;

impl TimestampDecorator {
    /// Decorate with [`DEFAULT_TIMESTAMP_FORMAT`].
    pub fn decorate(target: Arc<dyn LogTarget>) -> Arc<dyn LogTarget> {
        Arc::new(Decorated::new(target, TimestampDecoration::default()))
    }

    pub fn with_format(
        target: Arc<dyn LogTarget>,
        format: &str,
    ) -> Result<Arc<dyn LogTarget>, DecoratorError> {
        let decoration = TimestampDecoration::new(format)?;
        Ok(Arc::new(Decorated::new(target, decoration)))
    }
}
