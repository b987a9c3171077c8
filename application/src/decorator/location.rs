use super::{Decorated, Decoration};
use crate::location::consume_location;
use crate::target::LogTarget;
use chainlog_domain::EntryMeta;
use std::sync::Arc;

/// Prefixes each message with the call site marked by [`crate::log_at!`].
///
/// The pending location is consumed, so it applies to one entry only.
/// Messages without a pending location pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationDecoration;

impl Decoration for LocationDecoration {
    fn kind(&self) -> &'static str {
        "location"
    }

    fn decorate(&self, message: &str, _meta: &EntryMeta) -> String {
        match consume_location() {
            Some(location) => format!("[{location}] {message}"),
            None => message.to_string(),
        }
    }

    fn provides_location(&self) -> bool {
        true
    }
}

pub type LocationDecorator = Decorated<LocationDecoration>;

impl LocationDecorator {
    pub fn decorate(target: Arc<dyn LogTarget>) -> Arc<dyn LogTarget> {
        Arc::new(Decorated::new(target, LocationDecoration))
    }
}
