use super::{Decorated, Decoration};
use crate::target::LogTarget;
use chainlog_domain::EntryMeta;
use std::sync::Arc;

/// Prefixes each message with `[LEVEL] `.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelDecoration;

impl Decoration for LevelDecoration {
    fn kind(&self) -> &'static str {
        "leveled"
    }

    fn decorate(&self, message: &str, meta: &EntryMeta) -> String {
        format!("[{}] {}", meta.level, message)
    }
}

pub type LevelDecorator = Decorated<LevelDecoration>;

impl LevelDecorator {
    pub fn decorate(target: Arc<dyn LogTarget>) -> Arc<dyn LogTarget> {
        Arc::new(Decorated::new(target, LevelDecoration))
    }
}
