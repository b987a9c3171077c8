//! Call-site location tracking.
//!
//! Each thread has one pending-location slot. [`log_at!`](crate::log_at)
//! fills it with the invoking file and line; a location decorator further
//! down the chain consumes it when the entry terminates. Whatever is still
//! pending when an entry ends is discarded with it.

use crate::decorator::has_location_capability;
use crate::statement::Statement;
use crate::target::LogTarget;
use chainlog_domain::{Location, UsageError};
use std::cell::RefCell;

thread_local! {
    static PENDING_LOCATION: RefCell<Option<Location>> = const { RefCell::new(None) };
}

/// Store the calling thread's pending location, replacing any previous one.
pub fn mark_location(file: &str, line: u32) {
    PENDING_LOCATION.with(|slot| *slot.borrow_mut() = Some(Location::new(file, line)));
}

/// Take the calling thread's pending location, leaving the slot empty.
pub fn consume_location() -> Option<Location> {
    PENDING_LOCATION.with(|slot| slot.borrow_mut().take())
}

pub fn pending_location() -> Option<Location> {
    PENDING_LOCATION.with(|slot| slot.borrow().clone())
}

/// Start a statement that records its call site.
///
/// Fails before touching the slot when no target in the chain renders
/// locations, since the location would otherwise be silently dropped.
pub fn locate<'a>(
    target: &'a dyn LogTarget,
    file: &str,
    line: u32,
) -> Result<Statement<'a>, UsageError> {
    if !has_location_capability(target) {
        return Err(UsageError::MissingLocationDecorator {
            target: target.name().to_string(),
        });
    }
    mark_location(file, line);
    Ok(Statement::new(target))
}

/// Start a statement tagged with the invoking file and line.
///
/// Evaluates to `Result<Statement, UsageError>`; the target's chain must
/// contain a location decorator.
///
/// ```ignore
/// log_at!(logger)?.warning().push("disk almost full");
/// ```
#[macro_export]
macro_rules! log_at {
    ($target:expr) => {
        $crate::location::locate($crate::Emit::target(&*$target), file!(), line!())
    };
}
