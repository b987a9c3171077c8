//! Core domain concepts shared across all subdomains.
//!
//! - [`level::LogLevel`]: ordered severity of an entry
//! - [`topic::Topic`]: free-text routing tag
//! - [`id::InstanceId`]: process-unique identity of a logger or decorator
//! - [`error`]: configuration and usage errors

pub mod error;
pub mod id;
pub mod level;
pub mod topic;
