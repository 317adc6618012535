//! Shared plumbing for the ratio graph workspace.
//!
//! Currently this is only the logging bootstrap: subscriber installation,
//! trace ids and span helpers used by the feed and graph runners.

pub mod logger;
