//! Core business entities.

pub mod access_log;
pub mod link;

pub use access_log::NewAccessLog;
pub use link::{Link, NewLink};
