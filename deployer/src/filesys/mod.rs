//! Filesystem helpers

pub mod file;
pub mod resolve;
