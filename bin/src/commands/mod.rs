//! CLI command implementations.

pub(crate) mod demo;
pub(crate) mod lines;
