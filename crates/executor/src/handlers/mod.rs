//! Command handlers, one module per command group.

pub mod config;
pub mod records;
pub mod seed;
