//! Storage layer for Roster
//!
//! Per-collection sharded record maps with a global write version.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;

pub use sharded::{Shard, ShardedStore};
