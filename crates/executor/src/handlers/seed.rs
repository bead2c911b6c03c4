//! Seed command handler.

use std::sync::Arc;

use roster_engine::Seeder;

use crate::bridge::Backends;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle Seed command: upsert synthetic rows through the record backend.
pub fn seed(p: &Arc<Backends>, seed: u64) -> Result<Output> {
    let report = convert_result(Seeder::new(seed).seed_all(p.backend.as_ref()))?;
    Ok(Output::Seeded(report))
}
