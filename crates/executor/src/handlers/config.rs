//! Database and configuration command handlers.
//!
//! Handles Ping, Info, ConfigGet and ConfigSetPageSize.

use std::sync::Arc;

use crate::bridge::Backends;
use crate::output::{CollectionInfo, DatabaseInfo};
use crate::{Output, Result};

/// Handle Ping command.
pub fn ping() -> Result<Output> {
    Ok(Output::Pong {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle Info command: row counts of every known collection.
pub fn info(p: &Arc<Backends>) -> Result<Output> {
    let collections = p
        .db
        .collections()
        .into_iter()
        .map(|c| CollectionInfo {
            count: p.db.count(&c),
            name: c.to_string(),
        })
        .collect();
    Ok(Output::DatabaseInfo(DatabaseInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        access_mode: p.db.access_mode(),
        collections,
    }))
}

/// Handle ConfigGet command: return the current configuration.
pub fn config_get(p: &Arc<Backends>) -> Result<Output> {
    Ok(Output::Config(p.db.config()))
}

/// Handle ConfigSetPageSize command.
pub fn config_set_page_size(p: &Arc<Backends>, page_size: usize) -> Result<Output> {
    p.db.update_config(|cfg| {
        cfg.page_size = page_size;
    })
    .map_err(crate::Error::from)?;
    Ok(Output::Unit)
}
