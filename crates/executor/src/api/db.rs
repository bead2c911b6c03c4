//! Database operations: ping, info, configuration, seeding.

use super::{unexpected, Roster};
use crate::output::DatabaseInfo;
use crate::{Command, Output, Result};
use roster_engine::{RosterConfig, SeedReport};

impl Roster {
    /// Ping the database.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            other => unexpected("Ping", other),
        }
    }

    /// Collection counts and access mode.
    pub fn info(&self) -> Result<DatabaseInfo> {
        match self.executor.execute(Command::Info)? {
            Output::DatabaseInfo(info) => Ok(info),
            other => unexpected("Info", other),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> Result<RosterConfig> {
        match self.executor.execute(Command::ConfigGet)? {
            Output::Config(cfg) => Ok(cfg),
            other => unexpected("ConfigGet", other),
        }
    }

    /// Change the rows per page for sessions created afterwards.
    pub fn set_page_size(&self, page_size: usize) -> Result<()> {
        match self
            .executor
            .execute(Command::ConfigSetPageSize { page_size })?
        {
            Output::Unit => Ok(()),
            other => unexpected("ConfigSetPageSize", other),
        }
    }

    /// Fill every collection with synthetic rows.
    ///
    /// Seeding twice with the same seed rewrites the same rows.
    pub fn seed(&self, seed: u64) -> Result<SeedReport> {
        match self.executor.execute(Command::Seed { seed })? {
            Output::Seeded(report) => Ok(report),
            other => unexpected("Seed", other),
        }
    }
}
