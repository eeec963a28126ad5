//! Session state - the master set and scan ledger, backed by the native store.

use std::path::PathBuf;

use packlist_config::Settings;
use packlist_engine::{MasterRecord, ScanLedger};

use crate::CliError;

pub struct AppState {
    pub master: Vec<MasterRecord>,
    pub ledger: ScanLedger,
    path: PathBuf,
}

impl AppState {
    /// Load both record sets from the configured store. A missing store is
    /// an empty session.
    pub fn load(settings: &Settings) -> Result<Self, CliError> {
        let path = settings.data_path();
        let (master, packing) = packlist_io::store::load(&path)
            .map_err(|e| CliError::store(format!("cannot load {}: {e}", path.display())))?;
        Ok(Self {
            master,
            ledger: ScanLedger::from_records(packing),
            path,
        })
    }

    /// Persist both record sets. Called after every mutation to either set.
    pub fn save(&self) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CliError::store(format!("cannot create {}: {e}", parent.display())))?;
        }
        packlist_io::store::save(&self.path, &self.master, self.ledger.all())
            .map_err(|e| CliError::store(format!("cannot save {}: {e}", self.path.display())))
    }
}
