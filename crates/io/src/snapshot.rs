// JSON backup snapshot

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use packlist_engine::{MasterRecord, PackingRecord};

/// Both record sets, verbatim. Import replaces both wholesale, no merge.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub master: Vec<MasterRecord>,
    pub packing: Vec<PackingRecord>,
}

/// Write a backup snapshot of both record sets.
pub fn export(path: &Path, master: &[MasterRecord], packing: &[PackingRecord]) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);

    let snapshot = Snapshot {
        master: master.to_vec(),
        packing: packing.to_vec(),
    };
    serde_json::to_writer_pretty(writer, &snapshot).map_err(|e| e.to_string())?;

    Ok(())
}

/// Read a backup snapshot.
pub fn import(path: &Path) -> Result<Snapshot, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| format!("invalid snapshot: {e}"))
}
