//! `packlist-engine` — carton packing reconciliation engine.
//!
//! Pure engine crate: owns the in-memory master set and scan ledger,
//! returns classified scan outcomes and reconciliation reports.
//! No CLI or IO dependencies.

pub mod group;
pub mod import;
pub mod ledger;
pub mod model;
pub mod report;
pub mod validate;

pub use group::{group_master, BatchSet};
pub use import::{merge_master, parse_import_text, MasterDraft};
pub use ledger::ScanLedger;
pub use model::{Batch, BatchKey, MasterRecord, PackingRecord, ScanContext, ScanOutcome};
pub use report::{compute_summary, report_for, BatchReport, PackSummary};
pub use validate::submit_scan;
