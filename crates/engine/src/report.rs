use std::collections::HashSet;

use serde::Serialize;

use crate::group::BatchSet;
use crate::ledger::ScanLedger;
use crate::model::{normalize_carton, Batch, MasterRecord};

/// Reconciliation of one batch against the scan ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub packed_count: usize,
    pub missing_cartons: Vec<String>,
    pub is_complete: bool,
}

/// Diff a batch's expected cartons against the ledger.
///
/// Ledger entries count toward `packed_count` when their style and PO match
/// the batch; color and size are intentionally NOT compared, so two size
/// variants of one style/PO report their packed counts together. That is
/// coarser than the grouping key and a latent cross-size double count;
/// observed behavior, kept as-is rather than silently unified. Use
/// `ScanLedger::filter_by_group` with color/size for a tighter view.
///
/// Pure function; builds a set of scanned carton numbers once per call,
/// O(c + l).
pub fn report_for(batch: &Batch, ledger: &ScanLedger) -> BatchReport {
    let matched = ledger.filter_by_group(&batch.style, &batch.po, None, None);

    let scanned: HashSet<String> = matched
        .iter()
        .map(|p| normalize_carton(&p.carton_no))
        .collect();

    let missing_cartons: Vec<String> = batch
        .cartons
        .iter()
        .filter(|c| !scanned.contains(&normalize_carton(c)))
        .cloned()
        .collect();

    BatchReport {
        packed_count: matched.len(),
        is_complete: missing_cartons.is_empty(),
        missing_cartons,
    }
}

/// Aggregate counters across the whole session: the dashboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackSummary {
    /// Master rows (one per expected carton).
    pub total_cartons: usize,
    /// Ledger entries (one per accepted scan).
    pub packed: usize,
    /// Expected minus packed. The ledger only accepts master cartons, so
    /// this can only go negative after restoring a mismatched snapshot;
    /// clamped at zero.
    pub pending: usize,
    pub batches: usize,
    pub batches_complete: usize,
}

pub fn compute_summary(
    master: &[MasterRecord],
    batches: &BatchSet,
    ledger: &ScanLedger,
) -> PackSummary {
    let batches_complete = batches
        .iter()
        .filter(|b| report_for(b, ledger).is_complete)
        .count();

    PackSummary {
        total_cartons: master.len(),
        packed: ledger.len(),
        pending: master.len().saturating_sub(ledger.len()),
        batches: batches.len(),
        batches_complete,
    }
}
