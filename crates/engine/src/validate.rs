use crate::ledger::ScanLedger;
use crate::model::{
    normalize_carton, Batch, MasterRecord, PackingRecord, RejectReason, ScanContext, ScanOutcome,
};

/// Validate one scanned carton against the active batch and the ledger.
///
/// Checks run in strict order; the first match wins:
/// 1. no active batch → `Rejected(NoBatchSelected)`
/// 2. blank identifier → `None` (no outcome; the caller ignores the scan)
/// 3. identifier not in the master set → `Rejected(NotInMaster)`
/// 4. master style/PO differ from the active batch → `Rejected(WrongBatch)`,
///    carrying the carton's actual PO
/// 5. carton already in the ledger, any batch → `Duplicate`
/// 6. otherwise → `Accepted`, and the new record is appended to the ledger
///
/// The ordering is part of the contract: a garbage scan with no batch
/// selected must report the missing selection, not the unknown carton.
/// Each call is a single atomic decision; the master set is never mutated.
pub fn submit_scan(
    raw_carton: &str,
    active: Option<&Batch>,
    master: &[MasterRecord],
    ledger: &mut ScanLedger,
    ctx: &ScanContext,
) -> Option<ScanOutcome> {
    let Some(batch) = active else {
        return Some(ScanOutcome::Rejected(RejectReason::NoBatchSelected));
    };

    let carton_no = normalize_carton(raw_carton);
    if carton_no.is_empty() {
        return None;
    }

    let Some(info) = master
        .iter()
        .find(|m| normalize_carton(&m.carton_no) == carton_no)
    else {
        return Some(ScanOutcome::Rejected(RejectReason::NotInMaster { carton_no }));
    };

    if info.style != batch.style || info.po != batch.po {
        return Some(ScanOutcome::Rejected(RejectReason::WrongBatch {
            carton_no,
            actual_po: info.po.clone(),
        }));
    }

    if ledger.find_by_carton(&carton_no).is_some() {
        return Some(ScanOutcome::Duplicate { carton_no });
    }

    // Denormalized copy from the matched master record, not from the batch;
    // per check 4 they agree on style/PO, and the master row carries the
    // authoritative color/size/destination for this carton.
    let record = PackingRecord {
        id: ledger.next_id(),
        date: ctx.date,
        line: ctx.line.clone(),
        carton_no,
        style: info.style.clone(),
        po: info.po.clone(),
        color: info.color.clone(),
        size: info.size.clone(),
        destination: info.destination.clone(),
    };
    ledger.append(record.clone());
    Some(ScanOutcome::Accepted(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_master;
    use chrono::NaiveDate;

    fn master(style: &str, po: &str, carton: &str) -> MasterRecord {
        MasterRecord {
            id: format!("m-{carton}"),
            style: style.into(),
            po: po.into(),
            color: "Red".into(),
            size: "M".into(),
            carton_no: carton.into(),
            qty: 10.0,
            destination: "US".into(),
        }
    }

    fn ctx() -> ScanContext {
        ScanContext {
            line: "L-01".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        }
    }

    #[test]
    fn no_batch_selected_precedes_existence_check() {
        let master_set = vec![master("S1", "PO1", "C1")];
        let mut ledger = ScanLedger::new();
        // Carton not in master data AND no batch selected: the selection
        // check must win.
        let outcome = submit_scan("UNKNOWN", None, &master_set, &mut ledger, &ctx());
        assert_eq!(
            outcome,
            Some(ScanOutcome::Rejected(RejectReason::NoBatchSelected))
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn blank_carton_is_a_silent_no_op() {
        let master_set = vec![master("S1", "PO1", "C1")];
        let batches = group_master(&master_set);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();
        assert_eq!(submit_scan("   ", Some(batch), &master_set, &mut ledger, &ctx()), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn unknown_carton_rejected() {
        let master_set = vec![master("S1", "PO1", "C1")];
        let batches = group_master(&master_set);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();
        let outcome = submit_scan("C9", Some(batch), &master_set, &mut ledger, &ctx());
        assert_eq!(
            outcome,
            Some(ScanOutcome::Rejected(RejectReason::NotInMaster { carton_no: "C9".into() }))
        );
    }

    #[test]
    fn wrong_batch_reports_the_cartons_actual_po() {
        let master_set = vec![master("S1", "PO1", "C1"), master("S2", "PO2", "C2")];
        let batches = group_master(&master_set);
        let batch_s1 = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();
        let outcome = submit_scan("C2", Some(batch_s1), &master_set, &mut ledger, &ctx());
        let Some(ScanOutcome::Rejected(reason @ RejectReason::WrongBatch { .. })) = &outcome else {
            panic!("expected WrongBatch, got {outcome:?}");
        };
        assert!(reason.to_string().contains("PO2"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn accept_then_duplicate_grows_ledger_by_exactly_one() {
        let master_set = vec![master("S1", "PO1", "C1")];
        let batches = group_master(&master_set);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();

        let first = submit_scan("c1", Some(batch), &master_set, &mut ledger, &ctx());
        assert!(matches!(first, Some(ScanOutcome::Accepted(_))));
        assert_eq!(ledger.len(), 1);

        let second = submit_scan("C1", Some(batch), &master_set, &mut ledger, &ctx());
        assert_eq!(second, Some(ScanOutcome::Duplicate { carton_no: "C1".into() }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn scan_normalizes_case_and_whitespace() {
        let master_set = vec![master("S1", "PO1", "AB-001")];
        let batches = group_master(&master_set);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();

        let outcome = submit_scan(" ab-001 ", Some(batch), &master_set, &mut ledger, &ctx());
        let Some(ScanOutcome::Accepted(record)) = &outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert_eq!(record.carton_no, "AB-001");
    }

    #[test]
    fn accepted_record_copies_master_fields_and_session_context() {
        let mut m = master("S1", "PO1", "C1");
        m.color = "Green".into();
        m.size = "XL".into();
        m.destination = "DE".into();
        let master_set = vec![m];
        let batches = group_master(&master_set);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();

        let outcome = submit_scan("C1", Some(batch), &master_set, &mut ledger, &ctx());
        let Some(ScanOutcome::Accepted(record)) = outcome else {
            panic!("expected acceptance");
        };
        assert_eq!(record.id, "pk-000001");
        assert_eq!(record.line, "L-01");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
        assert_eq!(record.color, "Green");
        assert_eq!(record.size, "XL");
        assert_eq!(record.destination, "DE");
    }

    #[test]
    fn duplicate_detected_across_batches() {
        // C1 accepted for S1/PO1; scanning it again with S1/PO1 active from
        // a rebuilt batch set must still be a duplicate.
        let master_set = vec![master("S1", "PO1", "C1"), master("S1", "PO1", "C2")];
        let batches = group_master(&master_set);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();

        submit_scan("C1", Some(batch), &master_set, &mut ledger, &ctx());
        let rebuilt = group_master(&master_set);
        let batch = rebuilt.iter().next().unwrap();
        let outcome = submit_scan("C1", Some(batch), &master_set, &mut ledger, &ctx());
        assert!(matches!(outcome, Some(ScanOutcome::Duplicate { .. })));
    }
}
