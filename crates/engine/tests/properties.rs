use proptest::prelude::*;

use chrono::NaiveDate;
use packlist_engine::model::normalize_carton;
use packlist_engine::{group_master, report_for, submit_scan, MasterRecord, ScanContext, ScanLedger, ScanOutcome};

fn master_records() -> impl Strategy<Value = Vec<MasterRecord>> {
    // Small pools of group fields so records actually share batches; carton
    // numbers are made unique by index.
    prop::collection::vec((0usize..3, 0usize..3, 0usize..2, 0usize..2, 1u32..50), 1..40).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (s, p, c, z, qty))| MasterRecord {
                    id: format!("m-{:06}", i + 1),
                    style: format!("S{s}"),
                    po: format!("PO{p}"),
                    color: format!("COL{c}"),
                    size: format!("Z{z}"),
                    carton_no: format!("CTN-{i:04}"),
                    qty: qty as f64,
                    destination: "US".into(),
                })
                .collect()
        },
    )
}

fn ctx() -> ScanContext {
    ScanContext {
        line: "L-01".into(),
        date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
    }
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in "\\PC{0,12}") {
        let once = normalize_carton(&raw);
        prop_assert_eq!(normalize_carton(&once), once);
    }

    #[test]
    fn grouping_partitions_every_record(records in master_records()) {
        let set = group_master(&records);
        let total: usize = set.iter().map(|b| b.cartons.len()).sum();
        prop_assert_eq!(total, records.len());
    }

    #[test]
    fn grouping_is_idempotent_on_keys(records in master_records()) {
        let set = group_master(&records);
        let flattened: Vec<MasterRecord> = set
            .iter()
            .flat_map(|b| {
                b.cartons.iter().map(|carton| MasterRecord {
                    id: String::new(),
                    style: b.style.clone(),
                    po: b.po.clone(),
                    color: b.color.clone(),
                    size: b.size.clone(),
                    carton_no: carton.clone(),
                    qty: 0.0,
                    destination: b.destination.clone(),
                })
            })
            .collect();
        let regrouped = group_master(&flattened);

        prop_assert_eq!(regrouped.len(), set.len());
        for (a, b) in set.iter().zip(regrouped.iter()) {
            prop_assert_eq!(a.key(), b.key());
            prop_assert_eq!(&a.cartons, &b.cartons);
        }
    }

    #[test]
    fn duplicate_scans_never_grow_the_ledger_twice(
        records in master_records(),
        scans in prop::collection::vec((0usize..40, " ?"), 0..80),
    ) {
        let batches = group_master(&records);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();
        let mut accepted = std::collections::HashSet::new();

        for (idx, pad) in scans {
            let Some(record) = records.get(idx % records.len()) else { continue };
            let raw = format!("{pad}{}{pad}", record.carton_no.to_lowercase());
            match submit_scan(&raw, Some(batch), &records, &mut ledger, &ctx()) {
                Some(ScanOutcome::Accepted(p)) => {
                    // First acceptance only, and always in normalized form.
                    prop_assert!(accepted.insert(p.carton_no.clone()));
                }
                Some(ScanOutcome::Duplicate { carton_no }) => {
                    prop_assert!(accepted.contains(&carton_no));
                }
                _ => {}
            }
        }
        prop_assert_eq!(ledger.len(), accepted.len());
    }

    #[test]
    fn partition_holds_for_batch_only_scans(records in master_records(), take in 0usize..40) {
        let batches = group_master(&records);
        let batch = batches.iter().next().unwrap();
        let mut ledger = ScanLedger::new();

        for carton in batch.cartons.iter().take(take) {
            submit_scan(carton, Some(batch), &records, &mut ledger, &ctx());
        }

        // Tightened matching: count only scanned cartons that belong to this
        // batch's carton list, since the reporter's packed_count also picks
        // up same-style/PO entries from sibling size batches.
        let scanned: std::collections::HashSet<String> = ledger
            .all()
            .iter()
            .map(|p| normalize_carton(&p.carton_no))
            .collect();
        let packed_tight = batch
            .cartons
            .iter()
            .filter(|c| scanned.contains(&normalize_carton(c)))
            .count();
        let report = report_for(batch, &ledger);
        prop_assert_eq!(report.missing_cartons.len() + packed_tight, batch.cartons.len());
    }
}
