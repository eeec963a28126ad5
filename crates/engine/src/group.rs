use rustc_hash::FxHashMap;

use crate::model::{Batch, BatchKey, MasterRecord};

/// Shippable batches derived from the master set, in first-seen order.
///
/// Iteration order is the insertion order of each group's first record;
/// report and export rows follow it. Keyed lookup is O(1).
#[derive(Debug, Default, Clone)]
pub struct BatchSet {
    batches: Vec<Batch>,
    index: FxHashMap<BatchKey, usize>,
}

impl BatchSet {
    pub fn get(&self, key: &BatchKey) -> Option<&Batch> {
        self.index.get(key).map(|&i| &self.batches[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// A new set holding only the batches whose style or PO contains
    /// `needle`, case-insensitively, keeping their relative order. An empty
    /// needle matches everything.
    pub fn filtered(&self, needle: &str) -> BatchSet {
        let needle = needle.to_lowercase();
        let mut out = BatchSet::default();
        for batch in &self.batches {
            if batch.po.to_lowercase().contains(&needle)
                || batch.style.to_lowercase().contains(&needle)
            {
                out.index.insert(batch.key(), out.batches.len());
                out.batches.push(batch.clone());
            }
        }
        out
    }
}

/// Partition the master set into batches keyed by (style, po, color, size).
///
/// Pure function of the master set, O(n). Each batch carries the
/// destination of the first record seen for its key; later records that
/// disagree are not corrected.
pub fn group_master(records: &[MasterRecord]) -> BatchSet {
    let mut set = BatchSet::default();

    for record in records {
        let key = BatchKey::of(record);
        let idx = match set.index.get(&key).copied() {
            Some(i) => i,
            None => {
                set.batches.push(Batch {
                    style: record.style.clone(),
                    po: record.po.clone(),
                    color: record.color.clone(),
                    size: record.size.clone(),
                    destination: record.destination.clone(),
                    cartons: Vec::new(),
                    total_qty: 0.0,
                });
                set.index.insert(key, set.batches.len() - 1);
                set.batches.len() - 1
            }
        };
        let batch = &mut set.batches[idx];
        batch.cartons.push(record.carton_no.clone());
        batch.total_qty += record.qty;
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master(style: &str, po: &str, color: &str, size: &str, carton: &str, qty: f64, dest: &str) -> MasterRecord {
        MasterRecord {
            id: format!("m-{carton}"),
            style: style.into(),
            po: po.into(),
            color: color.into(),
            size: size.into(),
            carton_no: carton.into(),
            qty,
            destination: dest.into(),
        }
    }

    #[test]
    fn groups_by_all_four_fields() {
        let records = vec![
            master("S1", "PO1", "Red", "M", "C1", 10.0, "US"),
            master("S1", "PO1", "Red", "M", "C2", 5.0, "US"),
            master("S1", "PO1", "Red", "L", "C3", 8.0, "US"),
        ];
        let set = group_master(&records);
        assert_eq!(set.len(), 2);

        let m = set
            .get(&BatchKey {
                style: "S1".into(),
                po: "PO1".into(),
                color: "Red".into(),
                size: "M".into(),
            })
            .unwrap();
        assert_eq!(m.cartons, vec!["C1", "C2"]);
        assert_eq!(m.total_qty, 15.0);
    }

    #[test]
    fn first_seen_order_preserved() {
        let records = vec![
            master("S2", "PO9", "Blue", "L", "C1", 1.0, "UK"),
            master("S1", "PO1", "Red", "M", "C2", 1.0, "US"),
            master("S2", "PO9", "Blue", "L", "C3", 1.0, "UK"),
        ];
        let set = group_master(&records);
        let styles: Vec<&str> = set.iter().map(|b| b.style.as_str()).collect();
        assert_eq!(styles, vec!["S2", "S1"]);
    }

    #[test]
    fn first_seen_destination_wins() {
        let records = vec![
            master("S1", "PO1", "Red", "M", "C1", 1.0, "US"),
            master("S1", "PO1", "Red", "M", "C2", 1.0, "UK"),
        ];
        let set = group_master(&records);
        assert_eq!(set.iter().next().unwrap().destination, "US");
    }

    #[test]
    fn separator_characters_in_fields_do_not_collide() {
        // "a|b" + "c" and "a" + "b|c" would collide under string-concat keys.
        let records = vec![
            master("a|b", "c", "x", "y", "C1", 1.0, "US"),
            master("a", "b|c", "x", "y", "C2", 1.0, "US"),
        ];
        let set = group_master(&records);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn nan_qty_propagates_into_total() {
        let records = vec![
            master("S1", "PO1", "Red", "M", "C1", 10.0, "US"),
            master("S1", "PO1", "Red", "M", "C2", f64::NAN, "US"),
        ];
        let set = group_master(&records);
        assert!(set.iter().next().unwrap().total_qty.is_nan());
    }

    #[test]
    fn filtered_matches_style_or_po() {
        let records = vec![
            master("JKT-01", "PO-771", "Red", "M", "C1", 1.0, "US"),
            master("TEE-02", "PO-802", "Blue", "L", "C2", 1.0, "UK"),
        ];
        let set = group_master(&records);
        assert_eq!(set.filtered("jkt").len(), 1);
        assert_eq!(set.filtered("802").len(), 1);
        assert_eq!(set.filtered("").len(), 2);
        assert_eq!(set.filtered("zzz").len(), 0);

        // The filtered set keeps keyed lookup working.
        let sub = set.filtered("jkt");
        assert!(sub
            .get(&BatchKey {
                style: "JKT-01".into(),
                po: "PO-771".into(),
                color: "Red".into(),
                size: "M".into(),
            })
            .is_some());
    }
}
