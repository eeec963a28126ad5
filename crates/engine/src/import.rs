use serde::Serialize;

use crate::model::MasterRecord;

/// Candidate master record parsed from one import row, before an identifier
/// is assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDraft {
    pub style: String,
    pub po: String,
    pub color: String,
    pub size: String,
    pub carton_no: String,
    #[serde(with = "crate::model::qty_as_null")]
    pub qty: f64,
    pub destination: String,
}

/// Parse pasted tabular text into candidate master records.
///
/// Lines that are empty after trimming are dropped. Each surviving line is
/// split on tabs into exactly 7 positional fields: style, po, color, size,
/// carton number, quantity, destination. This is a raw split (no quoting,
/// no escaping) because the rows come straight out of a spreadsheet copy.
/// Short rows are not rejected: missing trailing fields become empty
/// strings, and garbage surfaces in the preview rather than being blocked.
///
/// Quantity parsing is deliberately lenient: an absent or non-numeric field
/// yields NaN, a blank field yields 0. The NaN propagates into the master
/// set as-is, a known data-quality defect that is preserved, not repaired.
///
/// Output order mirrors input line order; the caller assigns identifiers.
pub fn parse_import_text(raw: &str) -> Vec<MasterDraft> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            let field = |i: usize| fields.get(i).map_or(String::new(), |f| f.to_string());
            MasterDraft {
                style: field(0),
                po: field(1),
                color: field(2),
                size: field(3),
                carton_no: field(4),
                qty: parse_qty(fields.get(5).copied()),
                destination: field(6),
            }
        })
        .collect()
}

/// Number-coercion rules for the quantity column: missing → NaN, blank → 0,
/// otherwise a float parse with NaN on failure.
fn parse_qty(field: Option<&str>) -> f64 {
    match field {
        None => f64::NAN,
        Some(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
    }
}

/// Assign identifiers to drafts and append them to the master set.
///
/// Append semantics: existing records are preserved, new ones are added,
/// and there is no de-duplication across imports. Ids continue the
/// sequence from the current set length; the master set only ever grows or
/// is replaced wholesale, so the sequence cannot collide.
pub fn merge_master(master: &mut Vec<MasterRecord>, drafts: Vec<MasterDraft>) {
    for draft in drafts {
        let id = format!("m-{:06}", master.len() + 1);
        master.push(MasterRecord {
            id,
            style: draft.style,
            po: draft.po,
            color: draft.color,
            size: draft.size,
            carton_no: draft.carton_no,
            qty: draft.qty,
            destination: draft.destination,
        });
    }
}
