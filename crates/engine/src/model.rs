use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One row of the expected manifest. Created only by bulk import, never
/// mutated, deleted only by full reset/restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterRecord {
    pub id: String,
    pub style: String,
    pub po: String,
    pub color: String,
    pub size: String,
    pub carton_no: String,
    /// NaN when the imported quantity field was not a number. Malformed
    /// rows propagate as-is instead of being rejected at import time.
    #[serde(with = "qty_as_null")]
    pub qty: f64,
    pub destination: String,
}

/// One accepted scan. Style/PO/color/size/destination are copied from the
/// matching master record at accept time so the ledger stays self-describing
/// even if master data is later replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingRecord {
    pub id: String,
    pub date: NaiveDate,
    pub line: String,
    pub carton_no: String,
    pub style: String,
    pub po: String,
    pub color: String,
    pub size: String,
    pub destination: String,
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Grouping key for shippable batches. A struct key, so field values
/// containing any would-be separator character cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BatchKey {
    pub style: String,
    pub po: String,
    pub color: String,
    pub size: String,
}

impl BatchKey {
    pub fn of(record: &MasterRecord) -> Self {
        Self {
            style: record.style.clone(),
            po: record.po.clone(),
            color: record.color.clone(),
            size: record.size.clone(),
        }
    }
}

impl std::fmt::Display for BatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {} / {}", self.style, self.po, self.color, self.size)
    }
}

/// All master cartons sharing one (style, po, color, size). Derived from the
/// master set on every read, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub style: String,
    pub po: String,
    pub color: String,
    pub size: String,
    /// Destination of the first record seen for this key. Records that
    /// disagree on destination keep the first-seen value, silently.
    pub destination: String,
    /// Carton numbers in master-set order.
    pub cartons: Vec<String>,
    #[serde(with = "qty_as_null")]
    pub total_qty: f64,
}

impl Batch {
    pub fn key(&self) -> BatchKey {
        BatchKey {
            style: self.style.clone(),
            po: self.po.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan outcomes
// ---------------------------------------------------------------------------

/// Session context supplied by the caller with each scan: which production
/// line is scanning and the capture date.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub line: String,
    pub date: NaiveDate,
}

/// Classified result of a single scan submission. Scan failures are values,
/// never errors; no outcome mutates the master set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The scan was valid; the record has been appended to the ledger.
    Accepted(PackingRecord),
    /// The scan does not correspond to a valid, matching master carton.
    Rejected(RejectReason),
    /// The carton is valid but already in the ledger.
    Duplicate { carton_no: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NoBatchSelected,
    NotInMaster { carton_no: String },
    /// The carton exists but belongs to a different style/PO than the active
    /// batch. Carries the carton's actual PO as operator guidance.
    WrongBatch { carton_no: String, actual_po: String },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoBatchSelected => write!(f, "no batch selected"),
            Self::NotInMaster { carton_no } => {
                write!(f, "carton {carton_no} not in master data")
            }
            Self::WrongBatch { carton_no, actual_po } => {
                write!(f, "wrong batch: carton {carton_no} belongs to PO {actual_po}")
            }
        }
    }
}

impl std::fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted(record) => write!(f, "carton {} accepted", record.carton_no),
            Self::Rejected(reason) => write!(f, "{reason}"),
            Self::Duplicate { carton_no } => write!(f, "carton {carton_no} already scanned"),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Canonical form of an operator-entered carton number: trimmed, uppercased.
/// All carton comparisons engine-wide use this form.
pub fn normalize_carton(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// ---------------------------------------------------------------------------
// Quantity serialization
// ---------------------------------------------------------------------------

/// JSON has no NaN. A malformed quantity is written as `null` and read back
/// as NaN, so snapshots round-trip without losing the defect marker.
pub mod qty_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(qty: &f64, ser: S) -> Result<S::Ok, S::Error> {
        if qty.is_nan() {
            ser.serialize_none()
        } else {
            ser.serialize_some(qty)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(de)?.unwrap_or(f64::NAN))
    }
}
