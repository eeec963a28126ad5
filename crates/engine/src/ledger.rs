use crate::model::{normalize_carton, PackingRecord};

/// Append-only ordered log of accepted scans; the source of truth for what
/// has been packed. Entry order is acceptance order. There is no removal
/// operation; correcting operator mistakes happens via restore, wholesale.
#[derive(Debug, Default, Clone)]
pub struct ScanLedger {
    entries: Vec<PackingRecord>,
}

impl ScanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted records, preserving their order.
    pub fn from_records(entries: Vec<PackingRecord>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, record: PackingRecord) {
        self.entries.push(record);
    }

    pub fn all(&self) -> &[PackingRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by carton number, comparing normalized forms.
    pub fn find_by_carton(&self, carton_no: &str) -> Option<&PackingRecord> {
        let wanted = normalize_carton(carton_no);
        self.entries
            .iter()
            .find(|p| normalize_carton(&p.carton_no) == wanted)
    }

    /// Entries matching a group. Style and PO are required; color and size
    /// narrow the match further when given.
    pub fn filter_by_group(
        &self,
        style: &str,
        po: &str,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Vec<&PackingRecord> {
        self.entries
            .iter()
            .filter(|p| {
                p.style == style
                    && p.po == po
                    && color.map_or(true, |c| p.color == c)
                    && size.map_or(true, |s| p.size == s)
            })
            .collect()
    }

    /// Id for the next appended entry. Entries are never removed and restore
    /// replaces the ledger wholesale, so the sequence cannot collide.
    pub fn next_id(&self) -> String {
        format!("pk-{:06}", self.entries.len() + 1)
    }

    pub fn into_records(self) -> Vec<PackingRecord> {
        self.entries
    }
}
