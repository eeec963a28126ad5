// Reconciliation report export - CSV and XLSX

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use packlist_engine::{report_for, BatchSet, ScanLedger};

const HEADERS: [&str; 8] = [
    "STYLE", "PO", "COLOR", "SIZE", "TOTAL", "PACKED", "MISSING", "MISSING LIST",
];

/// One export row per batch, in the batch set's first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub style: String,
    pub po: String,
    pub color: String,
    pub size: String,
    pub total: usize,
    pub packed: usize,
    pub missing: usize,
    pub missing_list: String,
}

/// Reconcile every batch against the ledger and shape the result as rows.
pub fn report_rows(batches: &BatchSet, ledger: &ScanLedger) -> Vec<ReportRow> {
    batches
        .iter()
        .map(|batch| {
            let report = report_for(batch, ledger);
            ReportRow {
                style: batch.style.clone(),
                po: batch.po.clone(),
                color: batch.color.clone(),
                size: batch.size.clone(),
                total: batch.cartons.len(),
                packed: report.packed_count,
                missing: report.missing_cartons.len(),
                missing_list: report.missing_cartons.join(", "),
            }
        })
        .collect()
}

/// Export the reconciliation report as CSV.
pub fn export_csv(path: &Path, batches: &BatchSet, ledger: &ScanLedger) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;

    writer.write_record(HEADERS).map_err(|e| e.to_string())?;
    for row in report_rows(batches, ledger) {
        let total = row.total.to_string();
        let packed = row.packed.to_string();
        let missing = row.missing.to_string();
        writer
            .write_record([
                row.style.as_str(),
                row.po.as_str(),
                row.color.as_str(),
                row.size.as_str(),
                total.as_str(),
                packed.as_str(),
                missing.as_str(),
                row.missing_list.as_str(),
            ])
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())?;

    Ok(())
}

/// Export the reconciliation report as an XLSX workbook with a single
/// "PackingReport" sheet.
pub fn export_xlsx(path: &Path, batches: &BatchSet, ledger: &ScanLedger) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("PackingReport")
        .map_err(|e| format!("Failed to create sheet: {e}"))?;

    let bold = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| format!("Failed to write header: {e}"))?;
    }

    for (i, row) in report_rows(batches, ledger).iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet
            .write_string(r, 0, row.style.as_str())
            .and_then(|ws| ws.write_string(r, 1, row.po.as_str()))
            .and_then(|ws| ws.write_string(r, 2, row.color.as_str()))
            .and_then(|ws| ws.write_string(r, 3, row.size.as_str()))
            .and_then(|ws| ws.write_number(r, 4, row.total as f64))
            .and_then(|ws| ws.write_number(r, 5, row.packed as f64))
            .and_then(|ws| ws.write_number(r, 6, row.missing as f64))
            .and_then(|ws| ws.write_string(r, 7, row.missing_list.as_str()))
            .map_err(|e| format!("Failed to write row {r}: {e}"))?;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {e}"))?;

    Ok(())
}
