//! `packlist batches` / `status` / `report` / `export`.

use std::path::PathBuf;

use serde::Serialize;

use packlist_config::Settings;
use packlist_engine::{compute_summary, group_master, report_for, BatchReport, BatchSet};

use crate::exit_codes::EXIT_REPORT_INCOMPLETE;
use crate::state::AppState;
use crate::CliError;

fn filtered_batches(state: &AppState, filter: Option<&str>) -> BatchSet {
    let batches = group_master(&state.master);
    match filter {
        Some(needle) => batches.filtered(needle),
        None => batches,
    }
}

pub fn cmd_batches(filter: Option<String>, json: bool) -> Result<(), CliError> {
    let settings = Settings::load();
    let state = AppState::load(&settings)?;
    let batches = filtered_batches(&state, filter.as_deref());

    if json {
        let all: Vec<_> = batches.iter().collect();
        println!("{}", serde_json::to_string_pretty(&all)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?);
        return Ok(());
    }

    for (i, batch) in batches.iter().enumerate() {
        println!(
            "{:>3}. {}  -> {}  ({} cartons, qty {})",
            i + 1,
            batch.key(),
            batch.destination,
            batch.cartons.len(),
            batch.total_qty,
        );
    }
    eprintln!("{} batch(es)", batches.len());
    Ok(())
}

pub fn cmd_status(json: bool) -> Result<(), CliError> {
    let settings = Settings::load();
    let state = AppState::load(&settings)?;
    let batches = group_master(&state.master);
    let summary = compute_summary(&state.master, &batches, &state.ledger);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?);
        return Ok(());
    }

    println!("total order : {} cartons", summary.total_cartons);
    println!("packed      : {} cartons", summary.packed);
    println!("pending     : {} cartons", summary.pending);
    println!("batches     : {} ({} complete)", summary.batches, summary.batches_complete);
    Ok(())
}

/// One report row as emitted by `report --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportEntry<'a> {
    style: &'a str,
    po: &'a str,
    color: &'a str,
    size: &'a str,
    destination: &'a str,
    total: usize,
    #[serde(flatten)]
    report: BatchReport,
}

pub fn cmd_report(filter: Option<String>, json: bool) -> Result<(), CliError> {
    let settings = Settings::load();
    let state = AppState::load(&settings)?;
    let batches = filtered_batches(&state, filter.as_deref());

    let mut incomplete = 0usize;
    let mut entries = Vec::with_capacity(batches.len());
    for batch in batches.iter() {
        let report = report_for(batch, &state.ledger);
        if !report.is_complete {
            incomplete += 1;
        }
        entries.push(ReportEntry {
            style: &batch.style,
            po: &batch.po,
            color: &batch.color,
            size: &batch.size,
            destination: &batch.destination,
            total: batch.cartons.len(),
            report,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?);
    } else {
        for e in &entries {
            if e.report.is_complete {
                println!(
                    "{} / {} / {} / {}  packed {}/{}  complete",
                    e.style, e.po, e.color, e.size, e.report.packed_count, e.total,
                );
            } else {
                println!(
                    "{} / {} / {} / {}  packed {}/{}  missing {}: {}",
                    e.style,
                    e.po,
                    e.color,
                    e.size,
                    e.report.packed_count,
                    e.total,
                    e.report.missing_cartons.len(),
                    e.report.missing_cartons.join(", "),
                );
            }
        }
    }

    eprintln!(
        "{} batch(es) - {} complete, {} incomplete",
        entries.len(),
        entries.len() - incomplete,
        incomplete,
    );

    if incomplete > 0 {
        return Err(CliError {
            code: EXIT_REPORT_INCOMPLETE,
            message: String::new(), // summary already on stderr
            hint: None,
        });
    }
    Ok(())
}

pub fn cmd_export(output: PathBuf, filter: Option<String>) -> Result<(), CliError> {
    let settings = Settings::load();
    let state = AppState::load(&settings)?;
    let batches = filtered_batches(&state, filter.as_deref());

    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" => packlist_io::export::export_xlsx(&output, &batches, &state.ledger)
            .map_err(CliError::export)?,
        "csv" => packlist_io::export::export_csv(&output, &batches, &state.ledger)
            .map_err(CliError::export)?,
        other => {
            return Err(CliError::args(format!(
                "unsupported export format \"{other}\" (expected .xlsx or .csv)"
            )));
        }
    }

    eprintln!("wrote {} ({} batches)", output.display(), batches.len());
    Ok(())
}
