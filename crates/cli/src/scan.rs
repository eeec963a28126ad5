//! `packlist scan` / `packlist carton` — the operator-facing scan loop.

use std::io::BufRead;

use chrono::NaiveDate;

use packlist_config::Settings;
use packlist_engine::model::normalize_carton;
use packlist_engine::{group_master, submit_scan, Batch, BatchKey, BatchSet, ScanContext, ScanOutcome};

use crate::exit_codes::EXIT_SCAN_NOT_ACCEPTED;
use crate::state::AppState;
use crate::CliError;

/// Resolve the active batch from `--batch N` or the four key flags.
/// No selection at all is allowed; the engine then rejects every scan with
/// "no batch selected".
fn resolve_batch<'a>(
    batches: &'a BatchSet,
    index: Option<usize>,
    style: Option<String>,
    po: Option<String>,
    color: Option<String>,
    size: Option<String>,
) -> Result<Option<&'a Batch>, CliError> {
    let any_flag = style.is_some() || po.is_some() || color.is_some() || size.is_some();

    if let Some(n) = index {
        if any_flag {
            return Err(CliError::args(
                "pass either --batch or the --style/--po/--color/--size flags, not both",
            ));
        }
        if n == 0 || n > batches.len() {
            return Err(CliError::args(format!(
                "batch index {n} out of range (1-{})",
                batches.len()
            ))
            .with_hint("run `packlist batches` for the current list"));
        }
        return Ok(batches.iter().nth(n - 1));
    }

    if !any_flag {
        return Ok(None);
    }

    let (Some(style), Some(po), Some(color), Some(size)) = (style, po, color, size) else {
        return Err(CliError::args(
            "batch selection needs all of --style, --po, --color and --size",
        ));
    };
    let key = BatchKey { style, po, color, size };
    match batches.get(&key) {
        Some(batch) => Ok(Some(batch)),
        None => Err(CliError::args(format!("no batch matches {key}"))
            .with_hint("run `packlist batches` for the current list")),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_scan(
    batch: Option<usize>,
    style: Option<String>,
    po: Option<String>,
    color: Option<String>,
    size: Option<String>,
    line: Option<String>,
    date: Option<String>,
    json: bool,
    cartons: Vec<String>,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let mut state = AppState::load(&settings)?;

    let batches = group_master(&state.master);
    let active = resolve_batch(&batches, batch, style, po, color, size)?;

    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| CliError::args(format!("cannot parse date '{raw}' (expected YYYY-MM-DD)")))?,
        None => chrono::Local::now().date_naive(),
    };
    let ctx = ScanContext {
        line: line.unwrap_or_else(|| settings.default_line.clone()),
        date,
    };

    if let Some(batch) = active {
        eprintln!("batch: {} -> {} ({} cartons expected)", batch.key(), batch.destination, batch.cartons.len());
    }

    let mut accepted = 0usize;
    let mut rejected = 0usize;
    let mut duplicates = 0usize;

    let mut process = |raw: &str, state: &mut AppState| -> Result<(), CliError> {
        let outcome = submit_scan(raw, active, &state.master, &mut state.ledger, &ctx);
        let Some(outcome) = outcome else {
            return Ok(()); // blank input, silently ignored
        };

        if json {
            let json_str = serde_json::to_string(&outcome)
                .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
            println!("{json_str}");
        }

        match &outcome {
            ScanOutcome::Accepted(_) => {
                accepted += 1;
                state.save()?;
                eprintln!("ok: {outcome}");
            }
            ScanOutcome::Duplicate { .. } => {
                duplicates += 1;
                eprintln!("warning: {outcome}");
            }
            ScanOutcome::Rejected(_) => {
                rejected += 1;
                eprintln!("error: {outcome}");
            }
        }
        Ok(())
    };

    if cartons.is_empty() {
        // Interactive mode: one carton per stdin line until EOF.
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.map_err(|e| CliError::general(format!("cannot read stdin: {e}")))?;
            process(line.as_str(), &mut state)?;
        }
    } else {
        for carton in &cartons {
            process(carton.as_str(), &mut state)?;
        }
    }

    eprintln!("{accepted} accepted, {duplicates} duplicate, {rejected} rejected");
    if let Some(batch) = active {
        let report = packlist_engine::report_for(batch, &state.ledger);
        eprintln!(
            "batch {}: {}/{} packed{}",
            batch.key(),
            report.packed_count,
            batch.cartons.len(),
            if report.is_complete { " - complete" } else { "" },
        );
    }

    if rejected + duplicates > 0 {
        return Err(CliError {
            code: EXIT_SCAN_NOT_ACCEPTED,
            message: String::new(), // counts already reported above
            hint: None,
        });
    }
    Ok(())
}

pub fn cmd_carton(carton_no: String, json: bool) -> Result<(), CliError> {
    let settings = Settings::load();
    let state = AppState::load(&settings)?;

    let wanted = normalize_carton(&carton_no);
    let master = state
        .master
        .iter()
        .find(|m| normalize_carton(&m.carton_no) == wanted);
    let scanned = state.ledger.find_by_carton(&wanted);

    if json {
        let out = serde_json::json!({ "master": master, "packing": scanned });
        println!("{}", serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?);
        return Ok(());
    }

    let Some(master) = master else {
        return Err(CliError::general(format!("carton {wanted} not in master data")));
    };

    eprintln!(
        "carton {}: {} {} {} {} -> {} (qty {})",
        master.carton_no, master.style, master.po, master.color, master.size,
        master.destination, master.qty,
    );
    match scanned {
        Some(p) => eprintln!("scanned {} on line {}", p.date, p.line),
        None => eprintln!("not scanned"),
    }
    Ok(())
}
