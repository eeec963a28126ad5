//! `packlist import` / `master` / `backup` / `restore` / `reset` — the
//! record-set lifecycle.

use std::io::Read;
use std::path::PathBuf;

use packlist_config::Settings;
use packlist_engine::{merge_master, parse_import_text, ScanLedger};

use crate::state::AppState;
use crate::CliError;

pub fn cmd_import(file: Option<PathBuf>, preview: bool, json: bool) -> Result<(), CliError> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| CliError::general(format!("cannot read {}: {e}", path.display())))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::general(format!("cannot read stdin: {e}")))?;
            buf
        }
    };

    let drafts = parse_import_text(&raw);

    if preview {
        if json {
            println!("{}", serde_json::to_string_pretty(&drafts)
                .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?);
        } else {
            for d in &drafts {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    d.style, d.po, d.color, d.size, d.carton_no, d.qty, d.destination,
                );
            }
            eprintln!("{} candidate row(s); rerun without --preview to merge", drafts.len());
        }
        return Ok(());
    }

    if drafts.is_empty() {
        eprintln!("no rows parsed; nothing imported");
        return Ok(());
    }

    let settings = Settings::load();
    let mut state = AppState::load(&settings)?;
    let imported = drafts.len();
    merge_master(&mut state.master, drafts);
    state.save()?;

    if json {
        let out = serde_json::json!({ "imported": imported, "total": state.master.len() });
        println!("{out}");
    }
    eprintln!("imported {imported} record(s), {} total", state.master.len());
    Ok(())
}

pub fn cmd_master(json: bool) -> Result<(), CliError> {
    let settings = Settings::load();
    let state = AppState::load(&settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state.master)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?);
        return Ok(());
    }

    for m in &state.master {
        println!(
            "{}  {}  {}  {} {} {}  qty {}  -> {}",
            m.id, m.style, m.po, m.carton_no, m.color, m.size, m.qty, m.destination,
        );
    }
    eprintln!("{} master record(s)", state.master.len());
    Ok(())
}

pub fn cmd_backup(output: Option<PathBuf>) -> Result<(), CliError> {
    let settings = Settings::load();
    let state = AppState::load(&settings)?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "Backup_Packing_{}.json",
            chrono::Local::now().format("%Y-%m-%d")
        ))
    });

    packlist_io::snapshot::export(&path, &state.master, state.ledger.all())
        .map_err(CliError::snapshot)?;

    eprintln!(
        "wrote {} ({} master, {} packing)",
        path.display(),
        state.master.len(),
        state.ledger.len(),
    );
    Ok(())
}

pub fn cmd_restore(file: PathBuf) -> Result<(), CliError> {
    let settings = Settings::load();
    let mut state = AppState::load(&settings)?;

    let snapshot = packlist_io::snapshot::import(&file).map_err(CliError::snapshot)?;

    // Wholesale replacement, no merge.
    state.master = snapshot.master;
    state.ledger = ScanLedger::from_records(snapshot.packing);
    state.save()?;

    eprintln!(
        "restored {} master record(s), {} packing record(s) from {}",
        state.master.len(),
        state.ledger.len(),
        file.display(),
    );
    Ok(())
}

pub fn cmd_reset(force: bool) -> Result<(), CliError> {
    if !force {
        return Err(CliError::args("reset deletes all master and packing records")
            .with_hint("rerun with --force, after `packlist backup` if in doubt"));
    }

    let settings = Settings::load();
    let mut state = AppState::load(&settings)?;
    let (m, p) = (state.master.len(), state.ledger.len());

    state.master = Vec::new();
    state.ledger = ScanLedger::new();
    state.save()?;

    eprintln!("cleared {m} master record(s), {p} packing record(s)");
    Ok(())
}
