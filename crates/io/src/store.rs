// Native store using SQLite

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use packlist_engine::{MasterRecord, PackingRecord};

use crate::STORE_FORMAT_VERSION;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS master (
    seq INTEGER PRIMARY KEY,
    id TEXT NOT NULL,
    style TEXT NOT NULL,
    po TEXT NOT NULL,
    color TEXT NOT NULL,
    size TEXT NOT NULL,
    carton_no TEXT NOT NULL,
    qty REAL,              -- NULL = malformed imported quantity (NaN)
    destination TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS packing (
    seq INTEGER PRIMARY KEY, -- acceptance order
    id TEXT NOT NULL,
    date TEXT NOT NULL,      -- ISO-8601 day
    line TEXT NOT NULL,
    carton_no TEXT NOT NULL,
    style TEXT NOT NULL,
    po TEXT NOT NULL,
    color TEXT NOT NULL,
    size TEXT NOT NULL,
    destination TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Write both record sets, replacing any existing store file. One
/// transaction; called after every mutation to either set.
pub fn save(path: &Path, master: &[MasterRecord], packing: &[PackingRecord]) -> Result<(), String> {
    // Delete existing file if present (SQLite will create fresh)
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    let conn = Connection::open(path).map_err(|e| e.to_string())?;
    conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;

    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2)",
        params!["format_version", STORE_FORMAT_VERSION.to_string()],
    )
    .map_err(|e| e.to_string())?;

    conn.execute("BEGIN TRANSACTION", []).map_err(|e| e.to_string())?;

    {
        let mut stmt = conn
            .prepare(
                "INSERT INTO master (id, style, po, color, size, carton_no, qty, destination)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .map_err(|e| e.to_string())?;

        for m in master {
            // SQLite has no NaN; a malformed quantity round-trips via NULL.
            let qty: Option<f64> = if m.qty.is_nan() { None } else { Some(m.qty) };
            stmt.execute(params![
                m.id,
                m.style,
                m.po,
                m.color,
                m.size,
                m.carton_no,
                qty,
                m.destination,
            ])
            .map_err(|e| e.to_string())?;
        }

        let mut stmt = conn
            .prepare(
                "INSERT INTO packing (id, date, line, carton_no, style, po, color, size, destination)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(|e| e.to_string())?;

        for p in packing {
            stmt.execute(params![
                p.id,
                p.date.format("%Y-%m-%d").to_string(),
                p.line,
                p.carton_no,
                p.style,
                p.po,
                p.color,
                p.size,
                p.destination,
            ])
            .map_err(|e| e.to_string())?;
        }
    }

    conn.execute("COMMIT", []).map_err(|e| e.to_string())?;

    Ok(())
}

/// Load both record sets in stored order. A missing file is a fresh
/// session: both sets come back empty.
pub fn load(path: &Path) -> Result<(Vec<MasterRecord>, Vec<PackingRecord>), String> {
    if !path.exists() {
        return Ok((Vec::new(), Vec::new()));
    }

    let conn = Connection::open(path).map_err(|e| e.to_string())?;

    let version: u32 = conn
        .query_row("SELECT value FROM meta WHERE key = 'format_version'", [], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| e.to_string())?
        .parse()
        .map_err(|_| "invalid format_version in store".to_string())?;
    if version > STORE_FORMAT_VERSION {
        return Err(format!(
            "store format version {version} is newer than supported version {STORE_FORMAT_VERSION}"
        ));
    }

    let mut stmt = conn
        .prepare(
            "SELECT id, style, po, color, size, carton_no, qty, destination
             FROM master ORDER BY seq",
        )
        .map_err(|e| e.to_string())?;
    let master = stmt
        .query_map([], |row| {
            Ok(MasterRecord {
                id: row.get(0)?,
                style: row.get(1)?,
                po: row.get(2)?,
                color: row.get(3)?,
                size: row.get(4)?,
                carton_no: row.get(5)?,
                qty: row.get::<_, Option<f64>>(6)?.unwrap_or(f64::NAN),
                destination: row.get(7)?,
            })
        })
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    let mut stmt = conn
        .prepare(
            "SELECT id, date, line, carton_no, style, po, color, size, destination
             FROM packing ORDER BY seq",
        )
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
            ))
        })
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    let mut packing = Vec::with_capacity(rows.len());
    for (id, date, line, carton_no, style, po, color, size, destination) in rows {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| format!("record '{id}': cannot parse date '{date}'"))?;
        packing.push(PackingRecord {
            id,
            date,
            line,
            carton_no,
            style,
            po,
            color,
            size,
            destination,
        });
    }

    Ok((master, packing))
}
