//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | Reconciliation   | Report/scan/store-specific codes         |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Reconciliation (3-9)
// =============================================================================

/// `report` found batches with missing cartons.
/// Like `diff(1)`, nonzero means "not reconciled yet."
pub const EXIT_REPORT_INCOMPLETE: u8 = 3;

/// `scan` had at least one submission that was not accepted
/// (rejected or duplicate).
pub const EXIT_SCAN_NOT_ACCEPTED: u8 = 4;

/// Native store could not be read or written.
pub const EXIT_STORE: u8 = 5;

/// Backup snapshot could not be read, parsed, or written.
pub const EXIT_SNAPSHOT: u8 = 6;

/// Report export (CSV/XLSX) failed.
pub const EXIT_EXPORT: u8 = 7;
