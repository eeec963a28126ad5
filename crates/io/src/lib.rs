// File I/O - native store, snapshot, report export

pub mod export;
pub mod snapshot;
pub mod store;

/// Native store format version
/// Increment when schema changes in a way that old versions can't read
pub const STORE_FORMAT_VERSION: u32 = 1;
