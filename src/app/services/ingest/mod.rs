//! Ingestion loop shared by the bulletin and CSV paths
//!
//! Events are persisted one row at a time so that every row's outcome is
//! known when it is counted. The resulting [`IngestTally`] is owned by the
//! run and returned to the caller.

pub mod persist;
pub mod tally;

#[cfg(test)]
pub mod tests;

pub use persist::persist_events;
pub use tally::IngestTally;
