pub mod controller;
pub mod error;
pub mod event;
pub mod syncable;

#[cfg(test)]
mod tests;

/// Reserved wire index meaning "no syncable dispatch"; carried by terminal
/// events (e.g. death) that need no variant behavior on the replica.
pub const SYNC_INDEX_NONE: u8 = u8::MAX;
