use thiserror::Error;

/// A read advanced past the written length of a [`Packet`](crate::Packet).
///
/// This signals a truncated or corrupted message, not a recoverable wire
/// condition: the containing message parse is abandoned and its bytes are
/// dropped, but the connection itself survives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Packet underflow: needed {requested} byte(s) but only {remaining} remain past the read cursor")]
pub struct UnderflowError {
    /// How many bytes the failed read asked for
    pub requested: usize,
    /// How many bytes were left between the read cursor and the written length
    pub remaining: usize,
}
