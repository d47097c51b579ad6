use thiserror::Error;

use replica_serde::UnderflowError;

use crate::{transport::error::TransportError, types::EntityId};

/// A received update referenced an asset the local entity does not have.
///
/// Peers are expected to build their controllers from structurally identical
/// assets; when they have not (version skew, modified installs), the
/// individual update is dropped and logged. The controller keeps operating,
/// visual desync is recoverable on the next state-defining update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetMismatchError {
    /// Referenced clip missing from the local clip library
    #[error("Clip '{clip}' not found in local clip library for entity {entity_id}")]
    ClipMissing { entity_id: EntityId, clip: String },

    /// Referenced state missing from the local state machine
    #[error("State '{state}' not found in local state machine for entity {entity_id}")]
    StateMissing { entity_id: EntityId, state: String },

    /// Recorded action index does not exist in the local state's action list
    #[error("Action index {index} out of bounds in state '{state}' for entity {entity_id}")]
    ActionOutOfBounds {
        entity_id: EntityId,
        state: String,
        index: usize,
    },
}

/// The wire said something the local controller cannot honor; the sending
/// peer and this peer have diverged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolationError {
    /// Wire index beyond this controller's syncable list
    #[error("Wire index {index} out of range for entity {entity_id} ({syncable_count} syncables); peers have diverged")]
    WireIndexOutOfRange {
        entity_id: EntityId,
        index: u8,
        syncable_count: usize,
    },
}

/// Everything that can go wrong at the entity sync boundary.
///
/// None of these tear down the session: the offending update (or batch) is
/// dropped, the condition is logged, and the controller continues. Sync
/// messages are fire-and-forget, a missed update is superseded by the next
/// one, never resent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Asset mismatch error
    #[error("Asset mismatch: {0}")]
    AssetMismatch(#[from] AssetMismatchError),

    /// Protocol violation error
    #[error("Protocol violation: {0}")]
    ProtocolViolation(#[from] ProtocolViolationError),

    /// Packet underflow error
    #[error("Packet underflow: {0}")]
    Underflow(#[from] UnderflowError),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
