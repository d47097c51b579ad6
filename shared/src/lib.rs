//! # Replica Shared
//! Host-authoritative entity synchronization shared between host & client
//! peers: one peer simulates an entity and broadcasts its triggers, every
//! other peer drives a faithful replica from the resulting event stream.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use replica_serde::{
    Packet, PacketData, PacketDataCollection, UnderflowError, MAX_COLLECTION_LEN,
};

mod settings;
mod transport;
mod types;
mod world;

pub use settings::SessionSettings;
pub use transport::{error::TransportError, Transport};
pub use types::{EntityId, EntityType, PeerId, Role};
pub use world::{
    animation::{Animator, Clip, Frame},
    fsm::{Action, State, StateMachine, Transition},
    sync::{
        controller::{EntityController, AUTO_SYNCED_ACTION_KINDS, SYNC_PROBE_KIND},
        error::{AssetMismatchError, ProtocolViolationError, SyncError},
        event::SyncEvent,
        syncable::{Syncable, SyncableKind},
        SYNC_INDEX_NONE,
    },
};
