/// Session-scoped entity identifier; assigned by the session layer and
/// identical on every peer for the same networked entity.
pub type EntityId = u8;

/// Identifies one remote peer at the transport seam.
pub type PeerId = u16;

/// Small tag identifying what kind of entity a controller wraps; carried for
/// logging and diagnostics, never used for dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityType(pub u8);

/// The two roles a peer's controller can hold for one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// This peer's simulation drives the entity and its triggers are broadcast.
    Authoritative,
    /// This peer renders a shadow of the entity, driven only by received events.
    Replica,
}

impl Role {
    pub fn invert(self) -> Self {
        match self {
            Role::Authoritative => Role::Replica,
            Role::Replica => Role::Authoritative,
        }
    }

    pub fn is_authoritative(self) -> bool {
        self == Role::Authoritative
    }
}
