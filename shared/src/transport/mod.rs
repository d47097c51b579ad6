pub mod error;

use crate::types::PeerId;

use error::TransportError;

/// Outbound half of the session transport.
///
/// Ordering and delivery are *not* guaranteed by this seam. The sync model
/// tolerates reordered or dropped payloads: replicas may diverge until the
/// next state-defining update arrives, and that update supersedes everything
/// before it.
pub trait Transport {
    fn send(&mut self, peers: &[PeerId], payload: &[u8]) -> Result<(), TransportError>;
}
