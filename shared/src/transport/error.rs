use thiserror::Error;

/// Errors that can occur while handing payloads to the session transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport refused or failed to queue the payload
    #[error("Failed to send {payload_size} byte payload to {peer_count} peer(s): {reason}")]
    SendFailed {
        payload_size: usize,
        peer_count: usize,
        reason: String,
    },

    /// The transport is no longer connected to the session
    #[error("Transport is disconnected; dropping {payload_size} byte payload")]
    Disconnected { payload_size: usize },
}
