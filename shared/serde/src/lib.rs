//! # Replica Serde
//! Byte-level packet primitives shared between the replica-* crates.

mod collection;
mod error;
mod packet;

pub use collection::{PacketDataCollection, MAX_COLLECTION_LEN};
pub use error::UnderflowError;
pub use packet::{Packet, PacketData};
