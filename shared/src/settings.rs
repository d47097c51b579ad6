//! Session-wide settings mirrored from the host to every client.
//!
//! This is plain record marshalling, kept alongside the entity sync core only
//! because it shares the same [`Packet`] primitives: an explicit,
//! hand-maintained field table walked front to back, symmetric on read and
//! write. The wire layout is exactly the table's declaration order.

use replica_serde::{Packet, PacketData, UnderflowError};

/// Toggles and tunables the host decides for the whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSettings {
    pub friendly_fire: bool,
    pub contact_damage: i32,
    pub show_nameplates: bool,
    pub share_map_positions: bool,
    pub team_mode: bool,
    pub respawn_delay: i32,
}

/// How one settings field travels on the wire.
///
/// The kind set is closed: a field that is neither bool nor int cannot be
/// listed in [`FIELDS`] at all, so an unsupported kind is a compile error at
/// the table, not a runtime surprise.
enum FieldAccessor {
    Bool(
        fn(&SessionSettings) -> bool,
        fn(&mut SessionSettings, bool),
    ),
    Int(
        fn(&SessionSettings) -> i32,
        fn(&mut SessionSettings, i32),
    ),
}

struct FieldDef {
    name: &'static str,
    accessor: FieldAccessor,
}

/// The full field set, in declaration order. Every field of
/// [`SessionSettings`] must be listed here exactly once.
const FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "friendly_fire",
        accessor: FieldAccessor::Bool(|s| s.friendly_fire, |s, v| s.friendly_fire = v),
    },
    FieldDef {
        name: "contact_damage",
        accessor: FieldAccessor::Int(|s| s.contact_damage, |s, v| s.contact_damage = v),
    },
    FieldDef {
        name: "show_nameplates",
        accessor: FieldAccessor::Bool(|s| s.show_nameplates, |s, v| s.show_nameplates = v),
    },
    FieldDef {
        name: "share_map_positions",
        accessor: FieldAccessor::Bool(|s| s.share_map_positions, |s, v| s.share_map_positions = v),
    },
    FieldDef {
        name: "team_mode",
        accessor: FieldAccessor::Bool(|s| s.team_mode, |s, v| s.team_mode = v),
    },
    FieldDef {
        name: "respawn_delay",
        accessor: FieldAccessor::Int(|s| s.respawn_delay, |s, v| s.respawn_delay = v),
    },
];

impl SessionSettings {
    /// Field names in wire order, for diagnostics.
    pub fn field_names() -> impl Iterator<Item = &'static str> {
        FIELDS.iter().map(|field| field.name)
    }
}

impl PacketData for SessionSettings {
    fn write_data(&self, packet: &mut Packet) {
        for field in FIELDS {
            match field.accessor {
                FieldAccessor::Bool(get, _) => packet.write_bool(get(self)),
                FieldAccessor::Int(get, _) => packet.write_int(get(self)),
            }
        }
    }

    fn read_data(packet: &mut Packet) -> Result<Self, UnderflowError> {
        let mut settings = Self::default();
        for field in FIELDS {
            match field.accessor {
                FieldAccessor::Bool(_, set) => set(&mut settings, packet.read_bool()?),
                FieldAccessor::Int(_, set) => set(&mut settings, packet.read_int()?),
            }
        }
        Ok(settings)
    }
}
