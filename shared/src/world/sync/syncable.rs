use crate::{
    types::EntityId,
    world::{animation::Animator, fsm::StateMachine, sync::error::AssetMismatchError},
};

/// The closed set of replicable trigger kinds.
///
/// The set is matched exhaustively everywhere; adding a variant is a wire
/// format change and must happen on every peer at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncableKind {
    /// A clip started playing on the authoritative peer; replicas mirror the
    /// playback by name.
    Animation { clip_name: String },
    /// A qualifying state ran on the authoritative peer; replicas replay only
    /// the pre-identified audio-triggering actions, not the state's full
    /// logic, which each peer's local simulation covers on its own.
    StateAction {
        state_name: String,
        /// Ordered indices of the auto-synced actions, as recorded against the
        /// state's action list *before* the sync probe was injected at slot 0.
        action_indices: Vec<usize>,
    },
}

/// A replicable unit of entity behavior, identified on the wire by the stable
/// index assigned when its controller was built.
///
/// Identity (clip/state reference) is fixed at construction; the index is
/// cached here rather than recomputed by name search at send time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Syncable {
    wire_index: u8,
    kind: SyncableKind,
}

impl Syncable {
    pub(crate) fn new(wire_index: u8, kind: SyncableKind) -> Self {
        Self { wire_index, kind }
    }

    pub fn wire_index(&self) -> u8 {
        self.wire_index
    }

    pub fn kind(&self) -> &SyncableKind {
        &self.kind
    }

    /// Receive-side effect, invoked on the replica's local assets.
    ///
    /// `payload` is currently unused by both variants; it rides along for
    /// future variant-defined data.
    pub(crate) fn apply_received_update(
        &self,
        entity_id: EntityId,
        animator: &mut Animator,
        fsm: &mut StateMachine,
        _payload: &[u8],
    ) -> Result<(), AssetMismatchError> {
        match &self.kind {
            SyncableKind::Animation { clip_name } => {
                // Stop the previous clip first so the new one starts from its
                // first frame even when it is already the active clip.
                animator.stop();
                if !animator.play(clip_name) {
                    return Err(AssetMismatchError::ClipMissing {
                        entity_id,
                        clip: clip_name.clone(),
                    });
                }
                Ok(())
            }
            SyncableKind::StateAction {
                state_name,
                action_indices,
            } => {
                if fsm.state(state_name).is_none() {
                    return Err(AssetMismatchError::StateMissing {
                        entity_id,
                        state: state_name.clone(),
                    });
                }
                for &recorded in action_indices {
                    // Recorded indices predate the probe injected at slot 0 of
                    // every qualifying state; the live layout sits one higher.
                    let live = recorded + 1;
                    if !fsm.run_action(state_name, live) {
                        return Err(AssetMismatchError::ActionOutOfBounds {
                            entity_id,
                            state: state_name.clone(),
                            index: live,
                        });
                    }
                }
                Ok(())
            }
        }
    }
}
