//! # `controller.rs` — Per-Entity Sync Orchestrator
//!
//! The **`EntityController`** is the single entry/exit point between one live
//! entity's local simulation and the sync event stream. It owns the entity's
//! state machine and animator wiring, the ordered [`Syncable`] list derived
//! from them, and a scratch buffer of outbound [`SyncEvent`]s drained by the
//! session layer.
//!
//! ## Responsibilities
//! 1. **Deterministic construction** – the same scan over structurally
//!    identical assets yields the same Syncable list with the same wire
//!    indices on every peer; indices, not names, cross the wire.
//! 2. **Outbound** – local triggers (instrumented clip frames, injected state
//!    probes) become queued events while Authoritative; a Replica still
//!    executes the direct effects but never re-emits.
//! 3. **Inbound** – `apply_update` dispatches a wire index to its Syncable's
//!    receive-side effect; every failure is contained here and surfaced via
//!    logging, never a crash.
//!
//! One controller per entity, one entity per controller; nothing here is
//! shared across entities and no global registry is required.

use std::collections::HashMap;

use log::warn;

use replica_serde::{Packet, PacketData, PacketDataCollection, MAX_COLLECTION_LEN};

use crate::{
    transport::Transport,
    types::{EntityId, EntityType, PeerId, Role},
    world::{
        animation::Animator,
        fsm::{Action, StateMachine},
        sync::{
            error::{ProtocolViolationError, SyncError},
            event::SyncEvent,
            syncable::{Syncable, SyncableKind},
            SYNC_INDEX_NONE,
        },
    },
};

/// Action kinds that are replicated automatically: they produce audible side
/// effects a frozen replica simulation cannot reproduce on its own.
pub const AUTO_SYNCED_ACTION_KINDS: &[&str] = &["AudioPlayRandom", "SetAudioPitch"];

/// Kind of the synthetic action injected at slot 0 of every qualifying state.
/// Running it is what fires the outbound sync path for that state.
pub const SYNC_PROBE_KIND: &str = "SyncProbe";

pub struct EntityController {
    entity_id: EntityId,
    entity_type: EntityType,
    role: Role,
    default_state: String,
    fsm: StateMachine,
    animator: Animator,
    syncables: Vec<Syncable>,
    clip_indices: HashMap<String, u8>,
    state_indices: HashMap<String, u8>,
    outgoing_events: Vec<SyncEvent>,
}

impl EntityController {
    /// Wrap an entity's existing assets for synchronization.
    ///
    /// Runs once per entity instantiation and must behave identically on
    /// every peer: the Syncable list it derives is the shared wire contract.
    /// Fresh controllers come up as [`Role::Replica`] with the machine frozen
    /// at `default_state`; a later role transition activates them.
    pub fn new(
        entity_id: EntityId,
        entity_type: EntityType,
        mut fsm: StateMachine,
        mut animator: Animator,
        default_state: &str,
    ) -> Self {
        // Scan before any mutation: recorded action indices must reflect the
        // assets as authored, not the probe-shifted layout.
        let synced_states = Self::scan_synced_states(&fsm);

        let mut syncables = Vec::new();
        let mut clip_indices = HashMap::new();
        let mut state_indices = HashMap::new();

        for clip in animator.clips() {
            let Some(index) = Self::next_wire_index(entity_id, &syncables) else {
                break;
            };
            clip_indices.insert(clip.name().to_owned(), index);
            syncables.push(Syncable::new(
                index,
                SyncableKind::Animation {
                    clip_name: clip.name().to_owned(),
                },
            ));
        }

        for (state_name, action_indices) in &synced_states {
            let Some(index) = Self::next_wire_index(entity_id, &syncables) else {
                break;
            };
            state_indices.insert(state_name.clone(), index);
            syncables.push(Syncable::new(
                index,
                SyncableKind::StateAction {
                    state_name: state_name.clone(),
                    action_indices: action_indices.clone(),
                },
            ));
        }

        // Instrument every non-empty clip so that starting it fires an event
        // carrying the clip's name.
        for clip in animator.clips_mut() {
            let name = clip.name().to_owned();
            if let Some(first_frame) = clip.frames_mut().first_mut() {
                first_frame.trigger_event = true;
                first_frame.event_info = Some(name);
            }
        }

        // The probe goes in front of the state's own actions, shifting every
        // original index up by one; replay corrects for this.
        for (state_name, _) in &synced_states {
            fsm.insert_action(state_name, 0, Action::new(SYNC_PROBE_KIND));
        }

        // Default role entry: a replica never advances its own machine.
        fsm.remove_all_transitions();
        if !fsm.set_state(default_state) {
            warn!(
                "Entity {} ({:?}): default state '{}' not found in state machine",
                entity_id, entity_type, default_state
            );
        }

        Self {
            entity_id,
            entity_type,
            role: Role::Replica,
            default_state: default_state.to_owned(),
            fsm,
            animator,
            syncables,
            clip_indices,
            state_indices,
            outgoing_events: Vec::new(),
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn current_role(&self) -> Role {
        self.role
    }

    /// The full Syncable list, in wire index order.
    pub fn syncables(&self) -> &[Syncable] {
        &self.syncables
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.fsm
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Engine-side hook: the local simulation played `clip_name`.
    ///
    /// The playback itself happens in both roles (the replica must be
    /// visually correct without a network round-trip); only the emission is
    /// gated on being Authoritative, and only for clips whose instrumented
    /// first frame fires.
    pub fn local_clip_played(&mut self, clip_name: &str) {
        if !self.animator.play(clip_name) {
            warn!(
                "Entity {} ({:?}): local simulation played unknown clip '{}'",
                self.entity_id, self.entity_type, clip_name
            );
            return;
        }
        let instrumented = self
            .animator
            .clip(clip_name)
            .and_then(|clip| clip.frames().first())
            .map(|frame| frame.trigger_event)
            .unwrap_or(false);
        if !instrumented || self.role != Role::Authoritative {
            return;
        }
        if let Some(&index) = self.clip_indices.get(clip_name) {
            self.queue_event(index);
        }
    }

    /// Engine-side hook: the local simulation entered `state_name`.
    ///
    /// Runs the state's full action list (including the probe at slot 0) in
    /// both roles; while Authoritative, the probe firing queues the state's
    /// sync event.
    pub fn local_state_entered(&mut self, state_name: &str) {
        if !self.fsm.enter_state(state_name) {
            warn!(
                "Entity {} ({:?}): local simulation entered unknown state '{}'",
                self.entity_id, self.entity_type, state_name
            );
            return;
        }
        if self.role != Role::Authoritative {
            return;
        }
        if let Some(&index) = self.state_indices.get(state_name) {
            self.queue_event(index);
        }
    }

    /// Atomically swaps out the queued outbound events, in trigger order.
    pub fn take_outgoing(&mut self) -> Vec<SyncEvent> {
        std::mem::take(&mut self.outgoing_events)
    }

    pub fn has_outgoing(&self) -> bool {
        !self.outgoing_events.is_empty()
    }

    /// Batch every queued event into bounded collections and hand the encoded
    /// payload(s) to the transport for broadcast. Returns the number of events
    /// sent.
    ///
    /// Fire-and-forget: a transport failure drops whatever was not yet sent,
    /// the next trigger supersedes.
    pub fn flush_outgoing<T: Transport>(
        &mut self,
        transport: &mut T,
        peers: &[PeerId],
    ) -> Result<usize, SyncError> {
        let events = self.take_outgoing();
        let mut sent = 0;
        for chunk in events.chunks(MAX_COLLECTION_LEN) {
            let collection = PacketDataCollection::from_vec(chunk.to_vec());
            let mut packet = Packet::new();
            collection.write_data(&mut packet);
            transport.send(peers, packet.as_bytes())?;
            sent += chunk.len();
        }
        Ok(sent)
    }

    /// Apply one received sync message to the local replica.
    ///
    /// Index [`SYNC_INDEX_NONE`] is the reserved sentinel and dispatches
    /// nothing. Every error is contained here: the update is dropped, logged
    /// with entity identifiers, and the controller's role and state are left
    /// untouched.
    pub fn apply_update(&mut self, index: u8, payload: &[u8]) -> Result<(), SyncError> {
        if index == SYNC_INDEX_NONE {
            return Ok(());
        }
        let Some(syncable) = self.syncables.get(usize::from(index)) else {
            let err = ProtocolViolationError::WireIndexOutOfRange {
                entity_id: self.entity_id,
                index,
                syncable_count: self.syncables.len(),
            };
            warn!(
                "Entity {} ({:?}): dropping update: {}",
                self.entity_id, self.entity_type, err
            );
            return Err(err.into());
        };
        if let Err(err) = syncable.apply_received_update(
            self.entity_id,
            &mut self.animator,
            &mut self.fsm,
            payload,
        ) {
            warn!(
                "Entity {} ({:?}): dropping update for index {}: {}",
                self.entity_id, self.entity_type, index, err
            );
            return Err(err.into());
        }
        Ok(())
    }

    /// Scene entry on the hosting peer: the local simulation drives the
    /// entity again, so its autonomous transitions come back.
    pub fn enter_as_host(&mut self) {
        self.role = Role::Authoritative;
        self.fsm.restore_all_transitions();
    }

    /// Scene entry on a non-hosting peer: freeze the machine, rewind to the
    /// default state and stop any in-flight animation so the replica starts
    /// from a known baseline regardless of host-side progress at join time.
    pub fn enter_as_client(&mut self) {
        self.role = Role::Replica;
        self.reset_to_default_state();
        self.fsm.remove_all_transitions();
        self.animator.stop();
    }

    /// Mid-session promotion when the hosting peer leaves. The baseline reset
    /// happens *before* transitions come back, so the newly-authoritative
    /// machine does not resume from stale partial replica state.
    pub fn switch_to_host(&mut self) {
        self.role = Role::Authoritative;
        self.reset_to_default_state();
        self.fsm.restore_all_transitions();
    }

    fn reset_to_default_state(&mut self) {
        if !self.fsm.set_state(&self.default_state) {
            warn!(
                "Entity {} ({:?}): default state '{}' not found in state machine",
                self.entity_id, self.entity_type, self.default_state
            );
        }
    }

    fn queue_event(&mut self, wire_index: u8) {
        self.outgoing_events
            .push(SyncEvent::new(self.entity_id, wire_index));
    }

    /// Per-state ordered indices of allow-listed actions, in state declaration
    /// order; states with none are discarded.
    fn scan_synced_states(fsm: &StateMachine) -> Vec<(String, Vec<usize>)> {
        let mut synced = Vec::new();
        for state in fsm.states() {
            let indices: Vec<usize> = state
                .actions()
                .iter()
                .enumerate()
                .filter(|(_, action)| AUTO_SYNCED_ACTION_KINDS.contains(&action.kind()))
                .map(|(index, _)| index)
                .collect();
            if !indices.is_empty() {
                synced.push((state.name().to_owned(), indices));
            }
        }
        synced
    }

    fn next_wire_index(entity_id: EntityId, syncables: &[Syncable]) -> Option<u8> {
        let next = syncables.len();
        if next >= usize::from(SYNC_INDEX_NONE) {
            warn!(
                "Entity {}: syncable capacity reached ({} slots); remaining clips/states will not be synced",
                entity_id, SYNC_INDEX_NONE
            );
            return None;
        }
        Some(next as u8)
    }
}
