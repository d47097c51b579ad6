// Tests for the entity sync model
#![cfg(test)]

mod controller;

use crate::{
    transport::{error::TransportError, Transport},
    types::{EntityType, PeerId},
    world::{
        animation::{Animator, Clip},
        fsm::{Action, State, StateMachine, Transition},
        sync::controller::EntityController,
    },
};

/// The reference scenario: clips `["Idle", "Walk"]` and one qualifying state
/// `"Attack"` whose only auto-synced action sits at index 2.
///
/// Expected Syncable list:
/// `[Animation(Idle)=0, Animation(Walk)=1, StateAction(Attack, [2])=2]`.
pub fn scenario_assets() -> (StateMachine, Animator) {
    let fsm = StateMachine::new(vec![
        State::new(
            "Rest",
            vec![Action::new("Wait")],
            vec![Transition::new("WAKE", "Attack")],
        ),
        State::new(
            "Attack",
            vec![
                Action::new("Anticipate"),
                Action::new("Lunge"),
                Action::new("AudioPlayRandom"),
            ],
            vec![Transition::new("DONE", "Rest")],
        ),
    ]);
    let animator = Animator::new(vec![Clip::new("Idle", 2), Clip::new("Walk", 3)]);
    (fsm, animator)
}

pub fn scenario_controller() -> EntityController {
    let (fsm, animator) = scenario_assets();
    EntityController::new(1, EntityType(7), fsm, animator, "Rest")
}

/// Transport stub that records every payload it is asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    pub payloads: Vec<Vec<u8>>,
}

impl Transport for RecordingTransport {
    fn send(&mut self, _peers: &[PeerId], payload: &[u8]) -> Result<(), TransportError> {
        self.payloads.push(payload.to_vec());
        Ok(())
    }
}
