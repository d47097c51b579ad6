//! Abstract model of an entity's state machine: named states, each holding an
//! ordered list of actions and a set of outgoing transitions.
//!
//! The machine's autonomous flow can be frozen (all transitions removed) and
//! thawed (transitions restored); a frozen machine only moves when something
//! forces it, which is exactly what a replica needs.

/// An outgoing transition from one state, keyed by the event name that
/// triggers it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub event: String,
    pub target: String,
}

impl Transition {
    pub fn new(event: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            target: target.into(),
        }
    }
}

/// One action inside a state.
///
/// `kind` names the action's behavior in the game's action catalogue; `run`
/// records an execution so replayed side effects stay observable without
/// modeling the engine itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    kind: String,
    run_count: u64,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            run_count: 0,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn run_count(&self) -> u64 {
        self.run_count
    }

    fn run(&mut self) {
        self.run_count += 1;
    }
}

/// A named state: an ordered action list plus outgoing transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    name: String,
    actions: Vec<Action>,
    transitions: Vec<Transition>,
    stashed_transitions: Vec<Transition>,
}

impl State {
    pub fn new(name: impl Into<String>, actions: Vec<Action>, transitions: Vec<Transition>) -> Self {
        Self {
            name: name.into(),
            actions,
            transitions,
            stashed_transitions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

/// Named states in declaration order, with at most one active at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateMachine {
    states: Vec<State>,
    active: Option<usize>,
}

impl StateMachine {
    pub fn new(states: Vec<State>) -> Self {
        Self {
            states,
            active: None,
        }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|state| state.name == name)
    }

    pub fn active_state(&self) -> Option<&str> {
        self.active.map(|index| self.states[index].name.as_str())
    }

    /// True when no state has transitions stashed away, i.e. the machine may
    /// advance on its own.
    pub fn transitions_active(&self) -> bool {
        self.states
            .iter()
            .all(|state| state.stashed_transitions.is_empty())
    }

    /// Force the machine to `name` without running the state's actions.
    /// Returns false if the state is unknown.
    pub(crate) fn set_state(&mut self, name: &str) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        self.active = Some(index);
        true
    }

    /// Enter `name`, running every one of its actions in order. Returns false
    /// if the state is unknown.
    pub(crate) fn enter_state(&mut self, name: &str) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        self.active = Some(index);
        for action in &mut self.states[index].actions {
            action.run();
        }
        true
    }

    /// Run a single action directly, outside the state's enter/exit lifecycle.
    /// Returns false if the state is unknown or the index is out of bounds.
    pub(crate) fn run_action(&mut self, state_name: &str, action_index: usize) -> bool {
        let Some(index) = self.index_of(state_name) else {
            return false;
        };
        let Some(action) = self.states[index].actions.get_mut(action_index) else {
            return false;
        };
        action.run();
        true
    }

    /// Insert `action` at `action_index` of the named state, shifting existing
    /// actions up. Returns false if the state is unknown.
    pub(crate) fn insert_action(&mut self, state_name: &str, action_index: usize, action: Action) -> bool {
        let Some(index) = self.index_of(state_name) else {
            return false;
        };
        self.states[index].actions.insert(action_index, action);
        true
    }

    /// Strip every state of its outgoing transitions, freezing autonomous
    /// flow. Idempotent.
    pub(crate) fn remove_all_transitions(&mut self) {
        for state in &mut self.states {
            let mut removed = std::mem::take(&mut state.transitions);
            state.stashed_transitions.append(&mut removed);
        }
    }

    /// Put back every transition removed by `remove_all_transitions`.
    /// Idempotent.
    pub(crate) fn restore_all_transitions(&mut self) {
        for state in &mut self.states {
            let mut stashed = std::mem::take(&mut state.stashed_transitions);
            state.transitions.append(&mut stashed);
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|state| state.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> StateMachine {
        StateMachine::new(vec![
            State::new(
                "Rest",
                vec![Action::new("Wait")],
                vec![Transition::new("WAKE", "Attack")],
            ),
            State::new(
                "Attack",
                vec![Action::new("Lunge"), Action::new("AudioPlayRandom")],
                vec![Transition::new("DONE", "Rest")],
            ),
        ])
    }

    #[test]
    fn enter_state_runs_all_actions() {
        let mut fsm = machine();

        assert!(fsm.enter_state("Attack"));
        assert_eq!(fsm.active_state(), Some("Attack"));

        let attack = fsm.state("Attack").unwrap();
        assert!(attack.actions().iter().all(|action| action.run_count() == 1));
    }

    #[test]
    fn set_state_runs_nothing() {
        let mut fsm = machine();

        assert!(fsm.set_state("Attack"));
        let attack = fsm.state("Attack").unwrap();
        assert!(attack.actions().iter().all(|action| action.run_count() == 0));
    }

    #[test]
    fn run_action_bounds() {
        let mut fsm = machine();

        assert!(fsm.run_action("Attack", 1));
        assert!(!fsm.run_action("Attack", 5));
        assert!(!fsm.run_action("Missing", 0));

        assert_eq!(fsm.state("Attack").unwrap().actions()[1].run_count(), 1);
    }

    #[test]
    fn remove_and_restore_transitions_round_trip() {
        let mut fsm = machine();
        let before: Vec<_> = fsm
            .states()
            .iter()
            .map(|state| state.transitions().to_vec())
            .collect();

        fsm.remove_all_transitions();
        assert!(!fsm.transitions_active());
        assert!(fsm.states().iter().all(|state| state.transitions().is_empty()));

        // Removing twice must not lose the stash
        fsm.remove_all_transitions();

        fsm.restore_all_transitions();
        assert!(fsm.transitions_active());
        let after: Vec<_> = fsm
            .states()
            .iter()
            .map(|state| state.transitions().to_vec())
            .collect();
        assert_eq!(before, after);
    }
}
