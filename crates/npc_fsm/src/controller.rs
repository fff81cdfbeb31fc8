//! Per-agent FSM controller

use crate::context::AgentContext;
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::error::{FsmError, FsmResult};
use crate::id::Identifier;
use crate::state::FsmState;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Owned, type-erased state
pub type BoxedState<'w, S, T, C> = Box<dyn FsmState<'w, S, T, C> + Send + 'w>;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome<S: Identifier, T: Identifier> {
    /// No current state; nothing ran
    Uninitialized,
    /// `reason` requested no switch
    Stayed(S),
    /// The controller entered `to` before acting
    Switched { from: S, to: S },
    /// `reason` failed or requested an unknown state; `current` was kept
    Rejected { current: S, error: FsmError<S, T> },
}

impl<S: Identifier, T: Identifier> TickOutcome<S, T> {
    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switched { .. })
    }
}

/// Owns every state of one agent and drives the Reason -> switch -> Act
/// cycle once per tick.
///
/// The current identifier always names a registered state once
/// `initialize` has succeeded.
pub struct FsmController<'w, S: Identifier, T: Identifier, C = AgentContext> {
    states: HashMap<S, BoxedState<'w, S, T, C>>,
    current: Option<S>,
    previous: Option<S>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<'w, S: Identifier, T: Identifier, C> FsmController<'w, S, T, C> {
    /// Create a controller that reports through the `log` facade
    pub fn new() -> Self {
        Self::with_sink(Arc::new(LogSink))
    }

    /// Create a controller that reports to `sink`
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            states: HashMap::new(),
            current: None,
            previous: None,
            sink,
        }
    }

    /// Register a state under its own identifier
    pub fn add_state(&mut self, state: BoxedState<'w, S, T, C>) -> FsmResult<(), S, T> {
        let id = state.id();
        if id.is_none() {
            return self.fail(FsmError::InvalidStateId);
        }
        if self.states.contains_key(&id) {
            return self.fail(FsmError::DuplicateState { id });
        }

        log::debug!("Registered state {:?}", id);
        self.states.insert(id, state);
        Ok(())
    }

    /// Remove a registered state. The current state cannot be removed.
    pub fn delete_state(&mut self, id: S) -> FsmResult<BoxedState<'w, S, T, C>, S, T> {
        if id.is_none() {
            return self.fail(FsmError::InvalidStateId);
        }
        if self.current == Some(id) {
            return self.fail(FsmError::StateInUse { id });
        }

        match self.states.remove(&id) {
            Some(state) => {
                if self.previous == Some(id) {
                    self.previous = None;
                }
                Ok(state)
            }
            None => self.fail(FsmError::UnknownState { id }),
        }
    }

    /// Enter the initial state. Its `enter_state_init` runs before any tick.
    pub fn initialize(&mut self, initial: S, ctx: &C) -> FsmResult<(), S, T> {
        if initial.is_none() {
            return self.fail(FsmError::InvalidStateId);
        }

        let Some(state) = self.states.get_mut(&initial) else {
            return self.fail(FsmError::UnknownState { id: initial });
        };
        state.enter_state_init(ctx);

        self.previous = None;
        self.current = Some(initial);
        log::debug!("Initialized in state {:?}", initial);
        Ok(())
    }

    /// Switch to `id`, running its `enter_state_init` first.
    ///
    /// An unknown target is reported and leaves the current state as is.
    /// Fails with `Uninitialized` before `initialize` has succeeded.
    pub fn perform_transition(&mut self, id: S, ctx: &C) -> FsmResult<(), S, T> {
        if self.current.is_none() {
            return self.fail(FsmError::Uninitialized);
        }
        if id.is_none() {
            return self.fail(FsmError::InvalidStateId);
        }

        let Some(state) = self.states.get_mut(&id) else {
            return self.fail(FsmError::UnknownTargetState { requested: id });
        };
        state.enter_state_init(ctx);

        self.previous = self.current;
        self.current = Some(id);
        log::debug!("Switched {:?} -> {:?}", self.previous, id);
        Ok(())
    }

    /// Run one tick: reason, apply any requested switch, then act.
    ///
    /// Never fails. Failures are reported to the sink and surface as
    /// `TickOutcome::Rejected`.
    pub fn tick(&mut self, ctx: &mut C) -> TickOutcome<S, T> {
        let Some(current) = self.current else {
            return TickOutcome::Uninitialized;
        };

        let decision = match self.states.get_mut(&current) {
            Some(state) => state.reason(ctx),
            None => Err(FsmError::UnknownState { id: current }),
        };

        let outcome = match decision {
            Ok(Some(next)) if !next.is_none() => match self.perform_transition(next, ctx) {
                Ok(()) => TickOutcome::Switched {
                    from: current,
                    to: next,
                },
                Err(error) => TickOutcome::Rejected { current, error },
            },
            Ok(_) => TickOutcome::Stayed(current),
            Err(error) => {
                self.report(&error);
                TickOutcome::Rejected { current, error }
            }
        };

        if let Some(state) = self.current.and_then(|id| self.states.get_mut(&id)) {
            state.act(ctx);
        }

        outcome
    }

    /// Get current state id
    pub fn current_state_id(&self) -> Option<S> {
        self.current
    }

    /// Get the state left by the last switch
    pub fn previous_state_id(&self) -> Option<S> {
        self.previous
    }

    /// Whether `initialize` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Check if in state
    pub fn is_in(&self, id: S) -> bool {
        self.current == Some(id)
    }

    /// Get current state
    pub fn current_state(&self) -> Option<&(dyn FsmState<'w, S, T, C> + Send + 'w)> {
        self.current.and_then(|id| self.state(id))
    }

    /// Get a registered state
    pub fn state(&self, id: S) -> Option<&(dyn FsmState<'w, S, T, C> + Send + 'w)> {
        self.states.get(&id).map(|s| s.as_ref())
    }

    /// Get a registered state mutably
    pub fn state_mut(&mut self, id: S) -> Option<&mut (dyn FsmState<'w, S, T, C> + Send + 'w)> {
        self.states.get_mut(&id).map(|s| s.as_mut())
    }

    /// Number of registered states
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Get the diagnostic sink
    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    fn report(&self, error: &FsmError<S, T>) {
        self.sink.report(Diagnostic::from(error));
    }

    fn fail<R>(&self, error: FsmError<S, T>) -> FsmResult<R, S, T> {
        self.report(&error);
        Err(error)
    }
}

impl<'w, S: Identifier, T: Identifier, C> Default for FsmController<'w, S, T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'w, S: Identifier, T: Identifier, C> fmt::Debug for FsmController<'w, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsmController")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .field("previous", &self.previous)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::error::Severity;
    use crate::id::fixtures::{Alert, Guard};
    use crate::state::StateCore;

    /// Requests whatever `next` holds and counts its hooks
    struct Scripted {
        core: StateCore<'static, Guard, Alert>,
        next: Option<Guard>,
        entered: u32,
        acted: u32,
    }

    impl Scripted {
        fn boxed(id: Guard) -> BoxedState<'static, Guard, Alert, AgentContext> {
            Box::new(Self::new(id))
        }

        fn new(id: Guard) -> Self {
            Self {
                core: StateCore::new(id),
                next: None,
                entered: 0,
                acted: 0,
            }
        }
    }

    impl FsmState<'static, Guard, Alert> for Scripted {
        fn core(&self) -> &StateCore<'static, Guard, Alert> {
            &self.core
        }

        fn core_mut(&mut self) -> &mut StateCore<'static, Guard, Alert> {
            &mut self.core
        }

        fn enter_state_init(&mut self, _ctx: &AgentContext) {
            self.entered += 1;
        }

        fn reason(&mut self, _ctx: &AgentContext) -> FsmResult<Option<Guard>, Guard, Alert> {
            Ok(self.next.take())
        }

        fn act(&mut self, ctx: &mut AgentContext) {
            self.acted += 1;
            ctx.heading += 1.0;
        }
    }

    fn controller(sink: Arc<RecordingSink>) -> FsmController<'static, Guard, Alert> {
        let mut fsm = FsmController::with_sink(sink);
        fsm.add_state(Scripted::boxed(Guard::Patrol)).unwrap();
        fsm.add_state(Scripted::boxed(Guard::Chase)).unwrap();
        fsm
    }

    #[test]
    fn test_uninitialized_tick() {
        let sink = Arc::new(RecordingSink::new());
        let mut fsm = controller(sink.clone());
        let mut ctx = AgentContext::default();

        assert!(!fsm.is_initialized());
        assert_eq!(fsm.tick(&mut ctx), TickOutcome::Uninitialized);
        assert_eq!(ctx.heading, 0.0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_initialize_validates() {
        let sink = Arc::new(RecordingSink::new());
        let mut fsm = controller(sink.clone());
        let ctx = AgentContext::default();

        assert_eq!(fsm.initialize(Guard::None, &ctx), Err(FsmError::InvalidStateId));
        assert_eq!(
            fsm.initialize(Guard::Attack, &ctx),
            Err(FsmError::UnknownState { id: Guard::Attack })
        );
        assert!(!fsm.is_initialized());
        assert_eq!(sink.count(Severity::Error), 2);

        fsm.initialize(Guard::Patrol, &ctx).unwrap();
        assert!(fsm.is_in(Guard::Patrol));
    }

    #[test]
    fn test_stay_does_not_enter() {
        let sink = Arc::new(RecordingSink::new());
        let mut fsm = controller(sink);
        let mut ctx = AgentContext::default();
        fsm.initialize(Guard::Patrol, &ctx).unwrap();

        assert_eq!(fsm.tick(&mut ctx), TickOutcome::Stayed(Guard::Patrol));
        assert_eq!(fsm.current_state_id(), Some(Guard::Patrol));
        assert_eq!(ctx.heading, 1.0);
    }

    #[test]
    fn test_duplicate_and_null_registration() {
        let sink = Arc::new(RecordingSink::new());
        let mut fsm = controller(sink.clone());

        assert_eq!(
            fsm.add_state(Scripted::boxed(Guard::Patrol)),
            Err(FsmError::DuplicateState { id: Guard::Patrol })
        );
        assert_eq!(
            fsm.add_state(Scripted::boxed(Guard::None)),
            Err(FsmError::InvalidStateId)
        );
        assert_eq!(fsm.state_count(), 2);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_delete_state() {
        let sink = Arc::new(RecordingSink::new());
        let mut fsm = controller(sink);
        let ctx = AgentContext::default();
        fsm.initialize(Guard::Patrol, &ctx).unwrap();

        assert_eq!(
            fsm.delete_state(Guard::Patrol).err(),
            Some(FsmError::StateInUse { id: Guard::Patrol })
        );
        assert!(fsm.delete_state(Guard::Chase).is_ok());
        assert_eq!(
            fsm.delete_state(Guard::Chase).err(),
            Some(FsmError::UnknownState { id: Guard::Chase })
        );
        assert_eq!(fsm.state_count(), 1);
    }

    #[test]
    fn test_forced_transition() {
        let sink = Arc::new(RecordingSink::new());
        let mut fsm = controller(sink);
        let ctx = AgentContext::default();
        fsm.initialize(Guard::Patrol, &ctx).unwrap();

        fsm.perform_transition(Guard::Chase, &ctx).unwrap();
        assert!(fsm.is_in(Guard::Chase));
        assert_eq!(fsm.previous_state_id(), Some(Guard::Patrol));
        assert_eq!(fsm.current_state().map(|s| s.id()), Some(Guard::Chase));
    }

    #[test]
    fn test_forced_transition_needs_initialize() {
        let sink = Arc::new(RecordingSink::new());
        let mut fsm = controller(sink.clone());
        let ctx = AgentContext::default();

        assert_eq!(
            fsm.perform_transition(Guard::Chase, &ctx),
            Err(FsmError::Uninitialized)
        );
        assert_eq!(fsm.current_state_id(), None);
        assert_eq!(fsm.previous_state_id(), None);
        assert_eq!(sink.count(Severity::Error), 1);

        // Entering through initialize still works afterwards
        fsm.initialize(Guard::Patrol, &ctx).unwrap();
        fsm.perform_transition(Guard::Chase, &ctx).unwrap();
        assert!(fsm.is_in(Guard::Chase));
    }
}
