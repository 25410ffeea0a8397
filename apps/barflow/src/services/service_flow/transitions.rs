//! Phase changes and the disposal gate.
//!
//! All phase writes go through `enter`/`set_phase` so the disposal gate and
//! the event log cannot be bypassed.

use tracing::{debug, warn};

use super::ServiceFlow;
use crate::domain::Phase;
use crate::errors::FlowError;
use crate::services::events::FlowEvent;
use crate::systems::QueueChange;

impl ServiceFlow {
    /// Move to `next`, or to a disposal decision displacing it while the
    /// queue is non-empty.
    pub(super) fn enter(&mut self, next: Phase) -> Phase {
        let target = match next.displaceable() {
            Some(resume) if self.day_cycle.queue().has_pending() => {
                Phase::AwaitingDisposalDecision { resume }
            }
            _ => next,
        };
        self.set_phase(target)
    }

    /// Re-run the gate against the current phase after a queue change.
    pub(super) fn sync_disposal_gate(&mut self) -> Phase {
        match self.phase {
            Phase::AwaitingDisposalDecision { resume } if !self.day_cycle.queue().has_pending() => {
                self.set_phase(resume.into_phase())
            }
            current => self.enter(current),
        }
    }

    fn set_phase(&mut self, to: Phase) -> Phase {
        let from = self.phase;
        if from != to {
            debug!(from = from.name(), to = to.name(), "Phase transition");
            if from.name() != to.name() {
                self.events.push(FlowEvent::PhaseChanged {
                    from: from.name(),
                    to: to.name(),
                });
            }
        }
        self.phase = to;
        to
    }

    /// Log and build the rejection for an operation called in the wrong phase.
    pub(super) fn reject(&self, op: &'static str) -> FlowError {
        warn!(op, phase = self.phase.name(), "Rejected: wrong phase");
        FlowError::invalid_phase(op, self.phase.name())
    }

    pub(super) fn missing(&self, op: &'static str, collaborator: &'static str) -> FlowError {
        warn!(op, collaborator, phase = self.phase.name(), "Rejected: collaborator missing");
        FlowError::MissingCollaborator(collaborator)
    }

    /// Record a redirect and move to `to`.
    pub(super) fn redirect(&mut self, cause: FlowError, to: Phase) -> Phase {
        warn!(cause = %cause, to = to.name(), "Redirecting flow");
        let landed = self.enter(to);
        self.events.push(FlowEvent::Redirected {
            cause,
            to: landed.name(),
        });
        landed
    }

    pub(super) fn record_queue_change(&mut self, change: Option<QueueChange>) {
        if let Some(change) = change {
            self.events.push(FlowEvent::DecisionQueueChanged { change });
        }
    }
}
