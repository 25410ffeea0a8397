//! Ticketed switch to the preparation surface.
//!
//! `request_service_transition` mints a ticket and hands the surface an
//! immutable snapshot. Only a completion carrying that ticket binds the
//! handoff; fulfillments are accepted only while bound.

use tracing::{debug, info, warn};
use ulid::Ulid;

use super::ServiceFlow;
use crate::collaborators::NavigationError;
use crate::domain::{HandoffState, Phase};
use crate::errors::FlowError;

impl ServiceFlow {
    /// Ask the preparation surface to take over the current slot.
    ///
    /// A repeated request while a switch is in flight or bound is a no-op.
    pub fn request_service_transition(&mut self) -> Result<Phase, FlowError> {
        const OP: &str = "request_service_transition";
        match self.phase {
            Phase::InService {
                handoff: HandoffState::Idle,
            } => {}
            Phase::InService { handoff } => {
                debug!(?handoff, "Service transition already requested");
                return Ok(self.phase);
            }
            _ => return Err(self.reject(OP)),
        }
        if self.surface.is_none() {
            return Err(self.missing(OP, "preparation_surface"));
        }

        let ticket = Ulid::new();
        let Some(handoff) = self.session.as_ref().and_then(|s| s.handoff(ticket)) else {
            return Err(self.reject(OP));
        };
        info!(
            %ticket,
            customer_id = %handoff.profile.id,
            slot_index = handoff.slot_index,
            slot_count = handoff.slot_count,
            "Service transition requested"
        );

        self.enter(Phase::InService {
            handoff: HandoffState::InFlight(ticket),
        });
        let entered = match self.surface.as_mut() {
            Some(surface) => surface.enter(handoff),
            None => Err(NavigationError("preparation surface missing".to_string())),
        };
        match entered {
            Ok(()) => Ok(self.phase),
            Err(NavigationError(reason)) => Ok(self.navigation_failed(reason)),
        }
    }

    /// The surface finished switching for `ticket`.
    pub fn on_preparation_ready(&mut self, ticket: Ulid) -> Result<Phase, FlowError> {
        match self.phase {
            Phase::InService {
                handoff: HandoffState::InFlight(current),
            } if current == ticket => {
                info!(%ticket, "Preparation surface ready");
                Ok(self.enter(Phase::InService {
                    handoff: HandoffState::Bound(ticket),
                }))
            }
            Phase::InService {
                handoff: HandoffState::Bound(current),
            } if current == ticket => {
                debug!(%ticket, "Preparation surface already bound");
                Ok(self.phase)
            }
            _ => Err(self.stale(ticket)),
        }
    }

    /// The surface could not switch (or lost the switch) for `ticket`.
    ///
    /// The customer is dropped: today's index moves past them, the served
    /// count does not, and the flow waits for the next customer.
    pub fn on_preparation_failed(
        &mut self,
        ticket: Ulid,
        reason: impl Into<String>,
    ) -> Result<Phase, FlowError> {
        match self.phase {
            Phase::InService {
                handoff: HandoffState::InFlight(current) | HandoffState::Bound(current),
            } if current == ticket => Ok(self.navigation_failed(reason.into())),
            _ => Err(self.stale(ticket)),
        }
    }

    fn navigation_failed(&mut self, reason: String) -> Phase {
        if let Some(session) = self.session.take() {
            warn!(
                customer_id = %session.profile().id,
                reason = %reason,
                "Preparation failed; customer dropped"
            );
        }
        self.today_customer_index += 1;
        self.lines.clear();
        self.redirect(FlowError::NavigationFailure(reason), Phase::AwaitingCustomer)
    }

    fn stale(&self, ticket: Ulid) -> FlowError {
        warn!(%ticket, phase = self.phase.name(), "Ignoring stale preparation ticket");
        FlowError::StaleTicket(ticket)
    }
}
