use tracing::info;

use super::ServiceFlow;
use crate::domain::{CustomerProfile, Phase, PortraitStage};
use crate::errors::FlowError;
use crate::services::view::DecisionView;

impl ServiceFlow {
    /// Let the front customer stay the night.
    ///
    /// The entry leaves the queue even when the stay is refused.
    pub fn resolve_sleep(&mut self) -> Result<Phase, FlowError> {
        let Some(resolution) = self.day_cycle.resolve_sleep() else {
            return Err(self.reject("resolve_sleep"));
        };
        info!(
            customer_id = %resolution.result.customer_id,
            slept = resolution.slept,
            pending = resolution.change.pending(),
            "Sleep decision applied"
        );
        self.record_queue_change(Some(resolution.change));
        Ok(self.sync_disposal_gate())
    }

    /// Send the front customer home.
    pub fn resolve_evict(&mut self) -> Result<Phase, FlowError> {
        let Some((result, change)) = self.day_cycle.resolve_evict() else {
            return Err(self.reject("resolve_evict"));
        };
        info!(
            customer_id = %result.customer_id,
            pending = change.pending(),
            "Evict decision applied"
        );
        self.record_queue_change(Some(change));
        Ok(self.sync_disposal_gate())
    }

    /// The front decision with the customer's profile and portrait stage.
    pub fn pending_decision_view(&self) -> Option<DecisionView> {
        let queue = self.day_cycle.queue();
        let result = queue.peek()?.clone();
        let profile = self.lookup_profile(result.customer_id.as_str());
        Some(DecisionView {
            stage: PortraitStage::from_intox_stage(result.intox_stage),
            pending: queue.len(),
            profile,
            result,
        })
    }

    /// Active customer, then today's plan, then the source.
    fn lookup_profile(&self, id: &str) -> Option<CustomerProfile> {
        if let Some(session) = &self.session {
            if session.profile().id.as_str() == id {
                return Some(session.profile().clone());
            }
        }
        if let Some(profile) = self.today_plan.as_ref().and_then(|p| p.find_profile(id)) {
            return Some(profile.clone());
        }
        self.source.as_ref()?.find_profile(id)
    }
}
