//! Service-day progression orchestrator.
//!
//! `ServiceFlow` owns the single active `Phase` and exposes one method per
//! user or collaborator action. Every method either moves the flow to a
//! defined phase or returns an error and leaves all state untouched.
//!
//! Operations are grouped by concern:
//! - `day_lifecycle`: prepare, dialogue, settle
//! - `customer_actions`: receive customer/order, fulfill, rename
//! - `service_handoff`: the ticketed switch to the preparation surface
//! - `disposal`: sleep/evict decisions
//! - `presentation`: view dispatch

mod builder;
mod customer_actions;
mod day_lifecycle;
mod disposal;
mod presentation;
mod service_handoff;
mod transitions;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests_customer_actions;
#[cfg(test)]
mod tests_presentation;

pub use builder::ServiceFlowBuilder;

use crate::collaborators::{CustomerSource, OrderBuilder, PreparationSurface, Scorer};
use crate::config::flow::FlowConfig;
use crate::domain::{DayPlan, PendingAdvance, Phase, SessionState};
use crate::services::events::FlowEvent;
use crate::systems::DayCycle;

pub struct ServiceFlow {
    config: FlowConfig,
    day_cycle: DayCycle,
    source: Option<Box<dyn CustomerSource>>,
    order_builder: Option<Box<dyn OrderBuilder>>,
    scorer: Option<Box<dyn Scorer>>,
    surface: Option<Box<dyn PreparationSurface>>,
    phase: Phase,
    today_plan: Option<DayPlan>,
    today_customer_index: usize,
    customers_target_today: usize,
    served_customers_today: usize,
    session: Option<SessionState>,
    /// Filtered lines of whichever dialogue is active (intro or post-serve).
    lines: Vec<String>,
    events: Vec<FlowEvent>,
}

impl std::fmt::Debug for ServiceFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFlow")
            .field("phase", &self.phase)
            .field("day", &self.day_cycle.current_day())
            .field("today_customer_index", &self.today_customer_index)
            .field("customers_target_today", &self.customers_target_today)
            .field("served_customers_today", &self.served_customers_today)
            .field("session", &self.session.as_ref().map(|s| s.profile().id.clone()))
            .field("pending_decisions", &self.day_cycle.queue().len())
            .finish()
    }
}

impl ServiceFlow {
    pub fn builder() -> ServiceFlowBuilder {
        ServiceFlowBuilder::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_advance(&self) -> PendingAdvance {
        self.phase.pending_advance()
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn day_cycle(&self) -> &DayCycle {
        &self.day_cycle
    }

    /// Mutable access for registering listeners between days.
    pub fn day_cycle_mut(&mut self) -> &mut DayCycle {
        &mut self.day_cycle
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn today_plan(&self) -> Option<&DayPlan> {
        self.today_plan.as_ref()
    }

    pub fn today_customer_index(&self) -> usize {
        self.today_customer_index
    }

    pub fn customers_target_today(&self) -> usize {
        self.customers_target_today
    }

    pub fn served_customers_today(&self) -> usize {
        self.served_customers_today
    }

    pub fn has_pending_decision(&self) -> bool {
        self.day_cycle.queue().has_pending()
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<FlowEvent> {
        std::mem::take(&mut self.events)
    }
}
