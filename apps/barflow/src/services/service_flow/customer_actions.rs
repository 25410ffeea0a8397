use tracing::{info, warn};

use super::ServiceFlow;
use crate::domain::{
    filter_lines, resolve_drink_name, CustomerDefinition, Drink, DrinkResult, HandoffState,
    PendingAdvance, Phase, SessionState,
};
use crate::errors::FlowError;
use crate::services::events::FlowEvent;

impl ServiceFlow {
    /// Bring in the next customer.
    ///
    /// Plan customers come first, in order; once the plan is exhausted (or
    /// there is none) a random pool customer is picked. With nobody to serve
    /// the flow is redirected to settlement.
    pub fn receive_customer(&mut self) -> Result<Phase, FlowError> {
        const OP: &str = "receive_customer";
        if self.phase != Phase::AwaitingCustomer || self.day_cycle.queue().has_pending() {
            return Err(self.reject(OP));
        }
        if self.order_builder.is_none() {
            return Err(self.missing(OP, "order_builder"));
        }

        let Some(definition) = self.next_definition() else {
            return Ok(self.redirect(FlowError::EmptyCustomerPool, Phase::AwaitingSettlement));
        };

        let max_slots = self.config.max_slots_per_customer;
        let slots = match self.order_builder.as_mut() {
            Some(builder) => definition.build_slots(builder.as_mut(), max_slots),
            None => Vec::new(),
        };
        if slots.is_empty() {
            warn!(customer_id = %definition.profile.id, "Customer has no order slots");
            return Ok(self.redirect(FlowError::EmptyCustomerPool, Phase::AwaitingSettlement));
        }

        let customer_id = definition.profile.id.clone();
        let slot_count = slots.len();
        info!(
            %customer_id,
            slots = slot_count,
            index = self.today_customer_index,
            served = self.served_customers_today,
            target = self.customers_target_today,
            "Customer received"
        );
        self.session = Some(SessionState::new(definition.profile, slots));
        self.events.push(FlowEvent::CustomerArrived {
            customer_id,
            slots: slot_count,
        });

        let next = self.order_gate_phase();
        Ok(self.enter(next))
    }

    /// Open the order gate for the current slot.
    pub fn receive_order(&mut self) -> Result<Phase, FlowError> {
        if self.phase != Phase::AwaitingOrderGate || self.session.is_none() {
            return Err(self.reject("receive_order"));
        }
        Ok(self.enter(Phase::InService {
            handoff: HandoffState::Idle,
        }))
    }

    /// Record the drink the surface prepared for the current slot.
    ///
    /// Finishing the last slot (or losing the customer) scores the session
    /// and forwards the result to the day cycle before the rename.
    pub fn submit_fulfillment(
        &mut self,
        drink: Drink,
        result: DrinkResult,
    ) -> Result<Phase, FlowError> {
        const OP: &str = "submit_fulfillment";
        if !matches!(
            self.phase,
            Phase::InService {
                handoff: HandoffState::Bound(_)
            }
        ) {
            return Err(self.reject(OP));
        }
        let Some(session) = self.session.as_mut() else {
            return Err(self.reject(OP));
        };

        session.record_fulfillment(drink, result);
        let finished = session.left_early() || session.is_last_slot();
        info!(
            customer_id = %session.profile().id,
            slot = session.slot_cursor(),
            left_early = session.left_early(),
            finished,
            "Drink served"
        );

        let advance = if finished {
            self.finish_customer();
            if self.served_customers_today + 1 >= self.customers_target_today {
                PendingAdvance::EndDay
            } else {
                PendingAdvance::NextCustomer
            }
        } else {
            PendingAdvance::NextSlot
        };
        Ok(self.enter(Phase::AwaitingRename { advance }))
    }

    /// Name the drink just served; a blank name gets a default.
    pub fn confirm_rename(&mut self, name: &str) -> Result<Phase, FlowError> {
        const OP: &str = "confirm_rename";
        let Phase::AwaitingRename { advance } = self.phase else {
            return Err(self.reject(OP));
        };
        let Some(session) = self.session.as_mut() else {
            return Err(self.reject(OP));
        };

        let name = resolve_drink_name(name, session.profile());
        session.record_name(name.clone());
        let customer_id = session.profile().id.clone();
        let slot_index = session.slot_cursor();
        let post_serve = session
            .current_slot()
            .map(|slot| filter_lines(&slot.post_serve_lines))
            .unwrap_or_default();

        info!(%customer_id, slot_index, name = %name, "Drink named");
        self.events.push(FlowEvent::DrinkNamed {
            customer_id,
            slot_index,
            name,
        });

        if post_serve.is_empty() {
            return Ok(self.resolve_advance(advance));
        }
        self.lines = post_serve;
        Ok(self.enter(Phase::AwaitingPostServeDialogue { line: 0, advance }))
    }

    /// Apply the advance queued by the last fulfillment.
    pub(super) fn resolve_advance(&mut self, advance: PendingAdvance) -> Phase {
        match advance {
            PendingAdvance::NextSlot => {
                if let Some(session) = self.session.as_mut() {
                    session.advance_cursor();
                }
                let next = self.order_gate_phase();
                self.enter(next)
            }
            PendingAdvance::NextCustomer => {
                self.complete_customer();
                self.enter(Phase::AwaitingCustomer)
            }
            PendingAdvance::EndDay => {
                self.complete_customer();
                self.enter(Phase::AwaitingSettlement)
            }
            PendingAdvance::None => {
                warn!(phase = self.phase.name(), "Resolving with no pending advance");
                let next = if self.session.is_some() {
                    self.order_gate_phase()
                } else {
                    Phase::AwaitingCustomer
                };
                self.enter(next)
            }
        }
    }

    fn order_gate_phase(&self) -> Phase {
        if self.config.require_receive_order {
            Phase::AwaitingOrderGate
        } else {
            Phase::InService {
                handoff: HandoffState::Idle,
            }
        }
    }

    fn next_definition(&mut self) -> Option<CustomerDefinition> {
        let planned = self
            .today_plan
            .as_ref()
            .and_then(|plan| plan.customers.get(self.today_customer_index))
            .cloned();
        if planned.is_some() {
            return planned;
        }
        self.source.as_mut()?.pick_from_pool()
    }

    /// Score the session and hand the result to the day cycle.
    fn finish_customer(&mut self) {
        let result = match (&self.scorer, &self.session) {
            (Some(scorer), Some(session)) => scorer.score_customer(session),
            (None, Some(session)) => {
                warn!(
                    customer_id = %session.profile().id,
                    "No scorer; customer result not forwarded"
                );
                return;
            }
            _ => return,
        };

        info!(
            customer_id = %result.customer_id,
            total_tip = result.total_tip,
            can_sleep_at_inn = result.can_sleep_at_inn,
            "Customer finished"
        );
        let change = self.day_cycle.on_customer_finished(result.clone());
        self.events.push(FlowEvent::CustomerFinished { result });
        self.record_queue_change(change);
    }

    fn complete_customer(&mut self) {
        self.today_customer_index += 1;
        self.served_customers_today += 1;
        self.session = None;
        self.lines.clear();
    }
}
