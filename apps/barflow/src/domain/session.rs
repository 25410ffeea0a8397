use ulid::Ulid;

use super::customer::CustomerProfile;
use super::drink::{Drink, DrinkResult};
use super::order::{OrderSlot, OrderSpec};

/// Per-customer accumulator; at most one exists at a time.
#[derive(Debug, Clone)]
pub struct SessionState {
    profile: CustomerProfile,
    slots: Vec<OrderSlot>,
    slot_cursor: usize,
    served_drinks: Vec<Drink>,
    served_results: Vec<DrinkResult>,
    drink_names: Vec<String>,
    left_early: bool,
}

impl SessionState {
    pub fn new(profile: CustomerProfile, slots: Vec<OrderSlot>) -> Self {
        Self {
            profile,
            slots,
            slot_cursor: 0,
            served_drinks: Vec::new(),
            served_results: Vec::new(),
            drink_names: Vec::new(),
            left_early: false,
        }
    }

    pub fn profile(&self) -> &CustomerProfile {
        &self.profile
    }

    pub fn slots(&self) -> &[OrderSlot] {
        &self.slots
    }

    pub fn slot_cursor(&self) -> usize {
        self.slot_cursor
    }

    pub fn current_slot(&self) -> Option<&OrderSlot> {
        self.slots.get(self.slot_cursor)
    }

    pub fn is_last_slot(&self) -> bool {
        self.slot_cursor + 1 >= self.slots.len()
    }

    pub fn served_drinks(&self) -> &[Drink] {
        &self.served_drinks
    }

    pub fn served_results(&self) -> &[DrinkResult] {
        &self.served_results
    }

    pub fn drink_names(&self) -> &[String] {
        &self.drink_names
    }

    pub fn left_early(&self) -> bool {
        self.left_early
    }

    pub(crate) fn record_fulfillment(&mut self, drink: Drink, result: DrinkResult) {
        if result.customer_left {
            self.left_early = true;
        }
        self.served_drinks.push(drink);
        self.served_results.push(result);
    }

    pub(crate) fn record_name(&mut self, name: String) {
        self.drink_names.push(name);
    }

    /// Move to the next slot; the cursor never passes `slots.len()`.
    pub(crate) fn advance_cursor(&mut self) {
        if self.slot_cursor < self.slots.len() {
            self.slot_cursor += 1;
        }
    }

    /// Snapshot handed to the preparation surface for the current slot.
    pub fn handoff(&self, ticket: Ulid) -> Option<ServiceHandoff> {
        let slot = self.current_slot()?;
        Some(ServiceHandoff {
            ticket,
            profile: self.profile.clone(),
            order: slot.order.clone(),
            slot_index: self.slot_cursor,
            slot_count: self.slots.len(),
            prior_drinks: self.served_drinks.clone(),
            prior_results: self.served_results.clone(),
            left_early: self.left_early,
        })
    }
}

/// Immutable input for one preparation round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceHandoff {
    pub ticket: Ulid,
    pub profile: CustomerProfile,
    pub order: OrderSpec,
    /// 0-based index of the slot being prepared.
    pub slot_index: usize,
    pub slot_count: usize,
    pub prior_drinks: Vec<Drink>,
    pub prior_results: Vec<DrinkResult>,
    pub left_early: bool,
}

/// Trimmed name, or `"<customer>'s drink"` when the input is blank.
pub fn resolve_drink_name(input: &str, profile: &CustomerProfile) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        format!("{}'s drink", profile.name_or_id())
    } else {
        trimmed.to_string()
    }
}
