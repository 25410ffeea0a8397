use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    AbvRange, CustomerDefinition, CustomerProfile, CustomerResult, DayNumber, DayPlan, Keyword,
    OrderSpec, ServiceHandoff, SessionState,
};

/// Builds the target of one order from its authored keywords.
pub trait OrderBuilder {
    fn build_order(&mut self, keywords: &[Keyword], abv_range: AbvRange, time_limit_secs: f32)
        -> OrderSpec;
}

/// Supplies authored day plans and the random customer pool.
pub trait CustomerSource {
    fn find_plan_for_day(&self, day: DayNumber) -> Option<DayPlan>;

    /// Uniformly random pool customer, `None` when the pool is empty.
    fn pick_from_pool(&mut self) -> Option<CustomerDefinition>;

    /// Profile lookup for customers that are no longer active.
    fn find_profile(&self, id: &str) -> Option<CustomerProfile>;

    /// Restart pool selection from `seed`. Sources without randomness
    /// ignore it.
    fn reseed(&mut self, _seed: u64) {}
}

/// The context switch could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NavigationError(pub String);

/// The surface where drinks are prepared.
///
/// `enter` starts the switch and returns before it completes. The surface
/// reports completion through `ServiceFlow::on_preparation_ready` (or
/// `on_preparation_failed`) with the handoff's ticket, and the prepared drink
/// through `ServiceFlow::submit_fulfillment`.
pub trait PreparationSurface {
    fn enter(&mut self, handoff: ServiceHandoff) -> Result<(), NavigationError>;
}

/// Turns a finished session into a `CustomerResult`.
pub trait Scorer {
    fn score_customer(&self, session: &SessionState) -> CustomerResult;
}

pub trait Economy {
    /// Book the result's tips as pending income.
    fn apply_result(&mut self, result: &CustomerResult, reputation: f32);

    /// Book arbitrary income as pending; returns the amount actually booked.
    fn add_income(&mut self, base_amount: i64, reputation: f32) -> i64;

    /// Move pending income into the balance; returns the amount moved.
    fn apply_pending_income(&mut self) -> i64;

    fn money(&self) -> i64;

    fn pending_income(&self) -> i64;
}

pub trait Reputation {
    fn apply_result(&mut self, result: &CustomerResult);

    fn score(&self) -> f32;
}

/// Balance and reputation at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BooksSnapshot {
    pub money: i64,
    pub reputation: f32,
}

/// Per-day totals produced at settlement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayReport {
    pub day: DayNumber,
    pub served_customers: u32,
    pub served_drinks: u32,
    pub slept_customers: u32,
    pub realized_income: i64,
    pub income_delta: i64,
    pub reputation_delta: f32,
}

pub trait Ledger {
    fn on_day_started(&mut self, day: DayNumber, opening: BooksSnapshot);

    fn on_day_ended(
        &mut self,
        day: DayNumber,
        closing: BooksSnapshot,
        realized_income: i64,
    ) -> DayReport;

    fn record_customer(&mut self, result: &CustomerResult);

    fn record_sleep_success(&mut self);
}

/// Lets a customer stay the night.
pub trait StayApplier {
    /// Returns whether the stay was applied; income goes through `economy`.
    fn try_sleep(
        &mut self,
        result: &CustomerResult,
        economy: &mut dyn Economy,
        reputation: f32,
    ) -> bool;
}

/// Subscriber to day boundaries, registered on the day cycle at startup.
pub trait DaySignalListener {
    fn on_day_started(&mut self, day: DayNumber);

    fn on_day_ended(&mut self, report: &DayReport);
}
