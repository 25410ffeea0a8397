//! Day counter and day-boundary signalling.
//!
//! The cycle owns the books (economy, reputation, ledger), the optional stay
//! collaborator and the decision queue. Finished customers are forwarded
//! here; disposal is never decided here.

use tracing::{info, warn};

use crate::collaborators::{
    BooksSnapshot, DayReport, DaySignalListener, Economy, Ledger, Reputation, StayApplier,
};
use crate::domain::{CustomerResult, DayNumber};
use crate::systems::decision_queue::{DecisionQueue, QueueChange, SleepResolution};
use crate::systems::{DailyLedger, InnStay, ReputationBook, TavernEconomy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayState {
    pub current_day: DayNumber,
    pub advance_day_on_next_start: bool,
}

impl Default for DayState {
    fn default() -> Self {
        Self {
            current_day: 1,
            advance_day_on_next_start: false,
        }
    }
}

pub struct DayCycle {
    state: DayState,
    economy: Box<dyn Economy>,
    reputation: Box<dyn Reputation>,
    ledger: Box<dyn Ledger>,
    stay: Option<Box<dyn StayApplier>>,
    queue: DecisionQueue,
    listeners: Vec<Box<dyn DaySignalListener>>,
    last_report: Option<DayReport>,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DayCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayCycle")
            .field("state", &self.state)
            .field("money", &self.economy.money())
            .field("reputation", &self.reputation.score())
            .field("has_stay", &self.stay.is_some())
            .field("queue", &self.queue)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DayCycle {
    /// Cycle with the built-in books and inn.
    pub fn new() -> Self {
        Self {
            state: DayState::default(),
            economy: Box::new(TavernEconomy::default()),
            reputation: Box::new(ReputationBook::default()),
            ledger: Box::new(DailyLedger::new()),
            stay: Some(Box::new(InnStay::default())),
            queue: DecisionQueue::new(),
            listeners: Vec::new(),
            last_report: None,
        }
    }

    pub fn with_state(mut self, state: DayState) -> Self {
        self.state = state;
        self
    }

    pub fn with_economy(mut self, economy: Box<dyn Economy>) -> Self {
        self.economy = economy;
        self
    }

    pub fn with_reputation(mut self, reputation: Box<dyn Reputation>) -> Self {
        self.reputation = reputation;
        self
    }

    pub fn with_ledger(mut self, ledger: Box<dyn Ledger>) -> Self {
        self.ledger = ledger;
        self
    }

    /// Replace the stay collaborator; `None` makes every sleep fail.
    pub fn with_stay(mut self, stay: Option<Box<dyn StayApplier>>) -> Self {
        self.stay = stay;
        self
    }

    pub fn add_listener(&mut self, listener: Box<dyn DaySignalListener>) {
        self.listeners.push(listener);
    }

    pub fn state(&self) -> DayState {
        self.state
    }

    pub fn current_day(&self) -> DayNumber {
        self.state.current_day
    }

    pub fn queue(&self) -> &DecisionQueue {
        &self.queue
    }

    pub fn last_report(&self) -> Option<&DayReport> {
        self.last_report.as_ref()
    }

    pub fn money(&self) -> i64 {
        self.economy.money()
    }

    pub fn pending_income(&self) -> i64 {
        self.economy.pending_income()
    }

    pub fn reputation(&self) -> f32 {
        self.reputation.score()
    }

    fn snapshot(&self) -> BooksSnapshot {
        BooksSnapshot {
            money: self.economy.money(),
            reputation: self.reputation.score(),
        }
    }

    /// Begin a day, moving to the next one if the previous day ended.
    pub fn start_day(&mut self) -> DayNumber {
        if self.state.advance_day_on_next_start {
            self.state.current_day += 1;
            self.state.advance_day_on_next_start = false;
        }
        let day = self.state.current_day;
        let opening = self.snapshot();
        self.ledger.on_day_started(day, opening);
        for listener in &mut self.listeners {
            listener.on_day_started(day);
        }
        info!(day, money = opening.money, reputation = opening.reputation, "Day started");
        day
    }

    /// Close the current day: realize income and produce its report.
    pub fn end_day(&mut self) -> DayReport {
        let realized = self.economy.apply_pending_income();
        self.state.advance_day_on_next_start = true;
        let day = self.state.current_day;
        let closing = self.snapshot();
        let report = self.ledger.on_day_ended(day, closing, realized);
        for listener in &mut self.listeners {
            listener.on_day_ended(&report);
        }
        info!(day, realized, money = closing.money, "Day ended");
        self.last_report = Some(report.clone());
        report
    }

    /// Book a finished customer: reputation, economy, ledger, then the queue.
    pub fn on_customer_finished(&mut self, result: CustomerResult) -> Option<QueueChange> {
        self.reputation.apply_result(&result);
        let reputation = self.reputation.score();
        self.economy.apply_result(&result, reputation);
        self.ledger.record_customer(&result);
        self.queue.enqueue(result)
    }

    /// Resolve the front decision as a stay.
    pub fn resolve_sleep(&mut self) -> Option<SleepResolution> {
        let reputation = self.reputation.score();
        let economy = self.economy.as_mut();
        let stay = &mut self.stay;
        let resolution = self.queue.resolve_sleep(|result| match stay.as_mut() {
            Some(stay) => stay.try_sleep(result, economy, reputation),
            None => {
                warn!(customer_id = %result.customer_id, "No stay collaborator; sleep fails");
                false
            }
        })?;
        if resolution.slept {
            self.ledger.record_sleep_success();
        }
        Some(resolution)
    }

    /// Resolve the front decision as an eviction.
    pub fn resolve_evict(&mut self) -> Option<(CustomerResult, QueueChange)> {
        self.queue.resolve_evict()
    }
}
