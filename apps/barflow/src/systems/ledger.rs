use tracing::info;

use crate::collaborators::{BooksSnapshot, DayReport, Ledger};
use crate::domain::{CustomerResult, DayNumber};

/// Per-day tallies, reset at every day start.
#[derive(Debug, Clone, Default)]
pub struct DailyLedger {
    day: DayNumber,
    opening: BooksSnapshot,
    served_customers: u32,
    served_drinks: u32,
    slept_customers: u32,
    history: Vec<DayReport>,
}

impl DailyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports of every settled day, oldest first.
    pub fn history(&self) -> &[DayReport] {
        &self.history
    }

    pub fn served_customers(&self) -> u32 {
        self.served_customers
    }

    pub fn slept_customers(&self) -> u32 {
        self.slept_customers
    }
}

impl Ledger for DailyLedger {
    fn on_day_started(&mut self, day: DayNumber, opening: BooksSnapshot) {
        self.day = day;
        self.opening = opening;
        self.served_customers = 0;
        self.served_drinks = 0;
        self.slept_customers = 0;
    }

    fn on_day_ended(
        &mut self,
        day: DayNumber,
        closing: BooksSnapshot,
        realized_income: i64,
    ) -> DayReport {
        let report = DayReport {
            day,
            served_customers: self.served_customers,
            served_drinks: self.served_drinks,
            slept_customers: self.slept_customers,
            realized_income,
            income_delta: closing.money - self.opening.money,
            reputation_delta: closing.reputation - self.opening.reputation,
        };
        info!(
            day,
            served_customers = report.served_customers,
            served_drinks = report.served_drinks,
            slept_customers = report.slept_customers,
            income_delta = report.income_delta,
            "Day closed in ledger"
        );
        self.history.push(report.clone());
        report
    }

    fn record_customer(&mut self, result: &CustomerResult) {
        self.served_customers += 1;
        self.served_drinks += u32::try_from(result.drink_results.len()).unwrap_or(u32::MAX);
    }

    fn record_sleep_success(&mut self) {
        self.slept_customers += 1;
    }
}
