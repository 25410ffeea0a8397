use tracing::info;

use crate::collaborators::Economy;
use crate::domain::CustomerResult;

/// Income multiplier for a reputation score.
pub fn income_multiplier(reputation: f32) -> f32 {
    match reputation {
        r if r <= 1.0 => 0.7,
        r if r <= 2.0 => 0.9,
        r if r <= 3.0 => 1.0,
        r if r <= 4.0 => 1.1,
        r if r <= 4.5 => 1.25,
        _ => 1.5,
    }
}

/// Balance plus income earned today but not yet realized.
#[derive(Debug, Clone, Default)]
pub struct TavernEconomy {
    money: i64,
    pending_income: i64,
}

impl TavernEconomy {
    pub fn with_money(money: i64) -> Self {
        Self {
            money,
            pending_income: 0,
        }
    }
}

impl Economy for TavernEconomy {
    fn apply_result(&mut self, result: &CustomerResult, reputation: f32) {
        self.add_income(result.total_tip, reputation);
    }

    fn add_income(&mut self, base_amount: i64, reputation: f32) -> i64 {
        if base_amount == 0 {
            return 0;
        }
        let multiplier = income_multiplier(reputation);
        let amount = (base_amount as f64 * f64::from(multiplier)).round() as i64;
        self.pending_income += amount;
        info!(
            amount,
            base_amount,
            reputation,
            pending = self.pending_income,
            money = self.money,
            "Income booked"
        );
        amount
    }

    fn apply_pending_income(&mut self) -> i64 {
        let applied = std::mem::take(&mut self.pending_income);
        if applied != 0 {
            self.money += applied;
            info!(applied, money = self.money, "Pending income realized");
        }
        applied
    }

    fn money(&self) -> i64 {
        self.money
    }

    fn pending_income(&self) -> i64 {
        self.pending_income
    }
}
