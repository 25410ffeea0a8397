use tracing::{debug, info};

use crate::collaborators::{Economy, StayApplier};
use crate::domain::CustomerResult;

pub const DEFAULT_STAY_REWARD: i64 = 100;

/// Rents a room to customers who can no longer go home.
#[derive(Debug, Clone)]
pub struct InnStay {
    base_reward: i64,
    guests: u32,
}

impl InnStay {
    pub fn new(base_reward: i64) -> Self {
        Self {
            base_reward,
            guests: 0,
        }
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    /// Reward for one stay; guests past their limit pay half.
    pub fn reward_for(&self, result: &CustomerResult) -> i64 {
        if result.is_over {
            self.base_reward / 2
        } else {
            self.base_reward
        }
    }
}

impl Default for InnStay {
    fn default() -> Self {
        Self::new(DEFAULT_STAY_REWARD)
    }
}

impl StayApplier for InnStay {
    fn try_sleep(
        &mut self,
        result: &CustomerResult,
        economy: &mut dyn Economy,
        reputation: f32,
    ) -> bool {
        if !result.can_sleep_at_inn {
            debug!(customer_id = %result.customer_id, "Stay refused: not eligible");
            return false;
        }
        let booked = economy.add_income(self.reward_for(result), reputation);
        self.guests += 1;
        info!(customer_id = %result.customer_id, booked, "Customer stays the night");
        true
    }
}
