use tracing::debug;

use crate::collaborators::Reputation;
use crate::domain::CustomerResult;

pub const REPUTATION_MIN: f32 = 0.0;
pub const REPUTATION_MAX: f32 = 5.0;
pub const REPUTATION_START: f32 = 2.5;

/// Running reputation score; applies each result's precomputed delta.
#[derive(Debug, Clone)]
pub struct ReputationBook {
    score: f32,
}

impl ReputationBook {
    pub fn with_score(score: f32) -> Self {
        Self {
            score: score.clamp(REPUTATION_MIN, REPUTATION_MAX),
        }
    }
}

impl Default for ReputationBook {
    fn default() -> Self {
        Self::with_score(REPUTATION_START)
    }
}

impl Reputation for ReputationBook {
    fn apply_result(&mut self, result: &CustomerResult) {
        let before = self.score;
        self.score = (self.score + result.reputation_delta).clamp(REPUTATION_MIN, REPUTATION_MAX);
        debug!(
            customer_id = %result.customer_id,
            before,
            after = self.score,
            "Reputation applied"
        );
    }

    fn score(&self) -> f32 {
        self.score
    }
}
