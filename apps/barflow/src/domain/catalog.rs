//! Authored customers and day plans, with seeded pool selection.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::customer::CustomerProfile;
use super::order::{CustomerDefinition, DayPlan};
use super::DayNumber;
use crate::collaborators::CustomerSource;
use crate::errors::{DomainError, ValidationKind};

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub plans: Vec<DayPlan>,
    #[serde(default)]
    pub pool: Vec<CustomerDefinition>,
}

/// In-memory customer source backed by authored content.
pub struct CustomerCatalog {
    plans: Vec<DayPlan>,
    pool: Vec<CustomerDefinition>,
    rng: ChaCha8Rng,
}

impl CustomerCatalog {
    /// Build a catalog. `seed` makes pool picks reproducible.
    pub fn new(
        plans: Vec<DayPlan>,
        pool: Vec<CustomerDefinition>,
        seed: Option<u64>,
    ) -> Result<Self, DomainError> {
        let catalog = Self {
            plans,
            pool,
            rng: ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random)),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(file: CatalogFile, seed: Option<u64>) -> Result<Self, DomainError> {
        Self::new(file.plans, file.pool, seed)
    }

    pub fn from_json_str(raw: &str, seed: Option<u64>) -> Result<Self, DomainError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::from_file(file, seed)
    }

    pub fn plans(&self) -> &[DayPlan] {
        &self.plans
    }

    pub fn pool(&self) -> &[CustomerDefinition] {
        &self.pool
    }

    fn validate(&self) -> Result<(), DomainError> {
        let mut days = HashSet::new();
        for plan in &self.plans {
            if plan.day_number == 0 {
                return Err(DomainError::validation(
                    ValidationKind::InvalidDayNumber,
                    "day_number is 1-based",
                ));
            }
            if !days.insert(plan.day_number) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicateDay,
                    format!("day {} has more than one plan", plan.day_number),
                ));
            }
        }

        let definitions = self
            .plans
            .iter()
            .flat_map(|p| p.customers.iter())
            .chain(self.pool.iter());
        for def in definitions {
            if def.slots.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::NoSlots,
                    format!("customer {} has no order slots", def.profile.id),
                ));
            }
        }
        Ok(())
    }
}

impl CustomerSource for CustomerCatalog {
    /// Exact `day_number` match first, then the plan at position `day - 1`.
    fn find_plan_for_day(&self, day: DayNumber) -> Option<DayPlan> {
        if let Some(plan) = self.plans.iter().find(|p| p.day_number == day) {
            return Some(plan.clone());
        }
        let idx = usize::try_from(day).ok()?.checked_sub(1)?;
        self.plans.get(idx).cloned()
    }

    fn pick_from_pool(&mut self) -> Option<CustomerDefinition> {
        if self.pool.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.pool.len());
        debug!(idx, pool = self.pool.len(), "Picked pool customer");
        self.pool.get(idx).cloned()
    }

    fn find_profile(&self, id: &str) -> Option<CustomerProfile> {
        self.plans
            .iter()
            .flat_map(|p| p.customers.iter())
            .chain(self.pool.iter())
            .map(|def| &def.profile)
            .find(|profile| profile.id.as_str() == id)
            .cloned()
    }

    fn reseed(&mut self, seed: u64) {
        debug!(seed, "Catalog pool reseeded");
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}
