//! Values that cross the boundary with the preparation and scoring
//! collaborators. The flow stores and forwards them without interpreting
//! anything beyond `customer_left` and `can_sleep_at_inn`.

use serde::{Deserialize, Serialize};

use super::customer::CustomerId;

/// A prepared drink as reported by the preparation surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drink {
    pub abv: f32,
    pub volume_ml: f32,
    pub uses_ice: bool,
}

/// Per-drink outcome computed by the preparation surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrinkResult {
    pub satisfaction: f32,
    pub tip: i64,
    pub customer_left: bool,
}

/// Aggregate produced by the scoring collaborator when a customer is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerResult {
    pub customer_id: CustomerId,
    pub drink_results: Vec<DrinkResult>,
    pub average_satisfaction: f32,
    pub total_tip: i64,
    pub reputation_delta: f32,
    pub left_early: bool,
    pub intox_stage: u8,
    pub can_sleep_at_inn: bool,
    pub is_over: bool,
}

/// Portrait variant for an intoxication stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortraitStage {
    Sober,
    Tipsy,
    Drunk,
    Wasted,
}

impl PortraitStage {
    pub fn from_intox_stage(stage: u8) -> Self {
        match stage {
            0 | 1 => PortraitStage::Sober,
            2 => PortraitStage::Tipsy,
            3 => PortraitStage::Drunk,
            _ => PortraitStage::Wasted,
        }
    }
}
