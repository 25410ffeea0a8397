//! Order slots: what a customer asks for, authored and built.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::customer::CustomerProfile;
use super::DayNumber;
use crate::collaborators::OrderBuilder;

/// Upper bound on sequential orders per customer.
pub const MAX_SLOTS_PER_CUSTOMER: usize = 3;

fn default_time_limit_secs() -> f32 {
    60.0
}

/// Emotion keyword an order is built around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Keyword {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn label(&self) -> &str {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbvRange {
    pub min: f32,
    pub max: f32,
}

impl Default for AbvRange {
    fn default() -> Self {
        Self { min: 0.0, max: 100.0 }
    }
}

/// Built order, produced by the order-generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub keywords: Vec<Keyword>,
    pub abv_range: AbvRange,
    pub time_limit_secs: f32,
    /// Target profile computed by the builder; opaque to the flow.
    #[serde(default)]
    pub target: Vec<f32>,
}

/// Authored form of one slot, as it appears in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAuthoring {
    /// Blank means "say the keywords".
    #[serde(default)]
    pub dialogue_line: Option<String>,
    #[serde(default)]
    pub post_serve_lines: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub abv_range: AbvRange,
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: f32,
}

impl Default for SlotAuthoring {
    fn default() -> Self {
        Self {
            dialogue_line: None,
            post_serve_lines: Vec::new(),
            keywords: Vec::new(),
            abv_range: AbvRange::default(),
            time_limit_secs: default_time_limit_secs(),
        }
    }
}

/// Runtime slot, built once when the customer is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSlot {
    pub order: OrderSpec,
    pub keywords: Vec<Keyword>,
    pub dialogue_line: Option<String>,
    pub post_serve_lines: Vec<String>,
}

impl OrderSlot {
    /// Authored line, or the keyword labels joined with ", ".
    ///
    /// Returns `None` when there is neither a line nor any keyword.
    pub fn order_line(&self) -> Option<String> {
        if let Some(line) = self.dialogue_line.as_deref().map(str::trim) {
            if !line.is_empty() {
                return Some(line.to_string());
            }
        }
        if self.keywords.is_empty() {
            return None;
        }
        Some(
            self.keywords
                .iter()
                .map(Keyword::label)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// A customer together with their authored slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDefinition {
    pub profile: CustomerProfile,
    #[serde(default)]
    pub slots: Vec<SlotAuthoring>,
}

impl CustomerDefinition {
    /// Build runtime slots through the order builder, keeping at most
    /// `max_slots` of them.
    pub fn build_slots(&self, builder: &mut dyn OrderBuilder, max_slots: usize) -> Vec<OrderSlot> {
        if self.slots.len() > max_slots {
            warn!(
                customer_id = %self.profile.id,
                authored = self.slots.len(),
                max_slots,
                "Customer has more slots than allowed; extra slots dropped"
            );
        }

        self.slots
            .iter()
            .take(max_slots)
            .map(|slot| OrderSlot {
                order: builder.build_order(&slot.keywords, slot.abv_range, slot.time_limit_secs),
                keywords: slot.keywords.clone(),
                dialogue_line: slot.dialogue_line.clone(),
                post_serve_lines: slot.post_serve_lines.clone(),
            })
            .collect()
    }
}

/// Authored content for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day_number: DayNumber,
    #[serde(default)]
    pub intro_lines: Vec<String>,
    #[serde(default)]
    pub customers: Vec<CustomerDefinition>,
}

impl DayPlan {
    pub fn find_profile(&self, id: &str) -> Option<&CustomerProfile> {
        self.customers
            .iter()
            .map(|c| &c.profile)
            .find(|p| p.id.as_str() == id)
    }
}
