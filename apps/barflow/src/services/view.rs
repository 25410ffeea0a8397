//! What a presentation layer should show for the current phase.

use serde::Serialize;

use crate::domain::{CustomerProfile, CustomerResult, OrderSpec, PortraitStage};

/// Which system prompt is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    StartDay,
    ReceiveCustomer,
    ReceiveOrder,
    Preparing,
    Rename,
    DisposalDecision,
    Settlement,
}

/// 0-based slot index and total slots for the active customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotPosition {
    pub index: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum FlowView {
    System {
        prompt: PromptKind,
        line: String,
    },
    DayIntro {
        line: String,
        index: usize,
        count: usize,
    },
    PostServe {
        customer: CustomerProfile,
        slot: SlotPosition,
        line: String,
        index: usize,
        count: usize,
    },
    Order {
        customer: CustomerProfile,
        slot: SlotPosition,
        line: String,
        order: OrderSpec,
        /// False while the order gate is closed.
        show_meta: bool,
    },
}

impl FlowView {
    pub fn line(&self) -> &str {
        match self {
            FlowView::System { line, .. }
            | FlowView::DayIntro { line, .. }
            | FlowView::PostServe { line, .. }
            | FlowView::Order { line, .. } => line,
        }
    }
}

/// The front disposal decision, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionView {
    pub result: CustomerResult,
    /// `None` when the customer can no longer be found anywhere.
    pub profile: Option<CustomerProfile>,
    pub stage: PortraitStage,
    pub pending: usize,
}
