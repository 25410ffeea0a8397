#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod collaborators;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod systems;
pub mod telemetry;

// Re-exports for public API
pub use config::flow::{FlowConfig, Prompts};
pub use errors::{DomainError, FlowError};
pub use services::events::FlowEvent;
pub use services::service_flow::{ServiceFlow, ServiceFlowBuilder};
pub use services::view::{DecisionView, FlowView, PromptKind, SlotPosition};
pub use systems::day_cycle::{DayCycle, DayState};
pub use systems::decision_queue::{DecisionQueue, QueueChange};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    barflow_test_support::logging::init();
}
