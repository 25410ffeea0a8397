//! Domain layer: service-day types and pure helpers.

pub mod catalog;
pub mod customer;
pub mod dialogue;
pub mod drink;
pub mod order;
pub mod phase;
pub mod session;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_catalog;
#[cfg(test)]
mod tests_phase;

// Re-exports for ergonomics
pub use catalog::{CatalogFile, CustomerCatalog};
pub use customer::{CustomerId, CustomerProfile, IcePreference, PortraitSetRef, Tolerance};
pub use dialogue::filter_lines;
pub use drink::{CustomerResult, Drink, DrinkResult, PortraitStage};
pub use order::{
    AbvRange, CustomerDefinition, DayPlan, Keyword, OrderSlot, OrderSpec, SlotAuthoring,
    MAX_SLOTS_PER_CUSTOMER,
};
pub use phase::{HandoffState, PendingAdvance, Phase, Resume};
pub use session::{resolve_drink_name, ServiceHandoff, SessionState};

/// 1-based day counter.
pub type DayNumber = u32;
