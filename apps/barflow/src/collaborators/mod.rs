//! Contracts with the systems around the flow.
//!
//! Each trait is a narrow request/response seam. The flow owns its
//! collaborators as boxed trait objects and never hands out mutable
//! references into its own state.

mod trait_def;

pub use trait_def::{
    BooksSnapshot, CustomerSource, DayReport, DaySignalListener, Economy, Ledger,
    NavigationError, OrderBuilder, PreparationSurface, Reputation, Scorer, StayApplier,
};
