//! Error handling for the service flow.

pub mod domain;
pub mod flow;

pub use domain::{DomainError, ValidationKind};
pub use flow::FlowError;
