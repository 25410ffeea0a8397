//! Errors reported by the orchestrator's gated operations.
//!
//! `InvalidPhase`, `MissingCollaborator` and `StaleTicket` are rejections:
//! the call left every piece of state untouched. `EmptyCustomerPool` and
//! `NavigationFailure` are redirects: the flow moved to a defined phase and
//! the cause is recorded as a `FlowEvent::Redirected`.

use thiserror::Error;
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{op} is not allowed while {phase}")]
    InvalidPhase {
        op: &'static str,
        phase: &'static str,
    },
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error("no customer available")]
    EmptyCustomerPool,
    #[error("preparation navigation failed: {0}")]
    NavigationFailure(String),
    #[error("stale preparation ticket: {0}")]
    StaleTicket(Ulid),
    #[error("configuration error: {0}")]
    Config(String),
}

impl FlowError {
    pub fn invalid_phase(op: &'static str, phase: &'static str) -> Self {
        Self::InvalidPhase { op, phase }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// Stable machine-readable code, used by the simulator's metrics.
    pub fn code(&self) -> &'static str {
        match self {
            FlowError::InvalidPhase { .. } => "INVALID_PHASE",
            FlowError::MissingCollaborator(_) => "MISSING_COLLABORATOR",
            FlowError::EmptyCustomerPool => "EMPTY_CUSTOMER_POOL",
            FlowError::NavigationFailure(_) => "NAVIGATION_FAILURE",
            FlowError::StaleTicket(_) => "STALE_TICKET",
            FlowError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// True when the error redirected the flow instead of rejecting the call.
    pub fn is_redirect(&self) -> bool {
        matches!(
            self,
            FlowError::EmptyCustomerPool | FlowError::NavigationFailure(_)
        )
    }
}
