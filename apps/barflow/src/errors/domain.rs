//! Validation errors for authored content (customer ids, slots, day plans).
//!
//! These never come out of the orchestrator's gated operations; they are
//! raised when catalogs and profiles are constructed or deserialized.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    EmptyCustomerId,
    NoSlots,
    InvalidDayNumber,
    DuplicateDay,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Authored content breaks a structural rule
    Validation(ValidationKind, String),
    /// Authored content could not be parsed at all
    Parse(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Parse(d) => write!(f, "parse error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse(detail.into())
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::Parse(_) => None,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::parse(err.to_string())
    }
}
