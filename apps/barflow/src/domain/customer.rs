use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, ValidationKind};

/// Non-empty, trimmed customer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyCustomerId,
                "customer id must not be empty",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CustomerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerId> for String {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    Weak,
    #[default]
    Normal,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IcePreference {
    #[default]
    Neutral,
    Like,
    Dislike,
}

/// Opaque handle to a portrait set owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortraitSetRef(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: CustomerId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub tolerance: Tolerance,
    #[serde(default)]
    pub ice_preference: IcePreference,
    #[serde(default)]
    pub portrait_set: Option<PortraitSetRef>,
}

impl CustomerProfile {
    pub fn new(id: CustomerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            tolerance: Tolerance::default(),
            ice_preference: IcePreference::default(),
            portrait_set: None,
        }
    }

    /// Display name, falling back to the id when the name is blank.
    pub fn name_or_id(&self) -> &str {
        let name = self.display_name.trim();
        if name.is_empty() {
            self.id.as_str()
        } else {
            name
        }
    }
}
