//! Journal author identity.
//!
//! Authentication lives outside this service, so the caller-supplied user
//! identifier is an opaque string. Legacy clients send numeric identifiers;
//! those arrive here already rendered as decimal text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`] and [`DisplayName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
}

/// Opaque identifier of the journal author.
///
/// # Examples
/// ```
/// use unbothered_backend::domain::UserId;
///
/// let id = UserId::new("42").expect("non-empty id");
/// assert_eq!(id.as_ref(), "42");
/// assert!(UserId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`], trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Name the author wants to be addressed by.
///
/// The value is kept exactly as submitted; only blank names are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
