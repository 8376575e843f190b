//! Username value object.

use std::fmt;

use thiserror::Error;

/// Errors raised when constructing a [`Username`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    /// Empty input
    #[error("Username must not be empty")]
    Empty,
}

/// Name identifying the local participant for the lifetime of one connection.
///
/// Always non-empty. The value is kept as typed, without trimming, because the
/// server compares it byte-for-byte against `person1.username`; a name made of
/// spaces is still a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, UsernameError> {
        if value.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
