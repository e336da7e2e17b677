//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User pool identifier newtype wrapper
///
/// Cognito pool IDs look like `us-east-1_AbCdEf123`.
///
/// # Examples
///
/// ```
/// use cognito_backup::domain::ids::UserPoolId;
/// use std::str::FromStr;
///
/// let pool = UserPoolId::from_str("us-east-1_AbCdEf123").unwrap();
/// assert_eq!(pool.as_str(), "us-east-1_AbCdEf123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserPoolId(String);

impl UserPoolId {
    /// Creates a new UserPoolId from a string
    ///
    /// Returns `Err` when the ID is empty or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User pool ID cannot be empty".to_string());
        }
        if id.chars().any(char::is_whitespace) {
            return Err(format!("User pool ID cannot contain whitespace: '{id}'"));
        }
        Ok(Self(id))
    }

    /// Returns the pool ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Filesystem-safe rendering of the pool ID, used to name backup files
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for UserPoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserPoolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserPoolId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
