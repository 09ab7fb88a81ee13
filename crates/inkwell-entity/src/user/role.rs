//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles forwarded by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Can moderate comments.
    Staff,
    /// Regular reader and author.
    #[default]
    Member,
}

impl UserRole {
    /// Check if this role can moderate comments.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = inkwell_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "member" => Ok(Self::Member),
            _ => Err(inkwell_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: staff, member"
            ))),
        }
    }
}
