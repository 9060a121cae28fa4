use std::str::FromStr;

use lotus_core::AppError;
use serde::{Deserialize, Serialize};

/// Operation levels a role may grant on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    /// Allows listing and reading documents.
    Read,
    /// Allows creating documents.
    Create,
    /// Allows updating documents.
    Update,
    /// Allows deleting documents.
    Delete,
    /// Allows reading every field and updating localized fields only.
    Translate,
}

impl PermissionLevel {
    /// Returns a stable storage value for this level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Translate => "translate",
        }
    }

    /// Returns all known levels.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionLevel] = &[
            PermissionLevel::Read,
            PermissionLevel::Create,
            PermissionLevel::Update,
            PermissionLevel::Delete,
            PermissionLevel::Translate,
        ];

        ALL
    }

    /// Parses a transport value into a permission level.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for PermissionLevel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "translate" => Ok(Self::Translate),
            _ => Err(AppError::Validation(format!(
                "unknown permission level '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Operations the collection-configuration layer asks about.
///
/// `translate` is a grant, never a requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOperation {
    /// List or read documents.
    Read,
    /// Create a document.
    Create,
    /// Update a document.
    Update,
    /// Delete a document.
    Delete,
}

impl AccessOperation {
    /// Returns the permission level that literally grants this operation.
    #[must_use]
    pub fn level(&self) -> PermissionLevel {
        match self {
            Self::Read => PermissionLevel::Read,
            Self::Create => PermissionLevel::Create,
            Self::Update => PermissionLevel::Update,
            Self::Delete => PermissionLevel::Delete,
        }
    }

    /// Returns a stable transport value for this operation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.level().as_str()
    }

    /// Returns all operations.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AccessOperation] = &[
            AccessOperation::Read,
            AccessOperation::Create,
            AccessOperation::Update,
            AccessOperation::Delete,
        ];

        ALL
    }
}

impl FromStr for AccessOperation {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown access operation '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for AccessOperation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AccessOperation, PermissionLevel};

    #[test]
    fn every_level_parses_from_its_storage_value() {
        for level in PermissionLevel::all() {
            let parsed = PermissionLevel::from_str(level.as_str());
            assert!(matches!(parsed, Ok(value) if value == *level));
        }
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(PermissionLevel::from_str("publish").is_err());
    }

    #[test]
    fn translate_is_not_an_operation() {
        assert!(AccessOperation::from_str("translate").is_err());
        assert!(
            AccessOperation::all()
                .iter()
                .all(|operation| operation.level() != PermissionLevel::Translate)
        );
    }
}
