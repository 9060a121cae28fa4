use std::collections::BTreeMap;
use std::str::FromStr;

use lotus_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::PermissionLevel;

/// Principal type a role applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCollection {
    /// Human users of the admin interface. Roles are assigned per locale.
    Managers,
    /// API consumers. Roles are global.
    Clients,
}

impl RoleCollection {
    /// Returns the collection slug principals of this type are stored in.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Managers => "managers",
            Self::Clients => "clients",
        }
    }

    /// Returns whether roles for this principal type are assigned per locale.
    #[must_use]
    pub fn is_localized(&self) -> bool {
        matches!(self, Self::Managers)
    }
}

impl FromStr for RoleCollection {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "managers" => Ok(Self::Managers),
            "clients" => Ok(Self::Clients),
            _ => Err(AppError::Validation(format!(
                "unknown role collection '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for RoleCollection {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Statically defined bundle of per-collection grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    slug: NonEmptyString,
    label: Option<String>,
    role_collection: RoleCollection,
    project: Option<String>,
    permissions: BTreeMap<String, Vec<PermissionLevel>>,
}

impl RoleDefinition {
    /// Creates a validated role definition.
    ///
    /// Duplicate levels inside one collection entry are collapsed.
    pub fn new(
        slug: impl Into<String>,
        role_collection: RoleCollection,
        permissions: impl IntoIterator<Item = (String, Vec<PermissionLevel>)>,
    ) -> AppResult<Self> {
        let slug = NonEmptyString::new(slug)?;

        let mut grants: BTreeMap<String, Vec<PermissionLevel>> = BTreeMap::new();
        for (collection, levels) in permissions {
            if collection.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "role '{slug}' grants permissions on an empty collection name"
                )));
            }

            let entry = grants.entry(collection).or_default();
            for level in levels {
                if !entry.contains(&level) {
                    entry.push(level);
                }
            }
        }

        Ok(Self {
            slug,
            label: None,
            role_collection,
            project: None,
            permissions: grants,
        })
    }

    /// Attaches a human-readable label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = (!label.trim().is_empty()).then_some(label);
        self
    }

    /// Tags a manager role with a product affiliation used for grouping.
    pub fn with_project(mut self, project: impl Into<String>) -> AppResult<Self> {
        if self.role_collection != RoleCollection::Managers {
            return Err(AppError::Validation(format!(
                "role '{}' is a client role; only manager roles carry a project",
                self.slug
            )));
        }

        self.project = Some(NonEmptyString::new(project)?.into());
        Ok(self)
    }

    /// Returns the unique role slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Returns the optional label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the principal type this role applies to.
    #[must_use]
    pub fn role_collection(&self) -> RoleCollection {
        self.role_collection
    }

    /// Returns whether the role is assigned per locale.
    #[must_use]
    pub fn localized(&self) -> bool {
        self.role_collection.is_localized()
    }

    /// Returns the product affiliation, if any.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Returns the grants keyed by resource collection.
    #[must_use]
    pub fn permissions(&self) -> &BTreeMap<String, Vec<PermissionLevel>> {
        &self.permissions
    }
}
