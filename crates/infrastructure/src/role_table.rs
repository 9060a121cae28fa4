use std::collections::BTreeMap;
use std::str::FromStr;

use lotus_core::{AppError, AppResult};
use lotus_domain::{PermissionLevel, RoleCollection, RoleDefinition};
use serde::{Deserialize, Serialize};

/// Role tables as stored in a JSON role-table file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleTableDocument {
    /// Manager roles.
    #[serde(default)]
    pub managers: Vec<RoleTableEntry>,
    /// Client roles.
    #[serde(default)]
    pub clients: Vec<RoleTableEntry>,
}

/// One role in a role-table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleTableEntry {
    /// Unique role slug.
    pub slug: String,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Product affiliation for manager roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Granted levels keyed by collection slug.
    #[serde(default)]
    pub permissions: BTreeMap<String, Vec<String>>,
}

impl RoleTableDocument {
    /// Parses a role-table document from JSON.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|error| AppError::Validation(format!("invalid role table: {error}")))
    }
}

impl RoleTableEntry {
    /// Converts the entry into a role for `role_collection`.
    ///
    /// Unknown permission levels are rejected.
    pub fn into_definition(self, role_collection: RoleCollection) -> AppResult<RoleDefinition> {
        let slug = self.slug;
        let mut permissions = Vec::with_capacity(self.permissions.len());
        for (collection, levels) in self.permissions {
            let levels = levels
                .iter()
                .map(|level| PermissionLevel::from_str(level))
                .collect::<AppResult<Vec<_>>>()
                .map_err(|error| {
                    AppError::Validation(format!(
                        "role '{slug}' on collection '{collection}': {error}"
                    ))
                })?;
            permissions.push((collection, levels));
        }

        let mut role = RoleDefinition::new(slug, role_collection, permissions)?;
        if let Some(label) = self.label {
            role = role.with_label(label);
        }
        if let Some(project) = self.project {
            role = role.with_project(project)?;
        }

        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use lotus_core::AppError;
    use lotus_domain::{PermissionLevel, RoleCollection};

    use super::RoleTableDocument;

    #[test]
    fn parses_tables_and_converts_entries() {
        let document = RoleTableDocument::from_json_str(
            r#"{
                "managers": [
                    {
                        "slug": "pages-editor",
                        "label": "Pages Editor",
                        "project": "wemeditate",
                        "permissions": { "pages": ["read", "update", "read"] }
                    }
                ]
            }"#,
        )
        .unwrap_or_default();

        assert!(document.clients.is_empty());
        assert_eq!(document.managers.len(), 1);

        let role = document
            .managers
            .into_iter()
            .next()
            .map(|entry| entry.into_definition(RoleCollection::Managers));
        let Some(Ok(role)) = role else {
            panic!("expected a converted role");
        };
        assert_eq!(role.label(), Some("Pages Editor"));
        assert_eq!(role.project(), Some("wemeditate"));
        assert_eq!(
            role.permissions().get("pages").map(Vec::as_slice),
            Some([PermissionLevel::Read, PermissionLevel::Update].as_slice())
        );
    }

    #[test]
    fn unknown_level_is_a_validation_error() {
        let document = RoleTableDocument::from_json_str(
            r#"{ "clients": [{ "slug": "app", "permissions": { "pages": ["browse"] } }] }"#,
        )
        .unwrap_or_default();

        let result = document
            .clients
            .into_iter()
            .map(|entry| entry.into_definition(RoleCollection::Clients))
            .next();
        assert!(matches!(result, Some(Err(AppError::Validation(_)))));
    }

    #[test]
    fn client_role_with_project_is_rejected() {
        let document = RoleTableDocument::from_json_str(
            r#"{ "clients": [{ "slug": "app", "project": "wemeditate" }] }"#,
        )
        .unwrap_or_default();

        let result = document
            .clients
            .into_iter()
            .map(|entry| entry.into_definition(RoleCollection::Clients))
            .next();
        assert!(matches!(result, Some(Err(AppError::Validation(_)))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = RoleTableDocument::from_json_str(r#"{ "managers": {} }"#);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
