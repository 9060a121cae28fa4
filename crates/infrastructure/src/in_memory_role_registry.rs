use std::collections::BTreeMap;
use std::path::Path;

use lotus_application::RoleRegistry;
use lotus_core::{AppError, AppResult};
use lotus_domain::{RoleCollection, RoleDefinition};
use tracing::info;

use crate::builtin_roles;
use crate::role_table::RoleTableDocument;


/// Immutable role tables held in memory.
#[derive(Debug, Default)]
pub struct InMemoryRoleRegistry {
    managers: BTreeMap<String, RoleDefinition>,
    clients: BTreeMap<String, RoleDefinition>,
}

impl InMemoryRoleRegistry {
    /// Builds a registry from manager and client role tables.
    ///
    /// Every role must belong to the table it is listed in and slugs must be
    /// unique within a table.
    pub fn new(
        managers: impl IntoIterator<Item = RoleDefinition>,
        clients: impl IntoIterator<Item = RoleDefinition>,
    ) -> AppResult<Self> {
        Ok(Self {
            managers: index_table(managers, RoleCollection::Managers)?,
            clients: index_table(clients, RoleCollection::Clients)?,
        })
    }

    /// Builds the registry shipped with the platform.
    pub fn builtin() -> AppResult<Self> {
        Self::new(builtin_roles::manager_roles()?, builtin_roles::client_roles()?)
    }

    /// Builds a registry from a JSON role-table document.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let document = RoleTableDocument::from_json_str(raw)?;
        let managers = document
            .managers
            .into_iter()
            .map(|entry| entry.into_definition(RoleCollection::Managers))
            .collect::<AppResult<Vec<_>>>()?;
        let clients = document
            .clients
            .into_iter()
            .map(|entry| entry.into_definition(RoleCollection::Clients))
            .collect::<AppResult<Vec<_>>>()?;

        Self::new(managers, clients)
    }

    /// Reads and builds a registry from a JSON role-table file.
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|error| {
            AppError::Internal(format!(
                "failed to read role table '{}': {error}",
                path.display()
            ))
        })?;
        let registry = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            managers = registry.managers.len(),
            clients = registry.clients.len(),
            "loaded role table"
        );

        Ok(registry)
    }

    /// Groups manager roles by project. Roles without a project are left out.
    #[must_use]
    pub fn roles_by_project(&self) -> BTreeMap<&str, Vec<&RoleDefinition>> {
        let mut grouped: BTreeMap<&str, Vec<&RoleDefinition>> = BTreeMap::new();
        for role in self.managers.values() {
            if let Some(project) = role.project() {
                grouped.entry(project).or_default().push(role);
            }
        }
        grouped
    }

    fn table(&self, role_collection: RoleCollection) -> &BTreeMap<String, RoleDefinition> {
        match role_collection {
            RoleCollection::Managers => &self.managers,
            RoleCollection::Clients => &self.clients,
        }
    }
}

impl RoleRegistry for InMemoryRoleRegistry {
    fn lookup_role(&self, slug: &str, role_collection: RoleCollection) -> Option<&RoleDefinition> {
        self.table(role_collection).get(slug)
    }

    fn list_roles(&self, role_collection: RoleCollection) -> Vec<&RoleDefinition> {
        self.table(role_collection).values().collect()
    }
}

fn index_table(
    roles: impl IntoIterator<Item = RoleDefinition>,
    role_collection: RoleCollection,
) -> AppResult<BTreeMap<String, RoleDefinition>> {
    let mut table = BTreeMap::new();
    for role in roles {
        if role.role_collection() != role_collection {
            return Err(AppError::Validation(format!(
                "role '{}' belongs to '{}' but is listed under '{}'",
                role.slug(),
                role.role_collection(),
                role_collection
            )));
        }

        let slug = role.slug().to_owned();
        if table.contains_key(&slug) {
            return Err(AppError::Conflict(format!(
                "role '{slug}' already exists in '{role_collection}'"
            )));
        }
        table.insert(slug, role);
    }

    Ok(table)
}
