//! Authenticated actors the access engine decides for.

use std::collections::BTreeMap;

use lotus_core::LocaleCode;
use serde::{Deserialize, Serialize};

use crate::{PermissionSnapshot, RoleCollection};

/// Ad-hoc update grant on one document, independent of roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAccess {
    /// Collection the document lives in.
    pub relation_to: String,
    /// Document identifier, compared as a string.
    pub value: String,
}

impl ResourceAccess {
    /// Creates a document-level grant.
    #[must_use]
    pub fn new(relation_to: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            relation_to: relation_to.into(),
            value: value.into(),
        }
    }

    /// Returns whether this grant targets `doc_id` in `collection`.
    #[must_use]
    pub fn matches(&self, collection: &str, doc_id: &str) -> bool {
        self.relation_to == collection && self.value == doc_id
    }
}

/// Field context passed by field-level access checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldContext {
    /// Whether the field stores a value per locale.
    pub localized: bool,
}

/// Human admin user. Roles are assigned per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manager {
    /// Document id.
    pub id: String,
    /// Inactive managers are denied everything.
    pub active: bool,
    /// Global bypass.
    pub admin: bool,
    /// Role slugs keyed by locale.
    pub roles: BTreeMap<LocaleCode, Vec<String>>,
    /// Document-level update grants.
    pub custom_resource_access: Vec<ResourceAccess>,
    /// Cached virtual `permissions` attribute.
    pub permissions: Option<PermissionSnapshot>,
}

/// API consumer. Roles are global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Client {
    /// Document id.
    pub id: String,
    /// Inactive clients are denied everything.
    pub active: bool,
    /// Role slugs.
    pub roles: Vec<String>,
    /// Cached virtual `permissions` attribute.
    pub permissions: Option<PermissionSnapshot>,
}

/// A manager or a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Admin interface user.
    Manager(Manager),
    /// API consumer.
    Client(Client),
}

/// Borrowed view of how a principal's roles are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAssignment<'a> {
    /// Manager roles keyed by locale.
    PerLocale(&'a BTreeMap<LocaleCode, Vec<String>>),
    /// Client roles.
    Flat(&'a [String]),
}

impl<'a> RoleAssignment<'a> {
    /// Returns the role slugs that apply under `locale`.
    ///
    /// Flat assignments ignore the locale.
    #[must_use]
    pub fn role_slugs(&self, locale: &LocaleCode) -> &'a [String] {
        match *self {
            Self::PerLocale(by_locale) => by_locale
                .get(locale)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            Self::Flat(slugs) => slugs,
        }
    }
}

impl Principal {
    /// Returns the document id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Manager(manager) => manager.id.as_str(),
            Self::Client(client) => client.id.as_str(),
        }
    }

    /// Returns the role collection this principal's roles come from.
    #[must_use]
    pub fn role_collection(&self) -> RoleCollection {
        match self {
            Self::Manager(_) => RoleCollection::Managers,
            Self::Client(_) => RoleCollection::Clients,
        }
    }

    /// Returns whether the principal is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Manager(manager) => manager.active,
            Self::Client(client) => client.active,
        }
    }

    /// Returns whether the principal is an admin manager.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Manager(manager) if manager.admin)
    }

    /// Returns whether the principal is an API client.
    #[must_use]
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    /// Returns how the principal's roles are stored.
    #[must_use]
    pub fn role_assignment(&self) -> RoleAssignment<'_> {
        match self {
            Self::Manager(manager) => RoleAssignment::PerLocale(&manager.roles),
            Self::Client(client) => RoleAssignment::Flat(&client.roles),
        }
    }

    /// Returns document-level grants. Always empty for clients.
    #[must_use]
    pub fn custom_resource_access(&self) -> &[ResourceAccess] {
        match self {
            Self::Manager(manager) => &manager.custom_resource_access,
            Self::Client(_) => &[],
        }
    }

    /// Returns the cached `permissions` attribute, if populated.
    #[must_use]
    pub fn permissions(&self) -> Option<&PermissionSnapshot> {
        match self {
            Self::Manager(manager) => manager.permissions.as_ref(),
            Self::Client(client) => client.permissions.as_ref(),
        }
    }

    /// Replaces the cached `permissions` attribute.
    pub fn set_permissions(&mut self, snapshot: PermissionSnapshot) {
        match self {
            Self::Manager(manager) => manager.permissions = Some(snapshot),
            Self::Client(client) => client.permissions = Some(snapshot),
        }
    }
}

impl From<Manager> for Principal {
    fn from(value: Manager) -> Self {
        Self::Manager(value)
    }
}

impl From<Client> for Principal {
    fn from(value: Client) -> Self {
        Self::Client(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use lotus_core::LocaleCode;

    use super::{Client, Manager, Principal, ResourceAccess};

    #[test]
    fn manager_role_slugs_follow_locale() {
        let english = LocaleCode::default();
        let czech = LocaleCode::new("cs").unwrap_or_default();
        let principal = Principal::from(Manager {
            id: "m-1".to_owned(),
            active: true,
            roles: BTreeMap::from([
                (english.clone(), vec!["meditations-editor".to_owned()]),
                (czech.clone(), vec!["translator".to_owned()]),
            ]),
            ..Manager::default()
        });

        let assignment = principal.role_assignment();
        assert_eq!(assignment.role_slugs(&english), ["meditations-editor"]);
        assert_eq!(assignment.role_slugs(&czech), ["translator"]);

        let german = LocaleCode::new("de").unwrap_or_default();
        assert!(assignment.role_slugs(&german).is_empty());
    }

    #[test]
    fn client_role_slugs_ignore_locale() {
        let principal = Principal::from(Client {
            id: "c-1".to_owned(),
            active: true,
            roles: vec!["we-meditate-web".to_owned()],
            permissions: None,
        });

        let czech = LocaleCode::new("cs").unwrap_or_default();
        assert_eq!(
            principal.role_assignment().role_slugs(&czech),
            ["we-meditate-web"]
        );
        assert!(principal.custom_resource_access().is_empty());
        assert!(!principal.is_admin());
    }

    #[test]
    fn resource_access_matches_collection_and_id() {
        let grant = ResourceAccess::new("pages", "42");
        assert!(grant.matches("pages", "42"));
        assert!(!grant.matches("pages", "43"));
        assert!(!grant.matches("lessons", "42"));
    }
}
