//! Manager and client records as the document store returns them.

use std::collections::BTreeMap;
use std::str::FromStr;

use lotus_core::{AppError, AppResult, LocaleCode};
use lotus_domain::{
    Client, Manager, MergedPermissions, PermissionLevel, PermissionSnapshot, Principal,
    ResourceAccess, RoleCollection,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;


/// Document identifier. Stores hand out strings or numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    /// String id.
    Text(String),
    /// Numeric id.
    Number(serde_json::Number),
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => formatter.write_str(value),
            Self::Number(value) => write!(formatter, "{value}"),
        }
    }
}

/// Related document, either as a bare id or populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentReference {
    /// Unpopulated relationship.
    Id(DocumentId),
    /// Populated relationship carrying at least the id.
    Populated {
        /// Related document id.
        id: DocumentId,
    },
}

impl DocumentReference {
    fn id(&self) -> &DocumentId {
        match self {
            Self::Id(id) | Self::Populated { id } => id,
        }
    }
}

/// One `customResourceAccess` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAccessDocument {
    /// Collection of the related document.
    pub relation_to: String,
    /// Related document.
    pub value: DocumentReference,
}

/// Stored manager or client record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalDocument {
    /// Document id.
    pub id: DocumentId,
    /// Collection the record lives in.
    pub collection: RoleCollection,
    /// Missing or null decodes as inactive.
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    /// Admin bypass flag, managers only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin: bool,
    /// Locale-keyed slugs for managers, a slug list for clients.
    #[serde(default)]
    pub roles: Value,
    /// Document-level update grants, managers only.
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_resource_access: Vec<ResourceAccessDocument>,
    /// Cached permissions. `Some(Value::Null)` is an explicit null.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub permissions: Option<Value>,
    /// Locale the cached manager permissions were merged under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions_locale: Option<LocaleCode>,
}

impl PrincipalDocument {
    /// Decodes a record from a JSON value.
    pub fn from_value(value: Value) -> AppResult<Self> {
        serde_json::from_value(value)
            .map_err(|error| AppError::Validation(format!("invalid principal document: {error}")))
    }

    /// Converts the record into a principal read under `locale`.
    ///
    /// `locale` only places a flat manager role list. A cached manager
    /// `permissions` object keeps the `permissionsLocale` stored beside it;
    /// without one the engine recomputes it. Anything other than an object
    /// there decodes as malformed.
    pub fn into_principal(self, locale: &LocaleCode) -> AppResult<Principal> {
        let id = self.id.to_string();
        match self.collection {
            RoleCollection::Managers => {
                let custom_resource_access = self
                    .custom_resource_access
                    .iter()
                    .map(|entry| ResourceAccess::new(&entry.relation_to, entry.value.id().to_string()))
                    .collect();

                Ok(Principal::Manager(Manager {
                    roles: manager_roles(self.roles, locale)?,
                    permissions: self
                        .permissions
                        .map(|value| snapshot(value, self.permissions_locale)),
                    id,
                    active: self.active,
                    admin: self.admin,
                    custom_resource_access,
                }))
            }
            RoleCollection::Clients => {
                if self.admin || !self.custom_resource_access.is_empty() {
                    debug!(
                        principal = id.as_str(),
                        "ignoring manager-only attributes on client record"
                    );
                }

                Ok(Principal::Client(Client {
                    roles: role_slugs(self.roles)?,
                    permissions: self.permissions.map(|value| snapshot(value, None)),
                    id,
                    active: self.active,
                }))
            }
        }
    }

    /// Encodes a principal back into its stored shape.
    #[must_use]
    pub fn from_principal(principal: &Principal) -> Self {
        let permissions = principal.permissions().map(|snapshot| match snapshot {
            PermissionSnapshot::Resolved { permissions, .. } => encode_permissions(permissions),
            PermissionSnapshot::Malformed => Value::Null,
        });
        let permissions_locale = match principal.permissions() {
            Some(PermissionSnapshot::Resolved {
                locale: Some(locale),
                ..
            }) if !principal.is_client() => Some(locale.clone()),
            _ => None,
        };

        match principal {
            Principal::Manager(manager) => Self {
                id: DocumentId::Text(manager.id.clone()),
                collection: RoleCollection::Managers,
                active: manager.active,
                admin: manager.admin,
                roles: Value::Object(
                    manager
                        .roles
                        .iter()
                        .map(|(locale, slugs)| (locale.to_string(), slug_array(slugs)))
                        .collect(),
                ),
                custom_resource_access: manager
                    .custom_resource_access
                    .iter()
                    .map(|grant| ResourceAccessDocument {
                        relation_to: grant.relation_to.clone(),
                        value: DocumentReference::Id(DocumentId::Text(grant.value.clone())),
                    })
                    .collect(),
                permissions,
                permissions_locale,
            },
            Principal::Client(client) => Self {
                id: DocumentId::Text(client.id.clone()),
                collection: RoleCollection::Clients,
                active: client.active,
                admin: false,
                roles: slug_array(&client.roles),
                custom_resource_access: Vec::new(),
                permissions,
                permissions_locale: None,
            },
        }
    }
}

fn manager_roles(
    roles: Value,
    locale: &LocaleCode,
) -> AppResult<BTreeMap<LocaleCode, Vec<String>>> {
    match roles {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(by_locale) => by_locale
            .into_iter()
            .map(|(code, slugs)| -> AppResult<(LocaleCode, Vec<String>)> {
                Ok((LocaleCode::new(code)?, role_slugs(slugs)?))
            })
            .collect(),
        // Records read in a single locale carry only that locale's slugs.
        slugs @ Value::Array(_) => Ok(BTreeMap::from([(locale.clone(), role_slugs(slugs)?)])),
        other => Err(AppError::Validation(format!(
            "manager roles must be an object keyed by locale, got {other}"
        ))),
    }
}

fn role_slugs(value: Value) -> AppResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(slug) => Ok(slug),
                other => Err(AppError::Validation(format!(
                    "role slug must be a string, got {other}"
                ))),
            })
            .collect(),
        other => Err(AppError::Validation(format!(
            "roles must be a list of slugs, got {other}"
        ))),
    }
}

fn snapshot(value: Value, locale: Option<LocaleCode>) -> PermissionSnapshot {
    let Value::Object(entries) = value else {
        return PermissionSnapshot::Malformed;
    };

    let mut permissions = MergedPermissions::new();
    for (collection, levels) in entries {
        let levels = match levels {
            Value::Array(levels) => levels,
            other => {
                debug!(collection, value = %other, "cached levels are not a list");
                Vec::new()
            }
        };

        let parsed = levels.iter().filter_map(|level| {
            let parsed = level
                .as_str()
                .and_then(|level| PermissionLevel::from_str(level).ok());
            if parsed.is_none() {
                debug!(collection, level = %level, "dropping unknown cached level");
            }
            parsed
        });
        permissions.grant(collection.as_str(), parsed);
    }

    PermissionSnapshot::Resolved {
        locale,
        permissions,
    }
}

fn encode_permissions(permissions: &MergedPermissions) -> Value {
    Value::Object(
        permissions
            .iter()
            .map(|(collection, levels)| {
                let levels = levels
                    .iter()
                    .map(|level| Value::String(level.as_str().to_owned()))
                    .collect();
                (collection.to_owned(), Value::Array(levels))
            })
            .collect::<Map<String, Value>>(),
    )
}

fn slug_array(slugs: &[String]) -> Value {
    Value::Array(slugs.iter().cloned().map(Value::String).collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
