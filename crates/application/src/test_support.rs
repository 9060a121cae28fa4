//! In-test role registry and principal builders.

use std::collections::BTreeMap;

use lotus_core::LocaleCode;
use lotus_domain::{
    Client, Manager, PermissionLevel, Principal, ResourceAccess, RoleCollection, RoleDefinition,
};

use crate::RoleRegistry;

pub(crate) struct FakeRoleRegistry {
    roles: Vec<RoleDefinition>,
}

impl FakeRoleRegistry {
    pub(crate) fn new(roles: Vec<RoleDefinition>) -> Self {
        Self { roles }
    }
}

impl RoleRegistry for FakeRoleRegistry {
    fn lookup_role(&self, slug: &str, role_collection: RoleCollection) -> Option<&RoleDefinition> {
        self.roles
            .iter()
            .find(|role| role.slug() == slug && role.role_collection() == role_collection)
    }

    fn list_roles(&self, role_collection: RoleCollection) -> Vec<&RoleDefinition> {
        let mut roles: Vec<&RoleDefinition> = self
            .roles
            .iter()
            .filter(|role| role.role_collection() == role_collection)
            .collect();
        roles.sort_by(|left, right| left.slug().cmp(right.slug()));
        roles
    }
}

/// Builds a role, panicking on invalid fixtures.
pub(crate) fn role(
    slug: &str,
    role_collection: RoleCollection,
    grants: &[(&str, &[PermissionLevel])],
) -> RoleDefinition {
    let permissions = grants
        .iter()
        .map(|(collection, levels)| ((*collection).to_owned(), levels.to_vec()));

    match RoleDefinition::new(slug, role_collection, permissions) {
        Ok(role) => role,
        Err(error) => panic!("invalid role fixture '{slug}': {error}"),
    }
}

pub(crate) fn locale(code: &str) -> LocaleCode {
    match LocaleCode::new(code) {
        Ok(locale) => locale,
        Err(error) => panic!("invalid locale fixture '{code}': {error}"),
    }
}

pub(crate) fn manager(id: &str, roles: &[(&str, &[&str])]) -> Manager {
    Manager {
        id: id.to_owned(),
        active: true,
        admin: false,
        roles: roles
            .iter()
            .map(|(code, slugs)| {
                (
                    locale(code),
                    slugs.iter().map(|slug| (*slug).to_owned()).collect(),
                )
            })
            .collect::<BTreeMap<_, _>>(),
        custom_resource_access: Vec::new(),
        permissions: None,
    }
}

pub(crate) fn manager_with_access(
    id: &str,
    roles: &[(&str, &[&str])],
    access: &[(&str, &str)],
) -> Principal {
    let mut manager = manager(id, roles);
    manager.custom_resource_access = access
        .iter()
        .map(|(collection, value)| ResourceAccess::new(*collection, *value))
        .collect();
    Principal::Manager(manager)
}

pub(crate) fn client(id: &str, roles: &[&str]) -> Client {
    Client {
        id: id.to_owned(),
        active: true,
        roles: roles.iter().map(|slug| (*slug).to_owned()).collect(),
        permissions: None,
    }
}
