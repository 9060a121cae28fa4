//! Predicate bundles installed on collection and field configurations.

use std::sync::Arc;

use lotus_core::LocaleCode;
use lotus_domain::{AccessOperation, FieldContext, Principal};

use crate::{AccessService, PermissionCache, PermissionCheck};

#[cfg(test)]
mod tests;

/// Arguments the configuration layer passes to an access predicate.
#[derive(Debug, Clone, Copy)]
pub struct AccessArgs<'a> {
    /// Principal making the request.
    pub user: Option<&'a Principal>,
    /// Target document id, when the operation targets one document.
    pub id: Option<&'a str>,
    /// Request locale.
    pub locale: Option<&'a LocaleCode>,
    /// Request-scoped permission cache.
    pub cache: &'a PermissionCache,
}

impl<'a> AccessArgs<'a> {
    /// Creates arguments for a request without document or locale context.
    #[must_use]
    pub fn new(user: Option<&'a Principal>, cache: &'a PermissionCache) -> Self {
        Self {
            user,
            id: None,
            locale: None,
            cache,
        }
    }

    /// Targets a document.
    #[must_use]
    pub fn with_id(mut self, id: Option<&'a str>) -> Self {
        self.id = id;
        self
    }

    /// Sets the request locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Option<&'a LocaleCode>) -> Self {
        self.locale = locale;
        self
    }
}

/// Shared access predicate.
pub type AccessPredicate = Arc<dyn for<'a> Fn(&AccessArgs<'a>) -> bool + Send + Sync>;

/// Predicate that denies every request.
#[must_use]
pub fn deny_all() -> AccessPredicate {
    Arc::new(|_: &AccessArgs<'_>| false)
}

/// Per-operation predicates for one collection.
#[derive(Clone)]
pub struct CollectionAccess {
    /// List and read.
    pub read: AccessPredicate,
    /// Create.
    pub create: AccessPredicate,
    /// Update.
    pub update: AccessPredicate,
    /// Delete.
    pub delete: AccessPredicate,
}

impl CollectionAccess {
    /// Evaluates the predicate for `operation`.
    #[must_use]
    pub fn evaluate(&self, operation: AccessOperation, args: &AccessArgs<'_>) -> bool {
        let predicate = match operation {
            AccessOperation::Read => &self.read,
            AccessOperation::Create => &self.create,
            AccessOperation::Update => &self.update,
            AccessOperation::Delete => &self.delete,
        };
        predicate(args)
    }
}

/// Per-operation predicates for one field.
#[derive(Clone)]
pub struct FieldAccess {
    /// Read the field.
    pub read: AccessPredicate,
    /// Set the field on create.
    pub create: AccessPredicate,
    /// Change the field on update.
    pub update: AccessPredicate,
}

/// Predicates that replace the generated ones.
#[derive(Clone, Default)]
pub struct AccessOverrides {
    /// Replaces `read`.
    pub read: Option<AccessPredicate>,
    /// Replaces `create`.
    pub create: Option<AccessPredicate>,
    /// Replaces `update`.
    pub update: Option<AccessPredicate>,
    /// Replaces `delete`.
    pub delete: Option<AccessPredicate>,
}

/// Options for [`AccessService::role_based_access`].
#[derive(Clone)]
pub struct RoleBasedAccessOptions {
    /// Let managers with any role read collections they hold no grant on.
    pub implicit_read: bool,
    /// Predicates merged over the generated ones.
    pub overrides: AccessOverrides,
}

impl RoleBasedAccessOptions {
    /// Requires an explicit read grant.
    #[must_use]
    pub fn without_implicit_read(mut self) -> Self {
        self.implicit_read = false;
        self
    }

    /// Hard-disables delete regardless of role grants.
    #[must_use]
    pub fn disable_delete(mut self) -> Self {
        self.overrides.delete = Some(deny_all());
        self
    }
}

impl Default for RoleBasedAccessOptions {
    fn default() -> Self {
        Self {
            implicit_read: true,
            overrides: AccessOverrides::default(),
        }
    }
}

impl AccessService {
    /// Builds the read/create/update/delete predicates for a collection.
    #[must_use]
    pub fn role_based_access(
        &self,
        collection: &str,
        options: RoleBasedAccessOptions,
    ) -> CollectionAccess {
        let read: AccessPredicate = {
            let service = self.clone();
            let collection = collection.to_owned();
            let implicit_read = options.implicit_read;
            Arc::new(move |args: &AccessArgs<'_>| {
                let check = PermissionCheck::new(args.user, &collection, AccessOperation::Read)
                    .with_locale(args.locale);
                if !implicit_read {
                    return service.has_permission(&check.without_implicit_read(), args.cache);
                }
                service.has_permission(&check, args.cache)
                    && service.create_locale_filter(args.user, &collection, args.locale, args.cache)
            })
        };

        let create = self.pass_through(collection, AccessOperation::Create);
        let delete = self.pass_through(collection, AccessOperation::Delete);

        let update: AccessPredicate = {
            let service = self.clone();
            let collection = collection.to_owned();
            Arc::new(move |args: &AccessArgs<'_>| {
                let check = PermissionCheck::new(args.user, &collection, AccessOperation::Update)
                    .with_locale(args.locale)
                    .with_doc_id(args.id);
                service.has_permission(&check, args.cache)
                    && service.create_locale_filter(args.user, &collection, args.locale, args.cache)
            })
        };

        let overrides = options.overrides;
        CollectionAccess {
            read: overrides.read.unwrap_or(read),
            create: overrides.create.unwrap_or(create),
            update: overrides.update.unwrap_or(update),
            delete: overrides.delete.unwrap_or(delete),
        }
    }

    /// Builds field predicates that apply the translate carve-out for
    /// localized fields.
    #[must_use]
    pub fn create_field_access(&self, collection: &str, localized: bool) -> FieldAccess {
        let field = FieldContext { localized };
        let predicate = |operation: AccessOperation| -> AccessPredicate {
            let service = self.clone();
            let collection = collection.to_owned();
            Arc::new(move |args: &AccessArgs<'_>| {
                let check = PermissionCheck::new(args.user, &collection, operation)
                    .with_field(field)
                    .with_locale(args.locale);
                service.has_permission(&check, args.cache)
            })
        };

        FieldAccess {
            read: predicate(AccessOperation::Read),
            create: predicate(AccessOperation::Create),
            update: predicate(AccessOperation::Update),
        }
    }

    fn pass_through(&self, collection: &str, operation: AccessOperation) -> AccessPredicate {
        let service = self.clone();
        let collection = collection.to_owned();
        Arc::new(move |args: &AccessArgs<'_>| {
            let check = PermissionCheck::new(args.user, &collection, operation)
                .with_locale(args.locale)
                .with_doc_id(args.id);
            service.has_permission(&check, args.cache)
        })
    }
}
