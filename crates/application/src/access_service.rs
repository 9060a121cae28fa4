//! Access decision engine.
//!
//! Every check returns a plain boolean. Missing or malformed data denies,
//! it never raises.

use std::sync::Arc;

use lotus_core::LocaleCode;
use lotus_domain::{AccessOperation, FieldContext, MergedPermissions, Principal, RoleCollection};

use crate::{AccessSettings, PermissionCache, RoleRegistry, merge_role_permissions};

mod decision;
mod locale_filter;
mod permission_field;


/// One permission question asked by the collection-configuration layer.
#[derive(Debug, Clone, Copy)]
pub struct PermissionCheck<'a> {
    /// Principal making the request. `None` for anonymous requests.
    pub user: Option<&'a Principal>,
    /// Target collection slug.
    pub collection: &'a str,
    /// Requested operation.
    pub operation: AccessOperation,
    /// Field context for field-level checks.
    pub field: Option<FieldContext>,
    /// Request locale.
    pub locale: Option<&'a LocaleCode>,
    /// Target document id for document-level checks.
    pub doc_id: Option<&'a str>,
    /// Whether managers without a grant on the collection may still read it.
    pub implicit_read: bool,
}

impl<'a> PermissionCheck<'a> {
    /// Creates a collection-level check with implicit read enabled.
    #[must_use]
    pub fn new(
        user: Option<&'a Principal>,
        collection: &'a str,
        operation: AccessOperation,
    ) -> Self {
        Self {
            user,
            collection,
            operation,
            field: None,
            locale: None,
            doc_id: None,
            implicit_read: true,
        }
    }

    /// Narrows the check to a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldContext) -> Self {
        self.field = Some(field);
        self
    }

    /// Sets the request locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Option<&'a LocaleCode>) -> Self {
        self.locale = locale;
        self
    }

    /// Targets a specific document.
    #[must_use]
    pub fn with_doc_id(mut self, doc_id: Option<&'a str>) -> Self {
        self.doc_id = doc_id;
        self
    }

    /// Requires an explicit read grant instead of the implicit manager read.
    #[must_use]
    pub fn without_implicit_read(mut self) -> Self {
        self.implicit_read = false;
        self
    }
}

/// Rule that settled a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// No principal on the request.
    MissingPrincipal,
    /// Principal is deactivated.
    InactivePrincipal,
    /// Admin manager.
    AdminBypass,
    /// Collection is closed to non-admins.
    RestrictedCollection,
    /// Manager holds a document-level update grant.
    DocumentOverride,
    /// Cached permissions attribute is not a permission map.
    MalformedPermissions,
    /// Manager with some role reads a collection without a grant.
    ImplicitRead,
    /// No role grants anything on the collection.
    NoGrant,
    /// Translate grant allows the operation.
    TranslateAllowed,
    /// Translate grant does not cover the operation.
    TranslateDenied,
    /// Clients never delete.
    ClientDeleteBlocked,
    /// Operation is literally granted.
    Granted,
    /// Operation is not granted.
    NotGranted,
}

impl DecisionReason {
    /// Returns a stable transport value for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingPrincipal => "missing_principal",
            Self::InactivePrincipal => "inactive_principal",
            Self::AdminBypass => "admin_bypass",
            Self::RestrictedCollection => "restricted_collection",
            Self::DocumentOverride => "document_override",
            Self::MalformedPermissions => "malformed_permissions",
            Self::ImplicitRead => "implicit_read",
            Self::NoGrant => "no_grant",
            Self::TranslateAllowed => "translate_allowed",
            Self::TranslateDenied => "translate_denied",
            Self::ClientDeleteBlocked => "client_delete_blocked",
            Self::Granted => "granted",
            Self::NotGranted => "not_granted",
        }
    }
}

/// Outcome of a permission check with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    /// Whether access is allowed.
    pub allowed: bool,
    /// Rule that decided.
    pub reason: DecisionReason,
}

impl AccessDecision {
    fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Application service evaluating role-based access for managers and clients.
#[derive(Clone)]
pub struct AccessService {
    registry: Arc<dyn RoleRegistry>,
    settings: Arc<AccessSettings>,
}

impl AccessService {
    /// Creates a new access service over a role registry.
    #[must_use]
    pub fn new(registry: Arc<dyn RoleRegistry>, settings: AccessSettings) -> Self {
        Self {
            registry,
            settings: Arc::new(settings),
        }
    }

    /// Returns the engine settings.
    #[must_use]
    pub fn settings(&self) -> &AccessSettings {
        &self.settings
    }

    /// Returns the role registry.
    #[must_use]
    pub fn registry(&self) -> &dyn RoleRegistry {
        self.registry.as_ref()
    }

    /// Merges the given roles using this service's registry.
    #[must_use]
    pub fn merge_role_permissions<S: AsRef<str>>(
        &self,
        role_slugs: &[S],
        role_collection: RoleCollection,
    ) -> MergedPermissions {
        merge_role_permissions(self.registry.as_ref(), role_slugs, role_collection)
    }

    /// Returns the locale manager roles resolve under for this request.
    #[must_use]
    pub fn effective_locale<'a>(&'a self, locale: Option<&'a LocaleCode>) -> &'a LocaleCode {
        locale.unwrap_or_else(|| self.settings.default_locale())
    }
}
