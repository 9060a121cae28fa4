use lotus_domain::PermissionLevel;
use tracing::debug;

use super::*;

impl AccessService {
    /// Returns whether the check is allowed.
    #[must_use]
    pub fn has_permission(&self, check: &PermissionCheck<'_>, cache: &PermissionCache) -> bool {
        self.explain_permission(check, cache).allowed
    }

    /// Evaluates a check and reports which rule decided it.
    ///
    /// Rules apply in order and the first one that decides wins: identity,
    /// admin bypass, restricted collections, document override, malformed
    /// permissions, implicit read, missing grant, translate, literal grant.
    #[must_use]
    pub fn explain_permission(
        &self,
        check: &PermissionCheck<'_>,
        cache: &PermissionCache,
    ) -> AccessDecision {
        let decision = self.decide(check, cache);
        debug!(
            principal = check.user.map(Principal::id).unwrap_or_default(),
            collection = check.collection,
            operation = %check.operation,
            allowed = decision.allowed,
            reason = decision.reason.as_str(),
            "access decision"
        );
        decision
    }

    fn decide(&self, check: &PermissionCheck<'_>, cache: &PermissionCache) -> AccessDecision {
        let Some(principal) = check.user else {
            return AccessDecision::deny(DecisionReason::MissingPrincipal);
        };
        if !principal.is_active() {
            return AccessDecision::deny(DecisionReason::InactivePrincipal);
        }
        if principal.is_admin() {
            return AccessDecision::allow(DecisionReason::AdminBypass);
        }
        if self.settings.is_restricted(check.collection) {
            return AccessDecision::deny(DecisionReason::RestrictedCollection);
        }

        let resolved = self.current_permissions(principal, check.locale, cache);

        if check.operation == AccessOperation::Update
            && let Some(doc_id) = check.doc_id
            && principal
                .custom_resource_access()
                .iter()
                .any(|grant| grant.matches(check.collection, doc_id))
        {
            return AccessDecision::allow(DecisionReason::DocumentOverride);
        }

        let Some(permissions) = resolved.as_merged() else {
            return AccessDecision::deny(DecisionReason::MalformedPermissions);
        };

        let Some(levels) = permissions.levels(check.collection) else {
            let implicit_read = check.implicit_read
                && check.operation == AccessOperation::Read
                && !principal.is_client()
                && !permissions.is_empty();
            return if implicit_read {
                AccessDecision::allow(DecisionReason::ImplicitRead)
            } else {
                AccessDecision::deny(DecisionReason::NoGrant)
            };
        };

        if levels.contains(&PermissionLevel::Translate) {
            return translate_decision(check.operation, check.field);
        }

        if principal.is_client() && check.operation == AccessOperation::Delete {
            return AccessDecision::deny(DecisionReason::ClientDeleteBlocked);
        }

        if levels.contains(&check.operation.level()) {
            AccessDecision::allow(DecisionReason::Granted)
        } else {
            AccessDecision::deny(DecisionReason::NotGranted)
        }
    }
}

/// Translate allows reading everything and updating localized fields only.
/// Collection-level checks carry no field, so update is allowed there and
/// narrowed by the field checks.
fn translate_decision(operation: AccessOperation, field: Option<FieldContext>) -> AccessDecision {
    let allowed = match (operation, field) {
        (AccessOperation::Read, _) => true,
        (AccessOperation::Update, None) => true,
        (AccessOperation::Update, Some(field)) => field.localized,
        (AccessOperation::Create | AccessOperation::Delete, _) => false,
    };

    if allowed {
        AccessDecision::allow(DecisionReason::TranslateAllowed)
    } else {
        AccessDecision::deny(DecisionReason::TranslateDenied)
    }
}
