use tracing::debug;

use super::*;

impl AccessService {
    /// Decides whether list and read queries on `collection` pass the locale
    /// filter.
    ///
    /// This never narrows to rows: locale scoping happens through field
    /// localization, so an allowed result means "no filter". Permissions are
    /// read from the principal or the request cache and never computed here;
    /// when neither has them, managers pass and clients do not.
    #[must_use]
    pub fn create_locale_filter(
        &self,
        user: Option<&Principal>,
        collection: &str,
        locale: Option<&LocaleCode>,
        cache: &PermissionCache,
    ) -> bool {
        let Some(principal) = user else {
            return false;
        };
        if !principal.is_active() {
            return false;
        }
        if principal.is_admin() {
            return true;
        }

        let resolved = self.known_permissions(principal, locale, cache);
        let Some(permissions) = resolved.as_merged() else {
            debug!(
                principal = principal.id(),
                collection, "locale filter without resolved permissions"
            );
            return !principal.is_client();
        };

        if permissions.levels(collection).is_none() {
            return !permissions.is_empty() && !principal.is_client();
        }

        true
    }
}
