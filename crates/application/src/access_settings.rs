use std::collections::BTreeSet;

use lotus_core::{AppError, AppResult, LocaleCode};

/// Collections no role can grant access to. Only admins reach them.
pub const RESTRICTED_COLLECTIONS: &[&str] = &["managers", "clients", "payload-jobs"];

/// Engine-wide constants that deployments may extend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessSettings {
    default_locale: LocaleCode,
    restricted_collections: BTreeSet<String>,
}

impl AccessSettings {
    /// Creates settings from a default locale and collections to restrict
    /// on top of [`RESTRICTED_COLLECTIONS`], which always stay restricted.
    pub fn new(
        default_locale: LocaleCode,
        additional_restricted: impl IntoIterator<Item = String>,
    ) -> AppResult<Self> {
        let mut restricted = base_restricted();
        for collection in additional_restricted {
            let collection = collection.trim().to_owned();
            if collection.is_empty() {
                return Err(AppError::Validation(
                    "restricted collection names must not be empty".to_owned(),
                ));
            }
            restricted.insert(collection);
        }

        Ok(Self {
            default_locale,
            restricted_collections: restricted,
        })
    }

    /// Returns the locale used when a request has no locale context.
    #[must_use]
    pub fn default_locale(&self) -> &LocaleCode {
        &self.default_locale
    }

    /// Returns whether `collection` is closed to every non-admin principal.
    #[must_use]
    pub fn is_restricted(&self, collection: &str) -> bool {
        self.restricted_collections.contains(collection)
    }

    /// Returns the restricted collection names.
    #[must_use]
    pub fn restricted_collections(&self) -> &BTreeSet<String> {
        &self.restricted_collections
    }
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            default_locale: LocaleCode::default_locale(),
            restricted_collections: base_restricted(),
        }
    }
}

fn base_restricted() -> BTreeSet<String> {
    RESTRICTED_COLLECTIONS
        .iter()
        .map(|collection| (*collection).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use lotus_core::LocaleCode;

    use super::AccessSettings;

    #[test]
    fn defaults_restrict_principal_and_job_collections() {
        let settings = AccessSettings::default();
        assert!(settings.is_restricted("managers"));
        assert!(settings.is_restricted("clients"));
        assert!(settings.is_restricted("payload-jobs"));
        assert!(!settings.is_restricted("pages"));
        assert_eq!(settings.default_locale().as_str(), "en");
    }

    #[test]
    fn blank_restricted_collection_is_rejected() {
        let settings = AccessSettings::new(LocaleCode::default(), ["  ".to_owned()]);
        assert!(settings.is_err());
    }

    #[test]
    fn additional_collections_extend_the_base_set() {
        let settings = AccessSettings::new(LocaleCode::default(), ["audit-log".to_owned()])
            .unwrap_or_default();
        assert!(settings.is_restricted("audit-log"));
        assert!(settings.is_restricted("managers"));
        assert!(settings.is_restricted("clients"));
        assert!(settings.is_restricted("payload-jobs"));

        let settings = AccessSettings::new(LocaleCode::default(), Vec::new()).unwrap_or_default();
        assert_eq!(settings, AccessSettings::default());
    }
}
