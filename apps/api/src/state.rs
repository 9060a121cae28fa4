use std::sync::Arc;

use lotus_application::AccessService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub api_token: Arc<str>,
}

#[cfg(test)]
impl AppState {
    /// State backed by the built-in role tables and default settings.
    pub fn for_tests(api_token: &str) -> Self {
        use lotus_application::AccessSettings;
        use lotus_infrastructure::InMemoryRoleRegistry;

        let registry = InMemoryRoleRegistry::builtin().unwrap_or_default();
        Self {
            access_service: AccessService::new(Arc::new(registry), AccessSettings::default()),
            api_token: Arc::from(api_token),
        }
    }
}
