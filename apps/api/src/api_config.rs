use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use lotus_application::AccessSettings;
use lotus_core::{AppError, LocaleCode};
use tracing_subscriber::EnvFilter;

const MIN_API_TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub access_api_token: String,
    pub default_locale: LocaleCode,
    pub additional_restricted_collections: Vec<String>,
    pub role_registry_path: Option<PathBuf>,
    pub frontend_url: String,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let access_api_token = lookup("ACCESS_API_TOKEN")
            .ok_or_else(|| AppError::Validation("ACCESS_API_TOKEN is required".to_owned()))?;
        if access_api_token.trim().len() < MIN_API_TOKEN_LENGTH {
            return Err(AppError::Validation(format!(
                "ACCESS_API_TOKEN must be at least {MIN_API_TOKEN_LENGTH} characters"
            )));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 3002,
        };

        let default_locale = match lookup("ACCESS_DEFAULT_LOCALE") {
            Some(value) => LocaleCode::new(value)?,
            None => LocaleCode::default(),
        };

        let additional_restricted_collections = lookup("ACCESS_RESTRICTED_COLLECTIONS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|collection| !collection.is_empty())
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let role_registry_path = lookup("ROLE_REGISTRY_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        Ok(Self {
            api_host,
            api_port,
            access_api_token,
            default_locale,
            additional_restricted_collections,
            role_registry_path,
            frontend_url,
        })
    }

    pub fn access_settings(&self) -> Result<AccessSettings, AppError> {
        AccessSettings::new(
            self.default_locale.clone(),
            self.additional_restricted_collections.iter().cloned(),
        )
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lotus_application::{AccessSettings, RESTRICTED_COLLECTIONS};
    use lotus_core::AppError;

    use super::ApiConfig;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    fn load(values: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = load(&[("ACCESS_API_TOKEN", TOKEN)]);
        assert!(config.is_ok());

        let config = config.unwrap_or_else(|_| unreachable!());
        assert_eq!(config.api_port, 3002);
        assert_eq!(config.default_locale.as_str(), "en");
        assert!(config.additional_restricted_collections.is_empty());
        assert_eq!(
            config.access_settings().unwrap_or_default(),
            AccessSettings::default()
        );
        assert!(config.role_registry_path.is_none());
        assert_eq!(
            config.socket_address().map(|address| address.to_string()).ok(),
            Some("127.0.0.1:3002".to_owned())
        );
    }

    #[test]
    fn token_is_required_and_must_be_long() {
        assert!(matches!(load(&[]), Err(AppError::Validation(_))));
        assert!(matches!(
            load(&[("ACCESS_API_TOKEN", "short")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("ACCESS_API_TOKEN", TOKEN),
            ("API_PORT", "8080"),
            ("ACCESS_DEFAULT_LOCALE", "CS"),
            ("ACCESS_RESTRICTED_COLLECTIONS", "managers, clients,,audit-log"),
            ("ROLE_REGISTRY_PATH", "/etc/lotus/roles.json"),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_port, 8080);
        assert_eq!(config.default_locale.as_str(), "cs");
        assert_eq!(
            config.additional_restricted_collections,
            ["managers", "clients", "audit-log"]
        );
        assert!(config.role_registry_path.is_some());

        let settings = config.access_settings().unwrap_or_default();
        assert!(settings.is_restricted("audit-log"));
        assert!(settings.is_restricted("payload-jobs"));
    }

    #[test]
    fn restricted_collections_cannot_be_cleared() {
        for value in ["", " , ", "pages"] {
            let settings = load(&[
                ("ACCESS_API_TOKEN", TOKEN),
                ("ACCESS_RESTRICTED_COLLECTIONS", value),
            ])
            .and_then(|config| config.access_settings())
            .unwrap_or_default();

            for collection in RESTRICTED_COLLECTIONS {
                assert!(settings.is_restricted(collection));
            }
        }
    }

    #[test]
    fn invalid_values_fail() {
        assert!(matches!(
            load(&[("ACCESS_API_TOKEN", TOKEN), ("API_PORT", "http")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[("ACCESS_API_TOKEN", TOKEN), ("ACCESS_DEFAULT_LOCALE", "en us")]),
            Err(AppError::Validation(_))
        ));

        let config = load(&[("ACCESS_API_TOKEN", TOKEN), ("API_HOST", "localhost")])
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(
            config.socket_address(),
            Err(AppError::Validation(_))
        ));
    }
}
