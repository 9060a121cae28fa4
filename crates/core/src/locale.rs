use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Locale used when a request carries no locale context.
pub const DEFAULT_LOCALE: &str = "en";

/// A normalized locale code such as `en`, `cs` or `pt-br`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Creates a locale code, trimming and lowercasing the input.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_ascii_lowercase();
        if value.is_empty() {
            return Err(AppError::Validation(
                "locale code must not be empty".to_owned(),
            ));
        }

        let valid = value
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'));
        if !valid {
            return Err(AppError::Validation(format!(
                "locale code '{value}' contains unsupported characters"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the fallback locale code.
    #[must_use]
    pub fn default_locale() -> Self {
        Self(DEFAULT_LOCALE.to_owned())
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for LocaleCode {
    fn default() -> Self {
        Self::default_locale()
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LocaleCode {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LocaleCode> for String {
    fn from(value: LocaleCode) -> Self {
        value.0
    }
}

impl std::fmt::Display for LocaleCode {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}
