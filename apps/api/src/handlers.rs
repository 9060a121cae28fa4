use lotus_core::{AppError, LocaleCode};
use lotus_domain::Principal;
use lotus_infrastructure::PrincipalDocument;
use serde_json::Value;

use crate::error::ApiResult;

pub mod access;
pub mod health;
pub mod principals;
pub mod roles;

/// Parses an optional request locale.
fn parse_locale(locale: Option<String>) -> ApiResult<Option<LocaleCode>> {
    locale
        .map(LocaleCode::new)
        .transpose()
        .map_err(Into::into)
}

/// Decodes the principal carried by a request.
///
/// An absent or `null` user is anonymous.
fn decode_user(user: Option<Value>, locale: &LocaleCode) -> ApiResult<Option<Principal>> {
    match user {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let principal = PrincipalDocument::from_value(value)?.into_principal(locale)?;
            Ok(Some(principal))
        }
    }
}

fn require_collection(collection: &str) -> ApiResult<()> {
    if collection.trim().is_empty() {
        return Err(AppError::Validation("collection must not be empty".to_owned()).into());
    }

    Ok(())
}
