use crate::modules::models::response::ClassifyResponse;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::{Validate, ValidationError};

static USER_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,32}$").unwrap());

pub fn validate_user_id(value: &str) -> Result<(), ValidationError> {
    if USER_ID_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid user id"))
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct ClassifyParameters {
    #[validate(custom = "validate_user_id")]
    pub user: String,
}

pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ClassifyResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value: T = serde_urlencoded::from_str(query).map_err(|rejection| {
            tracing::error!("Parsing error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(ClassifyResponse::error(format!(
                    "invalid format query string: [{}]",
                    rejection
                ))),
            )
        })?;

        value.validate().map_err(|rejection| {
            tracing::error!("Validation error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(ClassifyResponse::error(
                    format!("Validation error: [{}]", rejection).replace('\n', ", "),
                )),
            )
        })?;

        Ok(ValidatedQuery(value))
    }
}
