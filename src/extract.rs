use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::error::AppError;

/// Field-level checks run after a body deserializes.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<String>>;
}

/// `Json<T>` that rejects with a 400 `AppError::Validation` instead of axum's default
/// rejections, then runs `T::validate`.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        value.validate().map_err(AppError::Validation)?;
        Ok(Self(value))
    }
}

/// `Path<T>` whose rejection is the same JSON 400 envelope as `ValidJson`.
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        Ok(Self(value))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Collects problems for a required string field; whitespace-only counts as empty.
pub fn require_non_empty(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{field} should not be empty"));
    }
}

/// Like `require_non_empty` but only a zero-length value is rejected.
pub fn require_present(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.is_empty() {
        problems.push(format!("{field} should not be empty"));
    }
}

pub fn finish(problems: Vec<String>) -> Result<(), Vec<String>> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// Keeps "absent" and "explicit null" apart for patch bodies:
/// absent -> `None` (via `#[serde(default)]`), `null` -> `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        link: Option<Option<String>>,
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("Quan.Nguyen+tag@mail.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn double_option_separates_absent_from_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.link, None);
        let null: Patch = serde_json::from_str(r#"{"link":null}"#).unwrap();
        assert_eq!(null.link, Some(None));
        let set: Patch = serde_json::from_str(r#"{"link":"https://x.com"}"#).unwrap();
        assert_eq!(set.link, Some(Some("https://x.com".into())));
    }

    #[test]
    fn finish_reports_collected_problems() {
        let mut problems = Vec::new();
        require_non_empty(&mut problems, "title", "  ");
        assert_eq!(finish(problems), Err(vec!["title should not be empty".to_string()]));
        assert_eq!(finish(Vec::new()), Ok(()));
    }

    #[test]
    fn require_present_keeps_whitespace_values() {
        let mut problems = Vec::new();
        require_present(&mut problems, "password", "   ");
        assert!(problems.is_empty());
        require_present(&mut problems, "password", "");
        assert_eq!(problems, vec!["password should not be empty".to_string()]);
    }
}
