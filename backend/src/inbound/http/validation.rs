//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field errors share one shape: an `invalid_request` error whose details
//! carry `{"field": ..., "code": ...}` and, where useful, the rejected value.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{CommentBody, CommentValidationError, Error, RatingValidationError, Score};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    Blank,
    MinValue,
    MaxValue,
    InvalidJson,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "required",
            Self::Blank => "blank",
            Self::MinValue => "min_value",
            Self::MaxValue => "max_value",
            Self::InvalidJson => "invalid_json",
            Self::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const BODY: FieldName = FieldName::new("body");
pub(crate) const BOOK: FieldName = FieldName::new("book");
pub(crate) const SCORE: FieldName = FieldName::new("score");

fn field_error(field: FieldName, code: ErrorCode, message: String, value: Option<Value>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), value);
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
        None,
    )
}

/// Require an optional payload field.
pub(crate) fn required<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a rating score, reporting which bound was violated.
pub(crate) fn parse_score(value: Option<i64>) -> Result<Score, Error> {
    let raw = required(value, SCORE)?;
    Score::new(raw).map_err(|RatingValidationError::ScoreOutOfRange { value, min, max }| {
        let (code, message) = if value < i64::from(min) {
            (
                ErrorCode::MinValue,
                format!("Ensure this value is greater than or equal to {min}."),
            )
        } else {
            (
                ErrorCode::MaxValue,
                format!("Ensure this value is less than or equal to {max}."),
            )
        };
        field_error(SCORE, code, message, Some(json!(value)))
    })
}

/// Parse a comment body, rejecting blank text.
pub(crate) fn parse_comment_body(value: Option<String>) -> Result<CommentBody, Error> {
    let raw = required(value, BODY)?;
    CommentBody::new(raw).map_err(|err| match err {
        CommentValidationError::EmptyBody => field_error(
            BODY,
            ErrorCode::Blank,
            "This field may not be blank.".to_owned(),
            None,
        ),
        other => Error::invalid_request(other.to_string()),
    })
}

/// `JsonConfig` error handler mapping malformed bodies onto the domain error.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    Error::invalid_request(format!("malformed JSON body: {err}"))
        .with_details(json!({ "code": ErrorCode::InvalidJson.as_str() }))
        .into()
}

/// `QueryConfig` error handler mapping malformed query strings onto the
/// domain error.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    Error::invalid_request(format!("malformed query string: {err}"))
        .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str() }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    #[rstest]
    #[case(Some(1), Ok(1))]
    #[case(Some(5), Ok(5))]
    #[case(Some(0), Err("min_value"))]
    #[case(Some(-3), Err("min_value"))]
    #[case(Some(6), Err("max_value"))]
    #[case(None, Err("required"))]
    fn scores_are_bounded(#[case] raw: Option<i64>, #[case] expected: Result<u8, &str>) {
        match (parse_score(raw), expected) {
            (Ok(score), Ok(value)) => assert_eq!(score.get(), value),
            (Err(err), Err(code)) => {
                assert_eq!(err.code(), DomainCode::InvalidRequest);
                let details = err.details().expect("details");
                assert_eq!(details["field"], "score");
                assert_eq!(details["code"], code);
            }
            (got, want) => panic!("expected {want:?}, got {got:?}"),
        }
    }

    #[rstest]
    #[case(Some("   "), "blank")]
    #[case(None, "required")]
    fn blank_or_missing_bodies_are_rejected(#[case] raw: Option<&str>, #[case] code: &str) {
        let err = parse_comment_body(raw.map(str::to_owned)).expect_err("rejected");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "body");
        assert_eq!(details["code"], code);
    }

    #[rstest]
    fn bodies_keep_their_text() {
        let body = parse_comment_body(Some("Loved it".to_owned())).expect("valid");
        assert_eq!(body.as_str(), "Loved it");
    }
}
