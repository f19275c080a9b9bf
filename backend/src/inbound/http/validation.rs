//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an `invalid_request` error whose details name the
//! offending field and a stable machine-readable code.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::{
    Error, ListingValidationError, LoginValidationError, MAX_PAGE_SIZE, PageRequest, ProjectStatus,
    ProjectValidationError, SearchTerm, Slug, SlugValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidSlug,
    InvalidEmail,
    MissingField,
    TooShort,
    TooLong,
    InvalidUrl,
    InvalidStatus,
    InvalidJson,
    InvalidPage,
    InvalidLimit,
    InvalidSort,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSlug => "invalid_slug",
            Self::InvalidEmail => "invalid_email",
            Self::MissingField => "missing_field",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidUrl => "invalid_url",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidJson => "invalid_json",
            Self::InvalidPage => "invalid_page",
            Self::InvalidLimit => "invalid_limit",
            Self::InvalidSort => "invalid_sort",
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

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) const SLUG_FIELD: FieldName = FieldName::new("slug");

/// Parse a slug taken from the request path.
pub(crate) fn parse_slug(raw: &str) -> Result<Slug, Error> {
    Slug::parse(raw).map_err(|err: SlugValidationError| {
        ValidationError::new(SLUG_FIELD, err.to_string()).with_value(ErrorCode::InvalidSlug, raw)
    })
}

pub(crate) const BODY_FIELD: FieldName = FieldName::new("body");

/// Decode a JSON request body that was read as raw bytes.
///
/// An empty body decodes as `T::default()`, so missing fields surface through
/// the domain's own validation rather than as a transport error.
pub(crate) fn parse_json_body<T>(raw: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
{
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(raw).map_err(|err| {
        ValidationError::new(BODY_FIELD, format!("malformed JSON body: {err}"))
            .with_code(ErrorCode::InvalidJson)
    })
}

pub(crate) fn map_listing_validation_error(err: &ListingValidationError) -> Error {
    let code = match err {
        ListingValidationError::InvalidPage => ErrorCode::InvalidPage,
        ListingValidationError::InvalidLimit { .. } => ErrorCode::InvalidLimit,
        ListingValidationError::InvalidSort { .. } => ErrorCode::InvalidSort,
        ListingValidationError::SearchTooLong { .. } => ErrorCode::TooLong,
    };
    ValidationError::new(FieldName::new(err.field()), err.to_string()).with_code(code)
}

/// Parse `page` and `limit` query parameters; absent values take the first
/// page and `default_limit`.
pub(crate) fn parse_page_request(
    page: Option<&str>,
    limit: Option<&str>,
    default_limit: u32,
) -> Result<PageRequest, Error> {
    let page = match page {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| map_listing_validation_error(&ListingValidationError::InvalidPage))?,
        None => 1,
    };
    let limit = match limit {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            map_listing_validation_error(&ListingValidationError::InvalidLimit {
                max: MAX_PAGE_SIZE,
            })
        })?,
        None => default_limit,
    };
    PageRequest::new(page, limit).map_err(|err| map_listing_validation_error(&err))
}

/// Parse a `sort` query parameter, defaulting when absent or blank.
pub(crate) fn parse_sort<S>(raw: Option<&str>) -> Result<S, Error>
where
    S: FromStr<Err = ListingValidationError> + Default,
{
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse()
            .map_err(|err| map_listing_validation_error(&err)),
        None => Ok(S::default()),
    }
}

pub(crate) fn parse_search(raw: Option<&str>) -> Result<Option<SearchTerm>, Error> {
    raw.map_or(Ok(None), |value| {
        SearchTerm::parse(value).map_err(|err| map_listing_validation_error(&err))
    })
}

/// Parse a `status` filter; `all` or an absent value lists every status.
pub(crate) fn parse_status_filter(raw: Option<&str>) -> Result<Option<ProjectStatus>, Error> {
    match raw.map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|err| map_project_validation_error(&err)),
    }
}

pub(crate) fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => (FieldName::new("email"), ErrorCode::MissingField),
        LoginValidationError::InvalidEmail => (FieldName::new("email"), ErrorCode::InvalidEmail),
        LoginValidationError::EmptyPassword => {
            (FieldName::new("password"), ErrorCode::MissingField)
        }
    };
    ValidationError::new(field, err.to_string()).with_code(code)
}

pub(crate) fn map_project_validation_error(err: &ProjectValidationError) -> Error {
    let code = match err {
        ProjectValidationError::NameTooShort { .. }
        | ProjectValidationError::TaglineTooShort { .. }
        | ProjectValidationError::DescriptionTooShort { .. } => ErrorCode::TooShort,
        ProjectValidationError::TaglineTooLong { .. } => ErrorCode::TooLong,
        ProjectValidationError::InvalidUrl { .. } => ErrorCode::InvalidUrl,
        ProjectValidationError::InvalidStatus => ErrorCode::InvalidStatus,
    };
    ValidationError::new(FieldName::new(err.field()), err.to_string()).with_code(code)
}
