//
//  jenkins-client
//  core/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Error Classification
//!
//! This module provides the unified error type for all Jenkins API operations
//! and the classifier that maps non-accepted HTTP status codes to stable
//! error categories.
//!
//! ## Classification Rules
//!
//! | Status | Category |
//! |--------|----------|
//! | 400 | [`ApiError::BadRequest`] |
//! | 404 | [`ApiError::NotFound`] |
//! | other 4xx | [`ApiError::NoPermission`] with the numeric code |
//! | anything else unaccepted | [`ApiError::UnexpectedStatus`] with the numeric code |
//!
//! Transport failures and JSON decode failures pass through as their own
//! variants and are never reclassified. The raw response body is logged at
//! debug verbosity for diagnostics but not structurally parsed here; resource
//! clients that need richer error bodies (e.g. BlueOcean) parse the retained
//! body themselves.

use thiserror::Error;

/// Unified error type for all Jenkins API operations.
///
/// Error messages embed the numeric HTTP status code for diagnosability;
/// there is no machine-readable error-code field in the shared core.
///
/// # Example
///
/// ```rust
/// use jenkins_client::core::ApiError;
///
/// fn describe(err: &ApiError) -> &'static str {
///     match err {
///         ApiError::NotFound => "the resource does not exist",
///         ApiError::NoPermission(_) => "check your credentials",
///         _ => "something else went wrong",
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the request as malformed (HTTP 400).
    #[error("bad request, code 400")]
    BadRequest,

    /// The requested resource does not exist (HTTP 404).
    #[error("not found resources")]
    NotFound,

    /// The current user lacks permission for the operation (other 4xx).
    #[error("the current user has not permission, code {0}")]
    NoPermission(u16),

    /// A status code outside the accepted set that fits no other category
    /// (5xx, or an unaccepted 2xx/3xx).
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// A structured error payload returned by the server, e.g. the BlueOcean
    /// `{message, code, errors[]}` body.
    #[error("{message}, code {code}")]
    Server {
        /// Server-reported error code (not necessarily the HTTP status).
        code: i64,
        /// Server-reported error message.
        message: String,
    },

    /// A transport-level failure: connection refused, DNS failure, timeout.
    ///
    /// Surfaced unmodified and never retried.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The Jenkins base URL or a derived URL could not be parsed.
    #[error("cannot parse the URL of Jenkins: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A successful-status response body failed to deserialize as JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A CasC YAML document failed to (de)serialize.
    #[error("failed to process YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A caller-supplied argument failed validation before any request
    /// was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration document misses a structure the operation requires,
    /// e.g. `jenkins.clouds[0].kubernetes.templates` in a CasC export.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Maps a terminal non-accepted status code and response body to an
/// [`ApiError`].
///
/// The body is logged at debug verbosity and otherwise ignored.
pub fn classify(status: u16, body: &[u8]) -> ApiError {
    tracing::debug!(body = %String::from_utf8_lossy(body), "get response");
    match status {
        400 => ApiError::BadRequest,
        404 => ApiError::NotFound,
        code if (400..500).contains(&code) => ApiError::NoPermission(code),
        code => ApiError::UnexpectedStatus(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bad_request() {
        assert!(matches!(classify(400, b""), ApiError::BadRequest));
        assert_eq!(classify(400, b"").to_string(), "bad request, code 400");
    }

    #[test]
    fn test_classify_not_found() {
        assert!(matches!(classify(404, b""), ApiError::NotFound));
        assert_eq!(classify(404, b"").to_string(), "not found resources");
    }

    #[test]
    fn test_classify_no_permission() {
        assert!(matches!(classify(401, b""), ApiError::NoPermission(401)));
        assert_eq!(
            classify(403, b"").to_string(),
            "the current user has not permission, code 403"
        );
        assert!(matches!(classify(405, b""), ApiError::NoPermission(405)));
        assert!(matches!(classify(499, b""), ApiError::NoPermission(499)));
    }

    #[test]
    fn test_classify_unexpected() {
        assert!(matches!(classify(500, b""), ApiError::UnexpectedStatus(500)));
        assert_eq!(
            classify(500, b"").to_string(),
            "unexpected status code: 500"
        );
        assert!(matches!(classify(302, b""), ApiError::UnexpectedStatus(302)));
        assert!(matches!(classify(503, b""), ApiError::UnexpectedStatus(503)));
    }
}
