//
//  jenkins-client
//  core/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Request Builder
//!
//! [`RequestBuilder`] composes a single HTTP exchange against a
//! [`JenkinsCore`]: method, API path, headers, payload, and the set of
//! response status codes that count as success. Resource clients use it for
//! every endpoint so acceptance and error classification behave the same
//! everywhere.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jenkins_client::core::{JenkinsCore, RequestBuilder};
//!
//! # async fn example() -> Result<(), jenkins_client::core::ApiError> {
//! let core = JenkinsCore::new("https://jenkins.example.com");
//!
//! // POST that treats a 302 redirect as success too
//! let response = RequestBuilder::new(&core, "/safeRestart")
//!     .with_post_method()
//!     .accept_status_code(503)
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use reqwest::Method;
use serde::de::DeserializeOwned;

use super::client::JenkinsCore;
use super::error::{classify, ApiError};

/// Content type of an HTML form submission, used by most Jenkins POST
/// endpoints.
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Status code and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status: u16,

    /// Raw response body.
    pub data: Vec<u8>,
}

impl ApiResponse {
    /// Deserializes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body is not valid JSON for `T`.
    pub fn as_object<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.data)?)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// Composes one HTTP exchange against a Jenkins server.
///
/// Defaults to `GET` with `{200}` as the accepted status set. The builder is
/// owned and chainable; each setter consumes and returns it.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    core: &'a JenkinsCore,
    method: Method,
    api: String,
    headers: Vec<(String, String)>,
    payload: Option<Vec<u8>>,
    accept_codes: Vec<u16>,
}

impl<'a> RequestBuilder<'a> {
    /// Creates a builder for the given API path, defaulting to a GET
    /// request that accepts only HTTP 200.
    pub fn new(core: &'a JenkinsCore, api: impl Into<String>) -> Self {
        Self {
            core,
            method: Method::GET,
            api: api.into(),
            headers: Vec::new(),
            payload: None,
            accept_codes: vec![200],
        }
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Shorthand for [`with_method(Method::POST)`](Self::with_method).
    pub fn with_post_method(self) -> Self {
        self.with_method(Method::POST)
    }

    /// Sets the raw request body.
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Encodes the given key/value pairs as a URL-encoded form body and
    /// marks the request as a form submission.
    pub fn with_form_values(mut self, values: &[(&str, &str)]) -> Self {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in values {
            serializer.append_pair(key, value);
        }
        self.payload = Some(serializer.finish().into_bytes());
        self.as_form_request()
    }

    /// Adds a request header.
    pub fn add_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Marks the request body as a URL-encoded form submission.
    pub fn as_form_request(self) -> Self {
        self.add_header("Content-Type", CONTENT_TYPE_FORM)
    }

    /// Shorthand for a POST carrying a URL-encoded form body.
    pub fn as_post_form_request(self) -> Self {
        self.with_post_method().as_form_request()
    }

    /// Adds a status code to the accepted set. Adding a code already in the
    /// set is a no-op.
    pub fn accept_status_code(mut self, code: u16) -> Self {
        if !self.accept_codes.contains(&code) {
            self.accept_codes.push(code);
        }
        self
    }

    /// Removes a status code from the accepted set. Removing an absent code
    /// is a no-op. The order of the remaining codes is unspecified.
    pub fn reject_status_code(mut self, code: u16) -> Self {
        if let Some(index) = self.accept_codes.iter().position(|c| *c == code) {
            self.accept_codes.swap_remove(index);
        }
        self
    }

    /// Returns the current accepted status codes.
    pub fn accepted_status_codes(&self) -> &[u16] {
        &self.accept_codes
    }

    /// Executes the exchange and classifies the response status.
    ///
    /// # Errors
    ///
    /// A status outside the accepted set maps through the error classifier:
    /// 400 to [`ApiError::BadRequest`], 404 to [`ApiError::NotFound`], other
    /// 4xx to [`ApiError::NoPermission`], anything else to
    /// [`ApiError::UnexpectedStatus`]. Transport failures surface as
    /// [`ApiError::Network`].
    pub async fn send(self) -> Result<ApiResponse, ApiError> {
        let response = self.send_raw().await?;
        Ok(response)
    }

    /// Executes the exchange without classifying the status code.
    ///
    /// Only transport-level failures produce an error; callers that parse
    /// rich error bodies (e.g. BlueOcean) use this and inspect
    /// [`ApiResponse::status`] themselves.
    pub async fn send_unchecked(self) -> Result<ApiResponse, ApiError> {
        let (status, data) = self
            .core
            .request(self.method, &self.api, &self.headers, self.payload)
            .await?;
        Ok(ApiResponse { status, data })
    }

    async fn send_raw(self) -> Result<ApiResponse, ApiError> {
        let accept_codes = self.accept_codes.clone();
        let response = self.send_unchecked().await?;
        if accept_codes.contains(&response.status) {
            Ok(response)
        } else {
            Err(classify(response.status, &response.data))
        }
    }
}
