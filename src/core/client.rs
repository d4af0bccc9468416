//
//  jenkins-client
//  core/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Connection Context
//!
//! [`JenkinsCore`] holds everything needed to authenticate and route one HTTP
//! exchange to a configured Jenkins server: base URL, credentials, TLS and
//! proxy settings, timeout, and the mutable session state (CSRF crumb and
//! cookies) that Jenkins hands back across exchanges.
//!
//! ## Lifetime
//!
//! A core is constructed once per logical client and reused across many
//! calls. There is no explicit teardown; the only held resource is the HTTP
//! connection pool owned by the underlying client.
//!
//! ## CSRF Crumbs
//!
//! Jenkins protects state-mutating endpoints with a per-session crumb. The
//! core fetches a fresh crumb from `/crumbIssuer/api/json` before every POST
//! and attaches it under the server-announced header name. A 404 from the
//! crumb issuer means crumb protection is disabled and is not an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jenkins_client::core::JenkinsCore;
//!
//! let core = JenkinsCore::new("https://jenkins.example.com")
//!     .with_auth("admin", "11aabbccddeeff")
//!     .with_language("zh-CN");
//! ```

use std::sync::Mutex;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE, PROXY_AUTHORIZATION, SET_COOKIE};
use reqwest::{Method, Response};
use serde::Deserialize;

use super::error::{classify, ApiError};
use crate::util::url_join;

/// Path of the crumb issuer endpoint, fixed across Jenkins versions.
const CRUMB_ISSUER_API: &str = "/crumbIssuer/api/json";

/// Default per-exchange timeout when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// A CSRF crumb as returned by the Jenkins crumb issuer.
///
/// The `crumb_request_field` names the header the crumb value must be sent
/// under; it varies with server configuration (commonly `Jenkins-Crumb`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct JenkinsCrumb {
    /// Header name the crumb must be attached under.
    #[serde(rename = "crumbRequestField")]
    pub crumb_request_field: String,

    /// The crumb value itself.
    pub crumb: String,
}

/// Mutable per-session state, updated from server responses.
#[derive(Debug, Default, Clone)]
struct Session {
    crumb: Option<JenkinsCrumb>,
    cookies: Vec<String>,
}

/// Connection context for a Jenkins server.
///
/// Holds the server URL, credentials, TLS and proxy settings, the request
/// timeout, and the accumulated session state. All resource clients compose
/// a `JenkinsCore` and issue their exchanges through it.
///
/// # Concurrency
///
/// Session state sits behind a mutex purely for interior mutability; the
/// library makes no ordering guarantee across concurrent callers sharing one
/// core. Concurrent POSTs may race on the crumb refresh; use one core per
/// task if that matters.
#[derive(Debug)]
pub struct JenkinsCore {
    /// Base URL of the Jenkins server, e.g. `https://jenkins.example.com`.
    pub url: String,

    /// Username for HTTP basic auth. Applied only when a token is also set.
    pub username: Option<String>,

    /// API token (or password) for HTTP basic auth.
    pub token: Option<String>,

    /// Skip TLS certificate verification. Off by default.
    pub insecure_skip_verify: bool,

    /// Proxy URL applied to the constructed HTTP client.
    pub proxy: Option<String>,

    /// Proxy credentials in `user:password` form, sent as a
    /// `Proxy-Authorization: Basic …` header.
    pub proxy_auth: Option<String>,

    /// Per-exchange timeout. Defaults to 15 seconds when unset.
    pub timeout: Option<Duration>,

    /// Value for the `Accept-Language` header, scoped to this context
    /// rather than the whole process.
    pub language: Option<String>,

    custom_client: Option<reqwest::Client>,
    session: Mutex<Session>,
}

impl JenkinsCore {
    /// Creates a context for the given server URL with no credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            token: None,
            insecure_skip_verify: false,
            proxy: None,
            proxy_auth: None,
            timeout: None,
            language: None,
            custom_client: None,
            session: Mutex::new(Session::default()),
        }
    }

    /// Sets the username and API token used for HTTP basic auth.
    pub fn with_auth(mut self, username: impl Into<String>, token: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.token = Some(token.into());
        self
    }

    /// Sets the proxy URL and optional `user:password` proxy credentials.
    pub fn with_proxy(mut self, proxy: impl Into<String>, auth: Option<String>) -> Self {
        self.proxy = Some(proxy.into());
        self.proxy_auth = auth;
        self
    }

    /// Sets the per-exchange timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `Accept-Language` header value for every exchange issued
    /// through this context.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Disables TLS certificate verification.
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// Injects a pre-built HTTP client, used unmodified for every exchange.
    ///
    /// Intended for tests and interception; when set, no `User-Agent`,
    /// timeout, TLS, or proxy configuration is applied by this context.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.custom_client = Some(client);
        self
    }

    /// Returns the configured HTTP client.
    ///
    /// A custom client is returned unmodified; otherwise one is built with
    /// the TLS, proxy, and timeout settings of this context.
    pub fn http_client(&self) -> Result<reqwest::Client, ApiError> {
        if let Some(client) = &self.custom_client {
            return Ok(client.clone());
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(format!("jenkins-client/{}", crate::VERSION))
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .danger_accept_invalid_certs(self.insecure_skip_verify);
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(builder.build()?)
    }

    /// Fetches the CSRF crumb from the crumb issuer and caches it on this
    /// context.
    ///
    /// # Returns
    ///
    /// - HTTP 200: the parsed crumb.
    /// - HTTP 404: `None`; crumb protection is disabled on the server,
    ///   which is a normal situation, not an error.
    ///
    /// # Errors
    ///
    /// Any other status code yields [`ApiError::UnexpectedStatus`]; transport
    /// failures surface unmodified.
    pub async fn get_crumb(&self) -> Result<Option<JenkinsCrumb>, ApiError> {
        let response = self
            .send_once(Method::GET, CRUMB_ISSUER_API, &[], None, None)
            .await?;
        let status = response.status().as_u16();
        let data = response.bytes().await?;

        match status {
            200 => {
                let crumb: JenkinsCrumb = serde_json::from_slice(&data)?;
                self.lock_session().crumb = Some(crumb.clone());
                Ok(Some(crumb))
            }
            404 => Ok(None),
            code => Err(ApiError::UnexpectedStatus(code)),
        }
    }

    /// Executes one HTTP exchange and returns the status code and raw body.
    ///
    /// The absolute URL is resolved by joining the base URL and `api`
    /// (preserving a trailing slash on `api`). The context's
    /// `Accept-Language`, basic auth, proxy auth, stored cookies, and (for
    /// POST) a freshly fetched crumb are attached before the caller-supplied
    /// headers are merged in. Any `Set-Cookie` response headers replace the
    /// stored cookies.
    ///
    /// # Errors
    ///
    /// A transport-level failure (DNS, connection refused, timeout) surfaces
    /// as [`ApiError::Network`] and is not retried. A crumb-fetch failure
    /// aborts a POST before it is sent. Non-accepted status codes are *not*
    /// an error at this layer; classification belongs to
    /// [`RequestBuilder`](super::RequestBuilder).
    pub async fn request(
        &self,
        method: Method,
        api: &str,
        headers: &[(String, String)],
        payload: Option<Vec<u8>>,
    ) -> Result<(u16, Vec<u8>), ApiError> {
        let crumb = self.crumb_for(&method).await?;
        let response = self
            .send_once(method, api, headers, payload, crumb)
            .await?;

        let status = response.status().as_u16();
        self.capture_cookies(&response);
        let data = response.bytes().await?.to_vec();
        Ok((status, data))
    }

    /// Like [`request`](Self::request) but hands back the raw
    /// [`reqwest::Response`], for callers that need response headers
    /// (e.g. progressive console logs).
    pub async fn request_response(
        &self,
        method: Method,
        api: &str,
        headers: &[(String, String)],
        payload: Option<Vec<u8>>,
    ) -> Result<Response, ApiError> {
        let crumb = self.crumb_for(&method).await?;
        self.send_once(method, api, headers, payload, crumb).await
    }

    /// Sends a `multipart/form-data` POST, used for file uploads such as
    /// plugin archives. Crumb and session handling match
    /// [`request`](Self::request).
    pub async fn post_multipart(
        &self,
        api: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(u16, Vec<u8>), ApiError> {
        let crumb = self.get_crumb().await?;
        let target = url_join(&self.url, api)?;
        tracing::debug!(url = %target, "send multipart POST");

        let client = self.http_client()?;
        let request = self
            .decorate(client.post(target), &crumb, &[])
            .multipart(form);
        let response = request.send().await?;
        let status = response.status().as_u16();
        self.capture_cookies(&response);
        let data = response.bytes().await?.to_vec();
        Ok((status, data))
    }

    /// Fetches a crumb for state-mutating methods, propagating fetch
    /// failures; non-mutating methods skip the round trip.
    async fn crumb_for(&self, method: &Method) -> Result<Option<JenkinsCrumb>, ApiError> {
        if *method == Method::POST {
            self.get_crumb().await
        } else {
            Ok(None)
        }
    }

    async fn send_once(
        &self,
        method: Method,
        api: &str,
        headers: &[(String, String)],
        payload: Option<Vec<u8>>,
        crumb: Option<JenkinsCrumb>,
    ) -> Result<Response, ApiError> {
        let target = url_join(&self.url, api)?;
        tracing::debug!(url = %target, method = %method, "send HTTP request");

        let client = self.http_client()?;
        let mut request = self.decorate(client.request(method, target), &crumb, headers);
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        Ok(request.send().await?)
    }

    /// Attaches language, auth, proxy credentials, crumb, cookies and
    /// caller headers to a request.
    fn decorate(
        &self,
        mut request: reqwest::RequestBuilder,
        crumb: &Option<JenkinsCrumb>,
        headers: &[(String, String)],
    ) -> reqwest::RequestBuilder {
        if let Some(language) = &self.language {
            request = request.header(ACCEPT_LANGUAGE, language);
        }
        if let (Some(username), Some(token)) = (&self.username, &self.token) {
            request = request.basic_auth(username, Some(token));
        }
        if let Some(proxy_auth) = &self.proxy_auth {
            request = request.header(
                PROXY_AUTHORIZATION,
                format!("Basic {}", BASE64.encode(proxy_auth)),
            );
        }
        if let Some(crumb) = &crumb {
            request = request.header(&crumb.crumb_request_field, &crumb.crumb);
        }

        let cookies = self.lock_session().cookies.join("; ");
        if !cookies.is_empty() {
            request = request.header(COOKIE, cookies);
        }

        for (key, value) in headers {
            request = request.header(key, value);
        }

        request
    }

    /// Stores any `Set-Cookie` response headers, replacing previously
    /// stored cookies.
    fn capture_cookies(&self, response: &Response) {
        let cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(|value| match value.split_once(';') {
                Some((pair, _attributes)) => pair.trim().to_string(),
                None => value.trim().to_string(),
            })
            .collect();
        if !cookies.is_empty() {
            self.lock_session().cookies = cookies;
        }
    }

    /// Returns the crumb cached by the most recent successful fetch, if any.
    pub fn cached_crumb(&self) -> Option<JenkinsCrumb> {
        self.lock_session().crumb.clone()
    }

    /// Returns the cookies captured from the most recent response that
    /// carried any.
    pub fn cookies(&self) -> Vec<String> {
        self.lock_session().cookies.clone()
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Session> {
        // a poisoned lock only ever holds plain data, keep going with it
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Classifies a terminal non-accepted status code into an [`ApiError`].
    pub fn error_handle(&self, status: u16, data: &[u8]) -> ApiError {
        classify(status, data)
    }
}

impl Clone for JenkinsCore {
    /// Clones the configuration and a snapshot of the current session state.
    fn clone(&self) -> Self {
        let session = self.lock_session().clone();
        Self {
            url: self.url.clone(),
            username: self.username.clone(),
            token: self.token.clone(),
            insecure_skip_verify: self.insecure_skip_verify,
            proxy: self.proxy.clone(),
            proxy_auth: self.proxy_auth.clone(),
            timeout: self.timeout,
            language: self.language.clone(),
            custom_client: self.custom_client.clone(),
            session: Mutex::new(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fake")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url());
        let (status, data) = core
            .request(Method::GET, "/fake", &[], None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(status, 200);
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_post_request_carries_crumb() {
        let mut server = mockito::Server::new_async().await;
        let crumb_mock = server
            .mock("GET", "/crumbIssuer/api/json")
            .with_status(200)
            .with_body(r#"{"crumbRequestField":"Jenkins-Crumb","crumb":"abc123"}"#)
            .create_async()
            .await;
        let post_mock = server
            .mock("POST", "/fake")
            .match_header("Jenkins-Crumb", "abc123")
            .with_status(200)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url());
        let (status, _) = core
            .request(Method::POST, "/fake", &[], None)
            .await
            .unwrap();

        crumb_mock.assert_async().await;
        post_mock.assert_async().await;
        assert_eq!(status, 200);
        assert_eq!(
            core.cached_crumb(),
            Some(JenkinsCrumb {
                crumb_request_field: "Jenkins-Crumb".to_string(),
                crumb: "abc123".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_get_crumb_disabled() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/crumbIssuer/api/json")
            .with_status(404)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url());
        let crumb = core.get_crumb().await.unwrap();
        assert!(crumb.is_none());
        assert!(core.cached_crumb().is_none());
    }

    #[tokio::test]
    async fn test_get_crumb_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/crumbIssuer/api/json")
            .with_status(500)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url());
        let err = core.get_crumb().await.unwrap_err();
        assert_eq!(err.to_string(), "unexpected status code: 500");
    }

    #[tokio::test]
    async fn test_crumb_fetch_failure_aborts_post() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/crumbIssuer/api/json")
            .with_status(500)
            .create_async()
            .await;
        let post_mock = server
            .mock("POST", "/fake")
            .expect(0)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url());
        let err = core.request(Method::POST, "/fake", &[], None).await;
        assert!(err.is_err());
        post_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_basic_auth_applied() {
        let mut server = mockito::Server::new_async().await;
        // "admin:token" base64-encoded
        let mock = server
            .mock("GET", "/fake")
            .match_header("authorization", "Basic YWRtaW46dG9rZW4=")
            .with_status(200)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url()).with_auth("admin", "token");
        core.request(Method::GET, "/fake", &[], None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_accept_language_applied() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fake")
            .match_header("accept-language", "zh-CN")
            .with_status(200)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url()).with_language("zh-CN");
        core.request(Method::GET, "/fake", &[], None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_cookies_captured_and_replayed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/first")
            .with_status(200)
            .with_header("set-cookie", "JSESSIONID=node01; Path=/; HttpOnly")
            .create_async()
            .await;
        let second = server
            .mock("GET", "/second")
            .match_header("cookie", "JSESSIONID=node01")
            .with_status(200)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url());
        core.request(Method::GET, "/first", &[], None).await.unwrap();
        assert_eq!(core.cookies(), vec!["JSESSIONID=node01".to_string()]);

        core.request(Method::GET, "/second", &[], None).await.unwrap();
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_caller_headers_merged() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fake")
            .match_header("fake", "fake")
            .with_status(200)
            .create_async()
            .await;

        let core = JenkinsCore::new(server.url());
        core.request(
            Method::GET,
            "/fake",
            &[("fake".to_string(), "fake".to_string())],
            None,
        )
        .await
        .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_http_client_with_proxy_settings() {
        let core = JenkinsCore::new("http://localhost")
            .with_proxy("http://proxy.local:3128", Some("user:pass".to_string()))
            .with_insecure_skip_verify(true);
        assert!(core.http_client().is_ok());
    }
}
