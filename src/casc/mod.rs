//
//  jenkins-client
//  casc/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration as Code
//!
//! [`CascManager`] drives the configuration-as-code (JCasC) plugin: export
//! and reload the live configuration, fetch the schema, and point Jenkins at
//! a new configuration source.

use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// Client for the configuration-as-code plugin endpoints.
#[derive(Debug, Clone)]
pub struct CascManager {
    core: JenkinsCore,
}

impl CascManager {
    /// Creates a CasC manager over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Exports the current configuration as a YAML document.
    pub async fn export(&self) -> Result<String, ApiError> {
        let response = RequestBuilder::new(&self.core, "/configuration-as-code/export")
            .with_post_method()
            .send()
            .await?;
        Ok(response.text())
    }

    /// Returns the JSON schema of the configuration.
    pub async fn schema(&self) -> Result<String, ApiError> {
        let response = RequestBuilder::new(&self.core, "/configuration-as-code/schema")
            .with_post_method()
            .send()
            .await?;
        Ok(response.text())
    }

    /// Reloads the configuration from its current source.
    pub async fn reload(&self) -> Result<(), ApiError> {
        RequestBuilder::new(&self.core, "/configuration-as-code/reload")
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Applies the configuration.
    pub async fn apply(&self) -> Result<(), ApiError> {
        RequestBuilder::new(&self.core, "/configuration-as-code/apply")
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Replaces the configuration source. This is a UI form submit rather
    /// than a real API, so the server answers with a 302 redirect.
    pub async fn replace(&self, source: &str) -> Result<(), ApiError> {
        let json = format!(r#"{{"newSource": "{source}"}}"#);
        RequestBuilder::new(&self.core, "/configuration-as-code/replace")
            .with_post_method()
            .with_form_values(&[("json", &json), ("_.newSource", source)])
            .accept_status_code(302)
            .send()
            .await?;
        Ok(())
    }

    /// Asks the server to validate a new configuration source without
    /// applying it.
    pub async fn check_new_source(&self, source: &str) -> Result<(), ApiError> {
        RequestBuilder::new(&self.core, "/configuration-as-code/checkNewSource")
            .with_post_method()
            .with_form_values(&[("newSource", source)])
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn disabled_crumb(server: &mut mockito::Server) {
        server
            .mock("GET", "/crumbIssuer/api/json")
            .with_status(404)
            .create_async()
            .await;
    }

    fn client(server: &mockito::Server) -> CascManager {
        CascManager::new(JenkinsCore::new(server.url()))
    }

    #[tokio::test]
    async fn test_export() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        server
            .mock("POST", "/configuration-as-code/export")
            .with_status(200)
            .with_body("jenkins:\n  systemMessage: welcome\n")
            .create_async()
            .await;

        let config = client(&server).export().await.unwrap();
        assert!(config.contains("systemMessage"));
    }

    #[tokio::test]
    async fn test_schema() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        server
            .mock("POST", "/configuration-as-code/schema")
            .with_status(200)
            .with_body(r#"{"type":"object"}"#)
            .create_async()
            .await;

        let schema = client(&server).schema().await.unwrap();
        assert_eq!(schema, r#"{"type":"object"}"#);
    }

    #[tokio::test]
    async fn test_reload_and_apply() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let reload = server
            .mock("POST", "/configuration-as-code/reload")
            .with_status(200)
            .create_async()
            .await;
        let apply = server
            .mock("POST", "/configuration-as-code/apply")
            .with_status(200)
            .create_async()
            .await;

        let client = client(&server);
        client.reload().await.unwrap();
        client.apply().await.unwrap();
        reload.assert_async().await;
        apply.assert_async().await;
    }

    #[tokio::test]
    async fn test_replace_accepts_redirect() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/configuration-as-code/replace")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .with_status(302)
            .create_async()
            .await;

        client(&server)
            .replace("https://example.com/jenkins.yaml")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_check_new_source() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/configuration-as-code/checkNewSource")
            .match_body("newSource=https%3A%2F%2Fexample.com%2Fjenkins.yaml")
            .with_status(200)
            .create_async()
            .await;

        client(&server)
            .check_new_source("https://example.com/jenkins.yaml")
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
