//
//  jenkins-client
//  core/system.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # System Operations
//!
//! [`SystemClient`] covers server-level lifecycle and introspection
//! endpoints: restart, shutdown, quiet-down mode, instance identity, agent
//! labels, and the pipeline model converter.

use serde::Deserialize;

use super::client::JenkinsCore;
use super::error::ApiError;
use super::request::RequestBuilder;

/// Client for server-level Jenkins operations.
///
/// # Example
///
/// ```rust,no_run
/// use jenkins_client::core::{JenkinsCore, SystemClient};
///
/// # async fn example() -> Result<(), jenkins_client::core::ApiError> {
/// let client = SystemClient::new(
///     JenkinsCore::new("https://jenkins.example.com").with_auth("admin", "token"),
/// );
/// client.restart().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SystemClient {
    core: JenkinsCore,
}

/// Result of converting a Jenkinsfile to its JSON model via
/// `/pipeline-model-converter/toJson`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToJsonResult {
    /// `"success"` or `"failure"`.
    pub result: String,

    /// The JSON pipeline model; absent on failure.
    #[serde(default)]
    pub json: serde_json::Value,

    /// Converter error messages; empty on success.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// Result of rendering a JSON pipeline model back into a Jenkinsfile via
/// `/pipeline-model-converter/toJenkinsfile`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToJenkinsfileResult {
    /// `"success"` or `"failure"`.
    pub result: String,

    /// The rendered Jenkinsfile; absent on failure.
    #[serde(default)]
    pub jenkinsfile: String,

    /// Converter error messages; empty on success.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// Envelope wrapping every pipeline-model-converter response.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterResponse<T> {
    /// `"ok"` when the converter itself ran.
    pub status: String,

    /// The endpoint-specific conversion result.
    pub data: T,
}

/// Identity of a Jenkins instance, from the `instance-identity` plugin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JenkinsIdentity {
    pub fingerprint: String,
    pub public_key: String,
    pub system_message: String,
}

/// A label known to the Jenkins master, from the label-linked-jobs plugin
/// dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentLabel {
    #[serde(default)]
    pub clouds_count: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub has_more_than_one_job: bool,
    #[serde(default)]
    pub jobs_count: i64,
    #[serde(default)]
    pub jobs_with_label_default_value: Vec<String>,
    #[serde(default)]
    pub jobs_with_label_default_value_count: i64,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "labelURL")]
    pub label_url: String,
    #[serde(default)]
    pub nodes_count: i64,
    #[serde(default)]
    pub plugin_active_for_label: bool,
    #[serde(default)]
    pub triggered_jobs: Vec<String>,
    #[serde(default)]
    pub triggered_jobs_count: i64,
}

/// Response of the agent labels dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Vec<AgentLabel>,
}

impl SystemClient {
    /// Creates a system client over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Restarts Jenkins once no builds are running.
    ///
    /// The server answers 503 while it goes down, which is the expected
    /// outcome here.
    pub async fn restart(&self) -> Result<(), ApiError> {
        RequestBuilder::new(&self.core, "/safeRestart")
            .with_post_method()
            .reject_status_code(200)
            .accept_status_code(503)
            .send()
            .await?;
        Ok(())
    }

    /// Restarts Jenkins immediately, aborting running builds.
    pub async fn restart_directly(&self) -> Result<(), ApiError> {
        RequestBuilder::new(&self.core, "/restart")
            .with_post_method()
            .reject_status_code(200)
            .accept_status_code(503)
            .send()
            .await?;
        Ok(())
    }

    /// Shuts Jenkins down. With `safe` set, running builds complete first.
    pub async fn shutdown(&self, safe: bool) -> Result<(), ApiError> {
        let api = if safe { "/safeExit" } else { "/exit" };
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Puts Jenkins into quiet mode (no new builds start), or cancels it.
    pub async fn prepare_shutdown(&self, cancel: bool) -> Result<(), ApiError> {
        let api = if cancel { "/cancelQuietDown" } else { "/quietDown" };
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Returns the identity of the Jenkins instance.
    pub async fn get_identity(&self) -> Result<JenkinsIdentity, ApiError> {
        RequestBuilder::new(&self.core, "/instance")
            .send()
            .await?
            .as_object()
    }

    /// Returns the labels of all agents, via the label-linked-jobs plugin
    /// dashboard.
    pub async fn get_labels(&self) -> Result<LabelsResponse, ApiError> {
        RequestBuilder::new(&self.core, "/labelsdashboard/labelsData")
            .send()
            .await?
            .as_object()
    }

    /// Converts a declarative Jenkinsfile into its JSON pipeline model.
    ///
    /// A converter-level failure (e.g. a syntax error in the Jenkinsfile)
    /// still comes back as HTTP 200 with `result == "failure"` and the
    /// messages in `errors`; inspect the returned value.
    pub async fn to_json(&self, jenkinsfile: &str) -> Result<ConverterResponse<ToJsonResult>, ApiError> {
        RequestBuilder::new(&self.core, "/pipeline-model-converter/toJson")
            .with_post_method()
            .with_form_values(&[("jenkinsfile", jenkinsfile)])
            .send()
            .await?
            .as_object()
    }

    /// Renders a JSON pipeline model back into a declarative Jenkinsfile.
    pub async fn to_jenkinsfile(
        &self,
        json: &str,
    ) -> Result<ConverterResponse<ToJenkinsfileResult>, ApiError> {
        RequestBuilder::new(&self.core, "/pipeline-model-converter/toJenkinsfile")
            .with_post_method()
            .with_form_values(&[("json", json)])
            .send()
            .await?
            .as_object()
    }
}
