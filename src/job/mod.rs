//
//  jenkins-client
//  job/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Job Management
//!
//! [`JobClient`] drives the classic Jenkins job API: searching items,
//! triggering and stopping builds, reading build history and console logs,
//! creating, deleting, disabling and enabling jobs, pipeline script
//! handling, and pending-input actions.
//!
//! The BlueOcean API lives in [`BlueOceanClient`]; job names nest via
//! [`job_path`] and BlueOcean pipelines via [`pipeline_path`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use jenkins_client::core::JenkinsCore;
//! use jenkins_client::job::JobClient;
//!
//! # async fn example() -> Result<(), jenkins_client::core::ApiError> {
//! let client = JobClient::new(
//!     JenkinsCore::new("https://jenkins.example.com").with_auth("admin", "token"),
//! );
//! client.build("folder my-pipeline").await?;
//! let log = client.log("folder my-pipeline", -1, 0).await?;
//! println!("{}", log.text);
//! # Ok(())
//! # }
//! ```

mod blueocean;
mod path;
mod time;

pub use blueocean::{
    BlueOceanClient, BlueOceanError, BlueOceanErrorDetail, BlueOceanNode, BuildOption,
    GetBuildOption, GetNodesOption, NodeEdge, NodeInput, Parameter, PipelineBuild, ReplayOption,
};
pub use path::{job_path, pipeline_path};
pub use time::JenkinsTime;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// Stapler type of a string build parameter.
pub const STRING_PARAMETER_DEFINITION: &str = "StringParameterDefinition";

/// Stapler type of a file build parameter.
pub const FILE_PARAMETER_DEFINITION: &str = "FileParameterDefinition";

/// An item returned by a job search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JenkinsItem {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
    pub url: String,
}

/// A Jenkins job as returned by `/job/{..}/api/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    #[serde(rename = "_class")]
    pub class: String,
    pub name: String,
    pub url: String,
    pub buildable: bool,
    pub color: String,
    pub concurrent_build: bool,
    pub next_build_number: i32,
    pub builds: Vec<SimpleJobBuild>,
}

/// A build reference embedded in a job document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimpleJobBuild {
    pub number: i32,
    pub url: String,
}

/// A build as returned by `/job/{..}/{n}/api/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobBuild {
    pub building: bool,
    pub description: Option<String>,
    pub display_name: String,
    pub duration: i64,
    pub estimated_duration: i64,
    pub full_display_name: String,
    pub id: String,
    pub keep_log: bool,
    pub number: i32,
    #[serde(rename = "queueId")]
    pub queue_id: i64,
    pub result: Option<String>,
    pub timestamp: i64,
    pub url: String,
    pub previous_build: Option<SimpleJobBuild>,
    pub next_build: Option<SimpleJobBuild>,
}

/// The default value carried by a parameter definition.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ParameterValue {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// A build parameter definition: string, choice, and run parameters are all
/// expressed through the optional fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub parameter_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_parameter_value: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

/// Payload of `/view/all/createItem`: plain creation or copy mode.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateJobPayload {
    pub name: String,
    pub mode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
}

/// Pipeline job script as exposed by the `restFul` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineScript {
    pub name: String,
    pub script: String,
}

/// A pending input step waiting for a decision.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputItem {
    pub id: String,
    pub message: String,
    pub proceed_text: String,
    pub proceed_url: String,
    pub abort_url: String,
    pub redirect_approval_url: String,
    pub inputs: Vec<ParameterDefinition>,
}

/// One slice of a progressive console log.
#[derive(Debug, Clone, Default)]
pub struct JobLog {
    /// More log data is available beyond this slice.
    pub has_more: bool,
    /// Offset to pass as `start` for the next slice.
    pub next_start: i64,
    /// Text of this slice.
    pub text: String,
}

/// A category of creatable job types.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobCategory {
    pub description: String,
    pub id: String,
    pub items: Vec<JobCategoryItem>,
    pub min_to_show: i32,
    pub name: String,
    pub order: i32,
}

/// A creatable job type inside a category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobCategoryItem {
    #[serde(rename = "class")]
    pub class: String,
    pub description: String,
    pub display_name: String,
    pub order: i32,
}

#[derive(Debug, Deserialize)]
struct JobCategories {
    #[serde(default)]
    categories: Vec<JobCategory>,
}

/// Client for the classic Jenkins job API.
#[derive(Debug, Clone)]
pub struct JobClient {
    core: JenkinsCore,
}

impl JobClient {
    /// Creates a job client over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Searches items by name and type, paginated.
    pub async fn search(
        &self,
        name: &str,
        kind: &str,
        start: i32,
        limit: i32,
    ) -> Result<Vec<JenkinsItem>, ApiError> {
        let api = format!("/items/list?name={name}&type={kind}&start={start}&limit={limit}");
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Returns a job by name; folder nesting via space-separated names.
    pub async fn get_job(&self, job_name: &str) -> Result<Job, ApiError> {
        let api = format!("{}/api/json", job_path(job_name));
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Triggers a build without parameters. The server answers 201 when the
    /// build is queued.
    pub async fn build(&self, job_name: &str) -> Result<(), ApiError> {
        let api = format!("{}/build", job_path(job_name));
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .reject_status_code(200)
            .accept_status_code(201)
            .send()
            .await?;
        Ok(())
    }

    /// Triggers a build with the given parameters, posted as the form field
    /// `json={"parameter": ...}` the way the Jenkins UI submits them.
    pub async fn build_with_params(
        &self,
        job_name: &str,
        parameters: &[ParameterDefinition],
    ) -> Result<(), ApiError> {
        let api = format!("{}/build", job_path(job_name));
        // a single parameter is submitted as an object, several as an array
        let param_json = if parameters.len() == 1 {
            serde_json::to_string(&parameters[0])?
        } else {
            serde_json::to_string(parameters)?
        };
        let payload = format!("{{\"parameter\": {param_json}}}");
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .with_form_values(&[("json", &payload)])
            .reject_status_code(200)
            .accept_status_code(201)
            .send()
            .await?;
        Ok(())
    }

    /// Returns one build of a job; `build_id` -1 selects the last build.
    pub async fn get_build(&self, job_name: &str, build_id: i32) -> Result<JobBuild, ApiError> {
        let path = job_path(job_name);
        let api = if build_id == -1 {
            format!("{path}/lastBuild/api/json")
        } else {
            format!("{path}/{build_id}/api/json")
        };
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Stops a running build; `build_id` -1 selects the last build.
    pub async fn stop_job(&self, job_name: &str, build_id: i32) -> Result<(), ApiError> {
        let path = job_path(job_name);
        let api = if build_id <= 0 {
            format!("{path}/lastBuild/stop")
        } else {
            format!("{path}/{build_id}/stop")
        };
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Returns the detailed build history of a job.
    pub async fn get_history(&self, job_name: &str) -> Result<Vec<JobBuild>, ApiError> {
        let job = self.get_job(job_name).await?;
        let mut builds = Vec::with_capacity(job.builds.len());
        for build in &job.builds {
            builds.push(self.get_build(job_name, build.number).await?);
        }
        Ok(builds)
    }

    /// Fetches a slice of the console log starting at byte offset `start`;
    /// `build_id` -1 selects the last build.
    ///
    /// The response headers `X-More-Data` and `X-Text-Size` drive
    /// [`JobLog::has_more`] and [`JobLog::next_start`], so callers can poll
    /// a running build to completion.
    pub async fn log(&self, job_name: &str, build_id: i32, start: i64) -> Result<JobLog, ApiError> {
        let path = job_path(job_name);
        let api = if build_id == -1 {
            format!("{path}/lastBuild/logText/progressiveText?start={start}")
        } else {
            format!("{path}/{build_id}/logText/progressiveText?start={start}")
        };

        let response = self
            .core
            .request_response(Method::GET, &api, &[], None)
            .await?;
        let status = response.status().as_u16();
        if status != 200 {
            let data = response.bytes().await?;
            return Err(self.core.error_handle(status, &data));
        }

        let has_more = response
            .headers()
            .get("X-More-Data")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let next_start = response
            .headers()
            .get("X-Text-Size")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let text = String::from_utf8_lossy(&response.bytes().await?).into_owned();

        Ok(JobLog {
            has_more,
            next_start,
            text,
        })
    }

    /// Creates a job. `mode` is the item type, or `"copy"` together with
    /// `from` to clone an existing job.
    pub async fn create(&self, payload: CreateJobPayload) -> Result<(), ApiError> {
        let json = serde_json::to_string(&payload)?;
        RequestBuilder::new(&self.core, "/view/all/createItem")
            .with_post_method()
            .with_form_values(&[
                ("json", &json),
                ("name", &payload.name),
                ("mode", &payload.mode),
                ("from", &payload.from),
            ])
            .send()
            .await?;
        Ok(())
    }

    /// Deletes a job.
    pub async fn delete(&self, job_name: &str) -> Result<(), ApiError> {
        let api = format!("{}/doDelete", job_path(job_name));
        RequestBuilder::new(&self.core, api)
            .as_post_form_request()
            .send()
            .await?;
        Ok(())
    }

    /// Disables a job. The server redirects back to the job page on success.
    pub async fn disable_job(&self, job_name: &str) -> Result<(), ApiError> {
        let api = format!("{}/disable", job_path(job_name));
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .accept_status_code(302)
            .send()
            .await?;
        Ok(())
    }

    /// Enables a previously disabled job.
    pub async fn enable_job(&self, job_name: &str) -> Result<(), ApiError> {
        let api = format!("{}/enable", job_path(job_name));
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .accept_status_code(302)
            .send()
            .await?;
        Ok(())
    }

    /// Returns the categories of creatable job types.
    pub async fn get_job_type_categories(&self) -> Result<Vec<JobCategory>, ApiError> {
        let result: JobCategories = RequestBuilder::new(&self.core, "/view/all/itemCategories?depth=3")
            .send()
            .await?
            .as_object()?;
        Ok(result.categories)
    }

    /// Returns the pipeline script of a job, via the `restFul` endpoint of
    /// the pipeline-restful-api plugin.
    pub async fn get_pipeline(&self, job_name: &str) -> Result<PipelineScript, ApiError> {
        let api = format!("{}/restFul", job_path(job_name));
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Replaces the pipeline script of a job.
    pub async fn update_pipeline(&self, job_name: &str, script: &str) -> Result<(), ApiError> {
        let api = format!("{}/restFul/update", job_path(job_name));
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .with_form_values(&[("script", script)])
            .send()
            .await?;
        Ok(())
    }

    /// Returns the pending input actions of a build.
    pub async fn get_job_input_actions(
        &self,
        job_name: &str,
        build_id: i32,
    ) -> Result<Vec<InputItem>, ApiError> {
        let api = format!("{}/{build_id}/wfapi/pendingInputActions", job_path(job_name));
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Approves or aborts a pending input step. Parameters are only sent
    /// when approving.
    pub async fn job_input_submit(
        &self,
        job_name: &str,
        input_id: &str,
        build_id: i32,
        approve: bool,
        params: &[(&str, &str)],
    ) -> Result<(), ApiError> {
        let path = job_path(job_name);
        let api = if approve {
            format!("{path}/{build_id}/input/{input_id}/proceed")
        } else {
            format!("{path}/{build_id}/input/{input_id}/abort")
        };

        let mut builder = RequestBuilder::new(&self.core, api).with_post_method();
        if approve && !params.is_empty() {
            let parameters: Vec<serde_json::Value> = params
                .iter()
                .map(|(name, value)| serde_json::json!({"name": name, "value": value}))
                .collect();
            let payload = format!(
                "{{\"parameter\": {}}}",
                serde_json::to_string(&parameters)?
            );
            builder = builder.with_form_values(&[("json", &payload)]);
        }
        builder.send().await?;
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

    fn client(server: &mockito::Server) -> JobClient {
        JobClient::new(JenkinsCore::new(server.url()))
    }

    #[tokio::test]
    async fn test_search_with_one_item() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/items/list?name=fake&type=fake&start=0&limit=50",
            )
            .with_status(200)
            .with_body(r#"[{"name":"fake","displayName":"fake","type":"WorkflowJob","url":"job/fake/"}]"#)
            .create_async()
            .await;

        let result = client(&server).search("fake", "fake", 0, 50).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "fake");
    }

    #[tokio::test]
    async fn test_search_without_items() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/items/list?name=fake&type=fake&start=0&limit=50",
            )
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let result = client(&server).search("fake", "fake", 0, 50).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_build_simple_job() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/crumbIssuer/api/json")
            .with_status(200)
            .with_body(r#"{"crumbRequestField":"CrumbRequestField","crumb":"Crumb"}"#)
            .create_async()
            .await;
        let mock = server
            .mock("POST", "/job/fakeJob/build")
            .match_header("CrumbRequestField", "Crumb")
            .with_status(201)
            .create_async()
            .await;

        client(&server).build("fakeJob").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_build_with_server_error() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        server
            .mock("POST", "/job/fakeJob/build")
            .with_status(500)
            .create_async()
            .await;

        let err = client(&server).build("fakeJob").await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus(500)));
    }

    #[tokio::test]
    async fn test_build_with_params() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/job/fake/build")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .with_status(201)
            .create_async()
            .await;

        client(&server)
            .build_with_params(
                "fake",
                &[ParameterDefinition {
                    name: "name".to_string(),
                    value: Some("value".to_string()),
                    parameter_type: STRING_PARAMETER_DEFINITION.to_string(),
                    ..ParameterDefinition::default()
                }],
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_build_last() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/fake/lastBuild/api/json")
            .with_status(200)
            .with_body(r#"{"displayName":"fake","number":3,"result":"SUCCESS"}"#)
            .create_async()
            .await;

        let build = client(&server).get_build("fake", -1).await.unwrap();
        assert_eq!(build.display_name, "fake");
        assert_eq!(build.result.as_deref(), Some("SUCCESS"));
    }

    #[tokio::test]
    async fn test_get_build_by_number() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/fake/2/api/json")
            .with_status(200)
            .with_body(r#"{"number":2,"building":true}"#)
            .create_async()
            .await;

        let build = client(&server).get_build("fake", 2).await.unwrap();
        assert_eq!(build.number, 2);
        assert!(build.building);
    }

    #[tokio::test]
    async fn test_stop_job() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let numbered = server
            .mock("POST", "/job/fakeJob/1/stop")
            .with_status(200)
            .create_async()
            .await;
        let last = server
            .mock("POST", "/job/fakeJob/lastBuild/stop")
            .with_status(200)
            .create_async()
            .await;

        let client = client(&server);
        client.stop_job("fakeJob", 1).await.unwrap();
        client.stop_job("fakeJob", -1).await.unwrap();
        numbered.assert_async().await;
        last.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_job() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/fake/api/json")
            .with_status(200)
            .with_body(r#"{"name":"fake"}"#)
            .create_async()
            .await;

        let job = client(&server).get_job("fake").await.unwrap();
        assert_eq!(job.name, "fake");
    }

    #[tokio::test]
    async fn test_get_history() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/fakeJob/api/json")
            .with_status(200)
            .with_body(
                r#"{"name":"fakeJob","builds":[{"number":1,"url":"u1"},{"number":2,"url":"u2"}]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/job/fakeJob/1/api/json")
            .with_status(200)
            .with_body(r#"{"number":1}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/job/fakeJob/2/api/json")
            .with_status(200)
            .with_body(r#"{"number":2}"#)
            .create_async()
            .await;

        let builds = client(&server).get_history("fakeJob").await.unwrap();
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[1].number, 2);
    }

    #[tokio::test]
    async fn test_log_with_build_number() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/fakeJob/1/logText/progressiveText?start=0")
            .with_status(200)
            .with_header("X-More-Data", "true")
            .with_header("X-Text-Size", "8")
            .with_body("fake log")
            .create_async()
            .await;

        let log = client(&server).log("fakeJob", 1, 0).await.unwrap();
        assert_eq!(log.text, "fake log");
        assert!(log.has_more);
        assert_eq!(log.next_start, 8);
    }

    #[tokio::test]
    async fn test_log_of_last_build() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/job/fakeJob/lastBuild/logText/progressiveText?start=0",
            )
            .with_status(200)
            .with_body("fake log")
            .create_async()
            .await;

        let log = client(&server).log("fakeJob", -1, 0).await.unwrap();
        assert_eq!(log.text, "fake log");
        assert!(!log.has_more);
    }

    #[tokio::test]
    async fn test_create_job() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/view/all/createItem")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .with_status(200)
            .create_async()
            .await;

        client(&server)
            .create(CreateJobPayload {
                name: "jobName".to_string(),
                mode: "jobType".to_string(),
                from: String::new(),
            })
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_job_by_copy() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/view/all/createItem")
            .match_body(mockito::Matcher::Regex("from=another-one".to_string()))
            .with_status(200)
            .create_async()
            .await;

        client(&server)
            .create(CreateJobPayload {
                name: "jobName".to_string(),
                mode: "copy".to_string(),
                from: "another-one".to_string(),
            })
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_job() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/job/fakeJob/doDelete")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .with_status(200)
            .create_async()
            .await;

        client(&server).delete("fakeJob").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_disable_and_enable_job() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let disable = server
            .mock("POST", "/job/fakeJob/disable")
            .with_status(302)
            .create_async()
            .await;
        let enable = server
            .mock("POST", "/job/fakeJob/enable")
            .with_status(200)
            .create_async()
            .await;

        let client = client(&server);
        client.disable_job("fakeJob").await.unwrap();
        client.enable_job("fakeJob").await.unwrap();
        disable.assert_async().await;
        enable.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_job_type_categories() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/view/all/itemCategories?depth=3")
            .with_status(200)
            .with_body(
                r#"{"categories":[{"id":"standalone-projects","name":"Standalone","items":[{"class":"org.jenkinsci.plugins.workflow.job.WorkflowJob","displayName":"Pipeline","order":2}]}]}"#,
            )
            .create_async()
            .await;

        let categories = client(&server).get_job_type_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].items[0].display_name, "Pipeline");
    }

    #[tokio::test]
    async fn test_get_pipeline() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/test/restFul")
            .with_status(200)
            .with_body(r#"{"name":"test","script":"script"}"#)
            .create_async()
            .await;

        let pipeline = client(&server).get_pipeline("test").await.unwrap();
        assert_eq!(pipeline.script, "script");
    }

    #[tokio::test]
    async fn test_update_pipeline() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/job/test/restFul/update")
            .match_body("script=echo+hi")
            .with_status(200)
            .create_async()
            .await;

        client(&server)
            .update_pipeline("test", "echo hi")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_job_input_actions() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/jobName/1/wfapi/pendingInputActions")
            .with_status(200)
            .with_body(
                r#"[{"id":"Eff7","message":"message","proceedText":"Proceed","abortUrl":"/job/jobName/1/input/Eff7/abort"}]"#,
            )
            .create_async()
            .await;

        let actions = client(&server)
            .get_job_input_actions("jobName", 1)
            .await
            .unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].message, "message");
    }

    #[tokio::test]
    async fn test_job_input_submit() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock(
                "POST",
                "/job/jobName/1/input/Eff7d5dba32b4da32d9a67a519434d3f/proceed",
            )
            .with_status(200)
            .create_async()
            .await;

        client(&server)
            .job_input_submit("jobName", "Eff7d5dba32b4da32d9a67a519434d3f", 1, true, &[])
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_job_input_abort() {
        let mut server = mockito::Server::new_async().await;
        disabled_crumb(&mut server).await;
        let mock = server
            .mock("POST", "/job/jobName/1/input/Eff7/abort")
            .with_status(200)
            .create_async()
            .await;

        client(&server)
            .job_input_submit("jobName", "Eff7", 1, false, &[("a", "b")])
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_parameter_definition_decoding() {
        let string_param: ParameterDefinition = serde_json::from_str(
            r#"{
                "_class": "hudson.model.StringParameterDefinition",
                "defaultParameterValue": {"name": "param1", "value": "xyz"},
                "description": "string param",
                "name": "param1",
                "type": "StringParameterDefinition"
            }"#,
        )
        .unwrap();
        assert_eq!(string_param.name, "param1");
        assert_eq!(string_param.parameter_type, STRING_PARAMETER_DEFINITION);
        assert_eq!(
            string_param.default_parameter_value.unwrap().value,
            serde_json::json!("xyz")
        );

        let choice_param: ParameterDefinition = serde_json::from_str(
            r#"{
                "defaultParameterValue": {"name": "choice", "value": "a"},
                "description": "choice description",
                "name": "choice",
                "type": "ChoiceParameterDefinition",
                "choices": ["a", "b", "c", "d"]
            }"#,
        )
        .unwrap();
        assert_eq!(choice_param.choices.unwrap().len(), 4);

        let run_param: ParameterDefinition = serde_json::from_str(
            r#"{
                "defaultParameterValue": {"name": "rpd", "value": true},
                "description": "desc",
                "name": "rpd",
                "projectName": "project",
                "filter": "stable",
                "type": "RunParameterDefinition"
            }"#,
        )
        .unwrap();
        assert_eq!(run_param.project_name.as_deref(), Some("project"));
        assert_eq!(
            run_param.default_parameter_value.unwrap().value,
            serde_json::json!(true)
        );
    }
}
