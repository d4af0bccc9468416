//
//  jenkins-client
//  job/blueocean.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # BlueOcean Pipelines
//!
//! [`BlueOceanClient`] drives pipelines through the BlueOcean REST API under
//! `/blue/rest/organizations/{org}/...`. Unlike the classic API, BlueOcean
//! error responses carry a structured `{message, code, errors[]}` body which
//! this client parses into [`ApiError::Server`].

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use super::path::pipeline_path;
use super::time::JenkinsTime;
use super::ParameterDefinition;
use crate::core::{classify, ApiError, ApiResponse, JenkinsCore, RequestBuilder};

/// Characters escaped in a branch path segment, mirroring URL path-segment
/// escaping (notably `/` itself).
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A name/value pair passed to a parameterized pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// Options for triggering a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct BuildOption {
    /// Pipeline name segments, outermost folder first.
    pub pipelines: Vec<String>,
    /// Parameters passed to the run.
    pub parameters: Vec<Parameter>,
    /// Branch of a multi-branch pipeline; empty for plain pipelines.
    pub branch: String,
}

/// Options for fetching one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct GetBuildOption {
    pub pipelines: Vec<String>,
    pub run_id: String,
    pub branch: String,
}

/// Options for fetching the node graph of a run.
#[derive(Debug, Clone, Default)]
pub struct GetNodesOption {
    pub pipelines: Vec<String>,
    pub branch: String,
    pub run_id: String,
    /// Maximum number of nodes returned; the server default is used when 0.
    pub limit: i32,
}

/// Options for replaying a finished run.
#[derive(Debug, Clone, Default)]
pub struct ReplayOption {
    pub pipelines: Vec<String>,
    pub branch: String,
    pub run_id: String,
}

/// A pipeline run as returned by the `runs` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineBuild {
    pub cause_of_blockage: Option<String>,
    pub description: Option<String>,
    pub duration_in_millis: Option<i64>,
    pub estimated_duration_in_millis: Option<i64>,
    pub en_queue_time: JenkinsTime,
    pub end_time: JenkinsTime,
    pub start_time: JenkinsTime,
    pub id: String,
    pub name: Option<String>,
    pub organization: String,
    pub pipeline: String,
    pub replayable: bool,
    pub result: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub run_type: Option<String>,
    pub queue_id: Option<String>,
    pub expected_build_number: Option<i32>,
    pub commit_id: Option<String>,
    #[serde(rename = "commitUrl")]
    pub commit_url: Option<String>,
}

/// An edge of the run flow graph.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeEdge {
    pub id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
}

/// Input step data attached to a paused node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeInput {
    pub id: String,
    pub message: String,
    pub ok: String,
    pub parameters: Vec<ParameterDefinition>,
    pub submitter: Option<String>,
}

/// A node of the run flow graph (stage or parallel branch).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueOceanNode {
    pub display_description: Option<String>,
    pub display_name: String,
    pub duration_in_millis: i64,
    pub id: String,
    pub input: Option<NodeInput>,
    pub result: Option<String>,
    pub start_time: JenkinsTime,
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    pub cause_of_blockage: Option<String>,
    pub edges: Vec<NodeEdge>,
    pub first_parent: Option<String>,
    pub restartable: bool,
}

/// A nested error inside a BlueOcean error body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlueOceanErrorDetail {
    pub message: String,
    pub code: String,
    pub field: String,
}

/// The structured error body BlueOcean endpoints return on failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlueOceanError {
    pub message: String,
    pub code: i64,
    pub errors: Vec<BlueOceanErrorDetail>,
}

/// Client for the BlueOcean pipeline API, scoped to one organization
/// (usually `jenkins`).
#[derive(Debug, Clone)]
pub struct BlueOceanClient {
    core: JenkinsCore,
    organization: String,
}

impl BlueOceanClient {
    /// Creates a BlueOcean client for the given organization.
    pub fn new(core: JenkinsCore, organization: impl Into<String>) -> Self {
        Self {
            core,
            organization: organization.into(),
        }
    }

    /// Searches pipelines by name, paginated, folders excluded.
    pub async fn search(
        &self,
        name: &str,
        start: i32,
        limit: i32,
    ) -> Result<Vec<super::JenkinsItem>, ApiError> {
        let api = format!(
            "/blue/rest/search/?q=pipeline:*{}*;type:pipeline;organization:{};excludedFromFlattening=jenkins.branch.MultiBranchProject,com.cloudbees.hudson.plugins.folder.AbstractFolder&filter=no-folders&start={}&limit={}",
            name, self.organization, start, limit
        );
        self.parse(RequestBuilder::new(&self.core, api).send_unchecked().await?)
    }

    /// Triggers a run, optionally on one branch of a multi-branch pipeline
    /// and with parameters (sent as a JSON `{"parameters": [...]}` body).
    pub async fn build(&self, option: &BuildOption) -> Result<PipelineBuild, ApiError> {
        let api = self.build_api(option);
        let mut builder = RequestBuilder::new(&self.core, api)
            .with_post_method()
            .add_header("Content-Type", "application/json");
        if !option.parameters.is_empty() {
            let payload =
                serde_json::to_vec(&serde_json::json!({"parameters": option.parameters}))?;
            builder = builder.with_payload(payload);
        }
        self.parse(builder.send_unchecked().await?)
    }

    /// Fetches one run.
    pub async fn get_build(&self, option: &GetBuildOption) -> Result<PipelineBuild, ApiError> {
        let api = self.get_build_api(option);
        self.parse(
            RequestBuilder::new(&self.core, api)
                .add_header("Content-Type", "application/json")
                .send_unchecked()
                .await?,
        )
    }

    /// Fetches the flow-graph nodes of a run.
    pub async fn get_nodes(&self, option: &GetNodesOption) -> Result<Vec<BlueOceanNode>, ApiError> {
        let mut api = format!(
            "{}/runs/{}/nodes/",
            self.base_api(&option.pipelines, &option.branch),
            option.run_id
        );
        if option.limit > 0 {
            api.push_str(&format!("?limit={}", option.limit));
        }
        self.parse(RequestBuilder::new(&self.core, api).send_unchecked().await?)
    }

    /// Replays a finished run with the same inputs, returning the new run.
    pub async fn replay(&self, option: &ReplayOption) -> Result<PipelineBuild, ApiError> {
        let api = format!(
            "{}/runs/{}/replay/",
            self.base_api(&option.pipelines, &option.branch),
            option.run_id
        );
        self.parse(
            RequestBuilder::new(&self.core, api)
                .with_post_method()
                .add_header("Content-Type", "application/json")
                .send_unchecked()
                .await?,
        )
    }

    fn base_api(&self, pipelines: &[String], branch: &str) -> String {
        let mut api = format!(
            "/blue/rest/organizations/{}/{}",
            self.organization,
            pipeline_path(pipelines)
        );
        if !branch.is_empty() {
            api.push_str(&format!(
                "/branches/{}",
                utf8_percent_encode(branch, PATH_SEGMENT)
            ));
        }
        api
    }

    fn build_api(&self, option: &BuildOption) -> String {
        format!("{}/runs/", self.base_api(&option.pipelines, &option.branch))
    }

    fn get_build_api(&self, option: &GetBuildOption) -> String {
        format!(
            "{}/runs/{}/",
            self.base_api(&option.pipelines, &option.branch),
            option.run_id
        )
    }

    /// Decodes an accepted response, or turns the retained error body into
    /// an [`ApiError::Server`] when it carries a BlueOcean error payload.
    fn parse<T: serde::de::DeserializeOwned>(&self, response: ApiResponse) -> Result<T, ApiError> {
        if response.status == 200 {
            return response.as_object();
        }
        match serde_json::from_slice::<BlueOceanError>(&response.data) {
            Ok(body) if !body.message.is_empty() => Err(ApiError::Server {
                code: body.code,
                message: body.message,
            }),
            _ => Err(classify(response.status, &response.data)),
        }
    }
}
