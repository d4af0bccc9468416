//
//  jenkins-client
//  artifact/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Build Artifacts
//!
//! [`ArtifactClient`] lists the artifacts of a build via the workflow API
//! and downloads individual artifact files as raw bytes.

use serde::Deserialize;

use crate::core::{ApiError, JenkinsCore, RequestBuilder};
use crate::job::job_path;

/// An artifact archived by a build.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Artifact {
    pub id: String,
    pub name: String,
    pub path: String,
    pub url: String,
    pub size: i64,
}

/// Client for listing and downloading build artifacts.
///
/// # Example
///
/// ```rust,no_run
/// use jenkins_client::core::JenkinsCore;
/// use jenkins_client::artifact::ArtifactClient;
///
/// # async fn example() -> Result<(), jenkins_client::core::ApiError> {
/// let client = ArtifactClient::new(JenkinsCore::new("https://jenkins.example.com"));
/// for artifact in client.list("my-pipeline", 1).await? {
///     println!("{} ({} bytes)", artifact.name, artifact.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactClient {
    core: JenkinsCore,
}

impl ArtifactClient {
    /// Creates an artifact client over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Lists the artifacts of a build; `build_id` below 1 selects the last
    /// build.
    pub async fn list(&self, job_name: &str, build_id: i32) -> Result<Vec<Artifact>, ApiError> {
        let path = job_path(job_name);
        let api = if build_id < 1 {
            format!("{path}/lastBuild/wfapi/artifacts")
        } else {
            format!("{path}/{build_id}/wfapi/artifacts")
        };
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Downloads one artifact of a pipeline build under a project folder.
    /// Pass a branch for multi-branch pipelines.
    ///
    /// # Errors
    ///
    /// A missing artifact yields [`ApiError::NotFound`] and no body.
    pub async fn get_artifact(
        &self,
        project_name: &str,
        pipeline_name: &str,
        branch: Option<&str>,
        build_id: i32,
        filename: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let api = match branch {
            Some(branch) => format!(
                "/job/{project_name}/job/{pipeline_name}/job/{branch}/{build_id}/artifact/{filename}"
            ),
            None => {
                format!("/job/{project_name}/job/{pipeline_name}/{build_id}/artifact/{filename}")
            }
        };
        let response = RequestBuilder::new(&self.core, api).send().await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::Server) -> ArtifactClient {
        ArtifactClient::new(JenkinsCore::new(server.url()))
    }

    #[tokio::test]
    async fn test_list_one_artifact() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/p/1/wfapi/artifacts")
            .with_status(200)
            .with_body(
                r#"[{"id":"n1","name":"a.log","path":"a.log","url":"/job/p/1/artifact/a.log","size":0}]"#,
            )
            .create_async()
            .await;

        let artifacts = client(&server).list("p", 1).await.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "a.log");
        assert_eq!(artifacts[0].size, 0);
    }

    #[tokio::test]
    async fn test_list_of_last_build() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/pipeline/lastBuild/wfapi/artifacts")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let artifacts = client(&server).list("pipeline", 0).await.unwrap();
        assert!(artifacts.is_empty());
    }

    #[tokio::test]
    async fn test_get_artifact() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/project/job/pipeline/1/artifact/a.log")
            .with_status(200)
            .with_body("the is test file")
            .create_async()
            .await;

        let data = client(&server)
            .get_artifact("project", "pipeline", None, 1, "a.log")
            .await
            .unwrap();
        assert_eq!(data, b"the is test file");
    }

    #[tokio::test]
    async fn test_get_artifact_with_branch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/project/job/pipeline/job/main/2/artifact/a.log")
            .with_status(200)
            .with_body("branch artifact")
            .create_async()
            .await;

        let data = client(&server)
            .get_artifact("project", "pipeline", Some("main"), 2, "a.log")
            .await
            .unwrap();
        assert_eq!(data, b"branch artifact");
    }

    #[tokio::test]
    async fn test_get_missing_artifact() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/job/project/job/pipeline/1/artifact/no.log")
            .with_status(404)
            .create_async()
            .await;

        let err = client(&server)
            .get_artifact("project", "pipeline", None, 1, "no.log")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
}
