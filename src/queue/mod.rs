//
//  jenkins-client
//  queue/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Build Queue
//!
//! [`QueueClient`] inspects the build queue and cancels waiting items.

use serde::Deserialize;

use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// The build queue as returned by `/queue/api/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobQueue {
    #[serde(rename = "_class")]
    pub class: String,
    pub items: Vec<QueueItem>,
}

/// The task a queue item would run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueueTask {
    pub name: String,
    pub url: String,
    pub color: String,
}

/// One waiting item in the build queue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueItem {
    pub blocked: bool,
    pub buildable: bool,
    pub id: i64,
    pub in_queue_since: i64,
    pub params: String,
    pub stuck: bool,
    pub url: String,
    pub why: Option<String>,
    pub buildable_start_milliseconds: i64,
    pub pending: bool,
    pub task: Option<QueueTask>,
}

/// Client for the Jenkins build queue.
#[derive(Debug, Clone)]
pub struct QueueClient {
    core: JenkinsCore,
}

impl QueueClient {
    /// Creates a queue client over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Returns the current build queue.
    pub async fn get(&self) -> Result<JobQueue, ApiError> {
        RequestBuilder::new(&self.core, "/queue/api/json")
            .send()
            .await?
            .as_object()
    }

    /// Cancels a queue item by id. The server answers 204 on success.
    pub async fn cancel(&self, id: i64) -> Result<(), ApiError> {
        let api = format!("/queue/cancelItem?id={id}");
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .accept_status_code(204)
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_queue() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/queue/api/json")
            .with_status(200)
            .with_body(
                r#"{
                    "_class": "hudson.model.Queue",
                    "items": [{
                        "blocked": false,
                        "buildable": true,
                        "id": 62,
                        "inQueueSince": 1566703541634,
                        "params": "",
                        "stuck": true,
                        "url": "queue/item/62/",
                        "why": "Waiting for next available executor",
                        "buildableStartMilliseconds": 1566703541634,
                        "pending": false,
                        "task": {"name": "fake", "url": "job/fake/", "color": "notbuilt"}
                    }]
                }"#,
            )
            .create_async()
            .await;

        let queue = QueueClient::new(JenkinsCore::new(server.url()))
            .get()
            .await
            .unwrap();
        assert_eq!(queue.items.len(), 1);
        assert_eq!(queue.items[0].id, 62);
        assert!(queue.items[0].stuck);
        assert_eq!(queue.items[0].task.as_ref().unwrap().name, "fake");
    }

    #[tokio::test]
    async fn test_cancel() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/crumbIssuer/api/json")
            .with_status(404)
            .create_async()
            .await;
        let mock = server
            .mock("POST", "/queue/cancelItem?id=1")
            .with_status(204)
            .create_async()
            .await;

        QueueClient::new(JenkinsCore::new(server.url()))
            .cancel(1)
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
