//
//  jenkins-client
//  computer/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Agents (Computers)
//!
//! [`ComputerClient`] manages Jenkins build agents: listing, creating JNLP
//! agents, launching, reading agent logs, and extracting the JNLP secret an
//! agent needs to connect.

use reqwest::Method;
use serde::Deserialize;

use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// Node type of a plain static agent.
const DUMB_SLAVE_TYPE: &str = "hudson.slaves.DumbSlave";

/// The agent list as returned by `/computer/api/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputerList {
    pub busy_executors: i32,
    pub computer: Vec<Computer>,
    pub total_executors: i32,
}

/// One agent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Computer {
    pub description: String,
    pub display_name: String,
    pub idle: bool,
    pub jnlp_agent: bool,
    pub launch_supported: bool,
    pub manual_launch_allowed: bool,
    pub num_executors: i32,
    pub offline: bool,
    pub offline_cause_reason: String,
    pub temporarily_offline: bool,
}

/// Client for the Jenkins agent endpoints.
#[derive(Debug, Clone)]
pub struct ComputerClient {
    core: JenkinsCore,
}

impl ComputerClient {
    /// Creates a computer client over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Lists all agents.
    pub async fn list(&self) -> Result<ComputerList, ApiError> {
        RequestBuilder::new(&self.core, "/computer/api/json")
            .send()
            .await?
            .as_object()
    }

    /// Asks the master to launch an agent.
    pub async fn launch(&self, name: &str) -> Result<(), ApiError> {
        let api = format!("/computer/{name}/launchSlaveAgent");
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Returns the connection log of an agent.
    pub async fn get_log(&self, name: &str) -> Result<String, ApiError> {
        let api = format!("/computer/{name}/logText/progressiveText");
        let response = RequestBuilder::new(&self.core, api).send().await?;
        Ok(response.text())
    }

    /// Removes an agent from Jenkins.
    pub async fn delete(&self, name: &str) -> Result<(), ApiError> {
        let api = format!("/computer/{name}/doDelete");
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Creates a JNLP agent with default settings.
    pub async fn create(&self, name: &str) -> Result<(), ApiError> {
        let json = serde_json::json!({
            "name": name,
            "nodeDescription": "",
            "numExecutors": "1",
            "remoteFS": "/var/tmp/jenkins",
            "labelString": "",
            "mode": "NORMAL",
            "": ["hudson.slaves.JNLPLauncher", "hudson.slaves.RetentionStrategy$Always"],
            "launcher": {
                "stapler-class": "hudson.slaves.JNLPLauncher",
                "$class": "hudson.slaves.JNLPLauncher",
                "workDirSettings": {
                    "disabled": false,
                    "workDirPath": "",
                    "internalDir": "remoting",
                    "failIfWorkDirIsMissing": false
                },
                "tunnel": "",
                "vmargs": ""
            },
            "retentionStrategy": {
                "stapler-class": "hudson.slaves.RetentionStrategy$Always",
                "$class": "hudson.slaves.RetentionStrategy$Always"
            },
            "nodeProperties": {"stapler-class-bag": "true"},
            "type": DUMB_SLAVE_TYPE,
        })
        .to_string();

        RequestBuilder::new(&self.core, "/computer/doCreateItem")
            .with_post_method()
            .with_form_values(&[("name", name), ("type", DUMB_SLAVE_TYPE), ("json", &json)])
            .send()
            .await?;
        Ok(())
    }

    /// Extracts the JNLP secret of an agent from its `slave-agent.jnlp`
    /// document.
    pub async fn get_secret(&self, name: &str) -> Result<String, ApiError> {
        let api = format!("/computer/{name}/slave-agent.jnlp");
        let (status, data) = self.core.request(Method::GET, &api, &[], None).await?;
        if status != 200 {
            return Err(self.core.error_handle(status, &data));
        }

        let body = String::from_utf8_lossy(&data);
        let pattern = regex::Regex::new(r"<application-desc><argument>([a-z0-9]*)")
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;
        pattern
            .captures(&body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                ApiError::InvalidConfig(format!("no agent secret found for {name}"))
            })
    }
}
