//
//  jenkins-client
//  pipeline/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Structured Jenkinsfile
//!
//! Typed model of the JSON form of a declarative Jenkinsfile, as produced
//! by the Pipeline Model Converter (see
//! [`SystemClient::to_json`](crate::core::SystemClient::to_json)). The model
//! supports step and argument lookup plus [`find_git`] extraction of git
//! repositories referenced by the pipeline.

use serde::{Deserialize, Serialize};

use crate::core::ApiError;

/// A git repository referenced by a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitRepo {
    pub url: String,
    pub branch: String,
}

/// A structured Jenkinsfile in its JSON form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Jenkinsfile {
    pub pipeline: Pipeline,
}

/// The pipeline block of a Jenkinsfile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

/// One stage; its steps live in parallel branches (a single implicit
/// branch named `default` for non-parallel stages).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    pub name: String,
    pub branches: Vec<StageBranch>,
}

/// One branch of a stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageBranch {
    pub name: String,
    pub steps: Vec<Step>,
}

/// One step invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub name: String,
    pub arguments: Vec<StepArgument>,
}

/// A named step argument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepArgument {
    pub key: String,
    pub value: StepArgumentValue,
}

/// The value of a step argument. Non-literal values hold the source text
/// of a Groovy expression.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepArgumentValue {
    pub is_literal: bool,
    pub value: serde_json::Value,
}

impl Jenkinsfile {
    /// Parses the JSON form of a Jenkinsfile.
    pub fn from_json(jenkinsfile: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(jenkinsfile)?)
    }
}

impl Stage {
    /// Finds the first step with the given name across all branches.
    pub fn get_step(&self, name: &str) -> Option<&Step> {
        self.branches
            .iter()
            .flat_map(|branch| branch.steps.iter())
            .find(|step| step.name == name)
    }
}

impl Step {
    /// Finds an argument by key.
    pub fn get_argument(&self, key: &str) -> Option<&StepArgument> {
        self.arguments.iter().find(|arg| arg.key == key)
    }
}

impl StepArgument {
    /// Returns the argument value as a string, when it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.value.value.as_str()
    }
}

/// Extracts the git repositories from the JSON form of a Jenkinsfile: one
/// [`GitRepo`] per stage whose `git` step carries a `url` argument. A
/// missing `branch` argument leaves the branch empty.
pub fn find_git(jenkinsfile: &str) -> Result<Vec<GitRepo>, ApiError> {
    let parsed = Jenkinsfile::from_json(jenkinsfile)?;

    let mut repos = Vec::new();
    for stage in &parsed.pipeline.stages {
        let Some(step) = stage.get_step("git") else {
            continue;
        };
        let Some(url) = step.get_argument("url").and_then(StepArgument::as_str) else {
            continue;
        };
        let branch = step
            .get_argument("branch")
            .and_then(StepArgument::as_str)
            .unwrap_or_default();
        repos.push(GitRepo {
            url: url.to_string(),
            branch: branch.to_string(),
        });
    }
    Ok(repos)
}
