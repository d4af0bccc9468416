//
//  jenkins-client
//  k8s/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Kubernetes Pod Templates
//!
//! [`JenkinsConfig`] edits a configuration-as-code YAML document in place:
//! adding, replacing and removing Kubernetes agent pod templates under
//! `jenkins.clouds[0].kubernetes.templates`. The document is manipulated as
//! a YAML value tree so unrelated configuration survives untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::core::ApiError;

/// A simplified pod template description, close to a Kubernetes
/// `PodTemplate` resource. Per-container Jenkins settings that Kubernetes
/// has no field for travel as annotations of the form
/// `container.{name}.resourceLimitCpu`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodTemplateSpec {
    pub name: String,
    pub namespace: String,
    pub annotations: BTreeMap<String, String>,
    pub containers: Vec<PodContainerSpec>,
    pub volumes: Vec<PodVolumeSpec>,
}

/// One container of a [`PodTemplateSpec`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub args: Vec<String>,
    pub volume_mounts: Vec<VolumeMountSpec>,
}

/// A mount point of a container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolumeMountSpec {
    pub name: String,
    pub mount_path: String,
}

/// A pod volume; only host-path volumes map onto Jenkins pod templates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodVolumeSpec {
    pub name: String,
    pub host_path: Option<String>,
}

/// A Kubernetes cloud entry as Jenkins configures it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KubernetesCloud {
    pub name: String,
    pub server_url: String,
    pub skip_tls_verify: bool,
    pub namespace: String,
    pub credentials_id: String,
    pub jenkins_url: String,
    pub jenkins_tunnel: String,
    pub container_cap_str: String,
    pub connect_timeout: String,
    pub read_timeout: String,
    pub templates: Vec<JenkinsPodTemplate>,
}

/// A pod template as Jenkins stores it in the cloud configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JenkinsPodTemplate {
    pub name: String,
    pub namespace: String,
    pub label: String,
    pub node_usage_mode: String,
    pub idle_minutes: i32,
    pub containers: Vec<Container>,
    pub volumes: Vec<PodVolume>,
}

/// One container of a Jenkins pod template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub command: String,
    pub args: String,
    pub tty_enabled: bool,
    pub privileged: bool,
    pub resource_request_cpu: String,
    pub resource_limit_cpu: String,
    pub resource_request_memory: String,
    pub resource_limit_memory: String,
    pub workspace_volume: WorkspaceVolume,
    /// Extra YAML merged into the generated pod, verbatim.
    pub yaml: String,
}

/// A pod-template volume wrapper; Jenkins nests the concrete volume type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PodVolume {
    pub host_path_volume: HostPathVolume,
}

/// A host-path volume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HostPathVolume {
    pub host_path: String,
    pub mount_path: String,
}

/// The workspace volume of a container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceVolume {
    pub empty_dir_workspace_volume: EmptyDirWorkspaceVolume,
}

/// An empty-dir workspace volume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmptyDirWorkspaceVolume {
    pub memory: bool,
}

impl JenkinsPodTemplate {
    /// Converts a simplified pod template into the shape Jenkins stores.
    /// The label defaults to the template name and the node usage mode to
    /// `EXCLUSIVE`; resource settings come from the per-container
    /// annotations.
    pub fn from_pod_template(pod_template: &PodTemplateSpec) -> Self {
        let annotation = |key: String| {
            pod_template
                .annotations
                .get(&key)
                .cloned()
                .unwrap_or_default()
        };

        let containers: Vec<Container> = pod_template
            .containers
            .iter()
            .map(|container| {
                let name = &container.name;
                Container {
                    name: name.clone(),
                    image: container.image.clone(),
                    command: container.command.join(" "),
                    args: container.args.join(" "),
                    tty_enabled: true,
                    resource_limit_cpu: annotation(format!("container.{name}.resourceLimitCpu")),
                    resource_limit_memory: annotation(format!(
                        "container.{name}.resourceLimitMemory"
                    )),
                    resource_request_cpu: annotation(format!(
                        "container.{name}.resourceRequestCpu"
                    )),
                    resource_request_memory: annotation(format!(
                        "container.{name}.resourceRequestMemory"
                    )),
                    yaml: annotation(format!("container.{name}.yaml")),
                    ..Container::default()
                }
            })
            .collect();

        // Only the first container's mounts become template-level volumes,
        // and only when they resolve to a host-path volume.
        let mut volumes = Vec::new();
        if let Some(container) = pod_template.containers.first() {
            for mount in &container.volume_mounts {
                let matched = pod_template
                    .volumes
                    .iter()
                    .find(|vol| vol.name == mount.name)
                    .and_then(|vol| vol.host_path.as_ref());
                if let Some(host_path) = matched {
                    volumes.push(PodVolume {
                        host_path_volume: HostPathVolume {
                            host_path: host_path.clone(),
                            mount_path: mount.mount_path.clone(),
                        },
                    });
                }
            }
        }

        Self {
            name: pod_template.name.clone(),
            namespace: pod_template.namespace.clone(),
            label: pod_template.name.clone(),
            node_usage_mode: "EXCLUSIVE".to_string(),
            containers,
            volumes,
            ..Self::default()
        }
    }
}

/// A configuration-as-code document, edited as a YAML value tree.
#[derive(Debug, Clone, Default)]
pub struct JenkinsConfig {
    config: String,
}

impl JenkinsConfig {
    /// Wraps an existing YAML document.
    pub fn new(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Returns the current document text.
    pub fn as_str(&self) -> &str {
        &self.config
    }

    /// Appends a pod template to `jenkins.clouds[0].kubernetes.templates`.
    pub fn add_pod_template(&mut self, template: &JenkinsPodTemplate) -> Result<(), ApiError> {
        self.edit_templates(|templates| {
            templates.push(serde_yaml::to_value(template)?);
            Ok(())
        })
    }

    /// Removes the pod template with the given name. Removing a name that
    /// is not present leaves the document unchanged.
    pub fn remove_pod_template(&mut self, name: &str) -> Result<(), ApiError> {
        self.edit_templates(|templates| {
            templates.retain(|template| {
                template
                    .get("name")
                    .and_then(Value::as_str)
                    .map(|n| n != name)
                    .unwrap_or(true)
            });
            Ok(())
        })
    }

    /// Replaces the pod template with the same name, or appends it when no
    /// template with that name exists yet.
    pub fn replace_or_add_pod_template(
        &mut self,
        template: &JenkinsPodTemplate,
    ) -> Result<(), ApiError> {
        self.edit_templates(|templates| {
            let value = serde_yaml::to_value(template)?;
            let existing = templates.iter_mut().find(|candidate| {
                candidate.get("name").and_then(Value::as_str) == Some(template.name.as_str())
            });
            match existing {
                Some(slot) => *slot = value,
                None => templates.push(value),
            }
            Ok(())
        })
    }

    /// Parses the typed pod templates out of the document.
    pub fn pod_templates(&self) -> Result<Vec<JenkinsPodTemplate>, ApiError> {
        let mut document: Value = serde_yaml::from_str(&self.config)?;
        let templates = Self::templates_of(&mut document)?;
        templates
            .iter()
            .map(|template| serde_yaml::from_value(template.clone()).map_err(ApiError::from))
            .collect()
    }

    fn edit_templates(
        &mut self,
        edit: impl FnOnce(&mut Vec<Value>) -> Result<(), ApiError>,
    ) -> Result<(), ApiError> {
        let mut document: Value = serde_yaml::from_str(&self.config)?;
        edit(Self::templates_of(&mut document)?)?;
        self.config = serde_yaml::to_string(&document)?;
        Ok(())
    }

    /// Navigates to `jenkins.clouds[0].kubernetes.templates`, failing with
    /// a descriptive error when any intermediate level is missing.
    fn templates_of(document: &mut Value) -> Result<&mut Vec<Value>, ApiError> {
        let missing =
            || ApiError::InvalidConfig("no jenkins.clouds[0].kubernetes.templates".to_string());

        document
            .get_mut("jenkins")
            .and_then(|jenkins| jenkins.get_mut("clouds"))
            .and_then(|clouds| clouds.get_mut(0))
            .and_then(|cloud| cloud.get_mut("kubernetes"))
            .and_then(|kubernetes| kubernetes.get_mut("templates"))
            .and_then(Value::as_sequence_mut)
            .ok_or_else(missing)
    }
}
