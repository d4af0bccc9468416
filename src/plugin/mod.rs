//
//  jenkins-client
//  plugin/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Plugin Manager
//!
//! [`PluginManager`] drives the Jenkins plugin manager: listing installed
//! plugins, installing by name, uninstalling, uploading an `.hpi` archive,
//! triggering an update check, and pointing the update center at a mirror
//! or a different site.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// The installed-plugin list as returned by
/// `/pluginManager/api/json?depth=1`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstalledPluginList {
    pub plugins: Vec<InstalledPlugin>,
}

/// One installed plugin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstalledPlugin {
    pub active: bool,
    pub enable: bool,
    pub has_update: bool,
    pub short_name: String,
    pub version: String,
}

impl InstalledPluginList {
    /// Looks up an installed plugin by its short name.
    pub fn find(&self, short_name: &str) -> Option<&InstalledPlugin> {
        self.plugins.iter().find(|p| p.short_name == short_name)
    }
}

/// Client for the Jenkins plugin manager endpoints.
#[derive(Debug, Clone)]
pub struct PluginManager {
    core: JenkinsCore,
}

impl PluginManager {
    /// Creates a plugin manager over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Lists the installed plugins.
    pub async fn get_plugins(&self, depth: u32) -> Result<InstalledPluginList, ApiError> {
        let api = format!("/pluginManager/api/json?depth={depth}");
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Installs plugins by short name. Jenkins resolves the latest
    /// compatible versions and pulls in dependencies.
    pub async fn install(&self, names: &[&str]) -> Result<(), ApiError> {
        if names.is_empty() {
            return Err(ApiError::InvalidArgument(
                "no plugins given to install".to_string(),
            ));
        }
        let query: Vec<String> = names.iter().map(|n| format!("plugin.{n}=")).collect();
        let api = format!("/pluginManager/install?{}", query.join("&"));
        RequestBuilder::new(&self.core, api)
            .as_post_form_request()
            .send()
            .await?;
        Ok(())
    }

    /// Uninstalls a plugin by short name.
    pub async fn uninstall(&self, name: &str) -> Result<(), ApiError> {
        let api = format!("/pluginManager/plugin/{name}/doUninstall");
        RequestBuilder::new(&self.core, api)
            .as_post_form_request()
            .send()
            .await?;
        Ok(())
    }

    /// Uploads a plugin archive (`.hpi`/`.jpi`). Jenkins redirects back to
    /// the plugin manager on success, so 302 is accepted.
    pub async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<(), ApiError> {
        let part = Part::bytes(content).file_name(file_name.to_string());
        let form = Form::new().part("@name", part);

        let (status, data) = self
            .core
            .post_multipart("/pluginManager/uploadPlugin", form)
            .await?;
        if status == 200 || status == 302 {
            Ok(())
        } else {
            Err(self.core.error_handle(status, &data))
        }
    }

    /// Asks the update center to refresh its plugin metadata.
    pub async fn check_updates(&self) -> Result<(), ApiError> {
        RequestBuilder::new(&self.core, "/pluginManager/checkUpdatesServer")
            .as_post_form_request()
            .send()
            .await?;
        Ok(())
    }

    /// Enables or disables the update-center mirror.
    pub async fn set_mirror(&self, enable: bool) -> Result<(), ApiError> {
        let api = if enable {
            "/update-center-mirror/use"
        } else {
            "/update-center-mirror/remove"
        };
        RequestBuilder::new(&self.core, api)
            .as_post_form_request()
            .send()
            .await?;
        Ok(())
    }

    /// Points the update center at a different site URL.
    pub async fn change_update_center_site(&self, site: &str) -> Result<(), ApiError> {
        RequestBuilder::new(&self.core, "/pluginManager/siteConfigure")
            .with_post_method()
            .with_form_values(&[("site", site)])
            .send()
            .await?;
        Ok(())
    }
}
