//
//  jenkins-client
//  credential/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Credentials
//!
//! [`CredentialsManager`] manages credentials in the system store
//! (`/credentials/store/{store}/domain/_/...`) and in folder-scoped stores
//! (`/job/{folder}/credentials/store/folder/domain/_/...`).
//!
//! Typed constructors build the JSON payloads Jenkins expects, including the
//! `$class` / `stapler-class` pairs of the credential plugins.

use serde::{Deserialize, Serialize};

use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// Stapler class of an SSH private-key credential.
pub const SSH_CREDENTIAL_STAPLER_CLASS: &str =
    "com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey";

/// Stapler class of a directly entered SSH private key.
pub const DIRECT_SSH_CREDENTIAL_STAPLER_CLASS: &str =
    "com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey$DirectEntryPrivateKeySource";

/// Stapler class of a username/password credential.
pub const USERNAME_PASSWORD_CREDENTIAL_STAPLER_CLASS: &str =
    "com.cloudbees.plugins.credentials.impl.UsernamePasswordCredentialsImpl";

/// Stapler class of a secret-text credential.
pub const SECRET_TEXT_CREDENTIAL_STAPLER_CLASS: &str =
    "org.jenkinsci.plugins.plaincredentials.impl.StringCredentialsImpl";

/// Stapler class of a kubeconfig credential.
pub const KUBECONFIG_CREDENTIAL_STAPLER_CLASS: &str =
    "com.microsoft.jenkins.kubernetes.credentials.KubeconfigCredentials";

/// Stapler class of a directly entered kubeconfig.
pub const DIRECT_KUBECONFIG_CREDENTIAL_STAPLER_CLASS: &str =
    "com.microsoft.jenkins.kubernetes.credentials.KubeconfigCredentials$DirectEntryKubeconfigSource";

/// The global credential scope.
pub const GLOBAL_SCOPE: &str = "GLOBAL";

/// Common fields of every credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub description: String,
    #[serde(rename = "displayName", skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "fullName", skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    #[serde(rename = "typeName", skip_serializing_if = "String::is_empty")]
    pub type_name: String,
    pub id: String,
    #[serde(rename = "$class")]
    pub class: String,
    #[serde(rename = "stapler-class")]
    pub stapler_class: String,
    pub scope: String,
}

/// A username/password credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsernamePasswordCredential {
    #[serde(flatten)]
    pub credential: Credential,
    pub username: String,
    pub password: String,
}

impl UsernamePasswordCredential {
    /// Creates a global-scope username/password credential payload.
    pub fn new(id: &str, username: &str, password: &str) -> Self {
        Self {
            credential: Credential {
                scope: GLOBAL_SCOPE.to_string(),
                id: id.to_string(),
                class: USERNAME_PASSWORD_CREDENTIAL_STAPLER_CLASS.to_string(),
                stapler_class: USERNAME_PASSWORD_CREDENTIAL_STAPLER_CLASS.to_string(),
                ..Credential::default()
            },
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// A secret-text credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StringCredentials {
    #[serde(flatten)]
    pub credential: Credential,
    pub secret: String,
}

impl StringCredentials {
    /// Creates a global-scope secret-text credential payload.
    pub fn new(id: &str, secret: &str) -> Self {
        Self {
            credential: Credential {
                scope: GLOBAL_SCOPE.to_string(),
                id: id.to_string(),
                class: SECRET_TEXT_CREDENTIAL_STAPLER_CLASS.to_string(),
                stapler_class: SECRET_TEXT_CREDENTIAL_STAPLER_CLASS.to_string(),
                ..Credential::default()
            },
            secret: secret.to_string(),
        }
    }
}

/// The private key of an SSH credential, entered directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrivateKeySource {
    #[serde(rename = "stapler-class")]
    pub stapler_class: String,
    #[serde(rename = "privateKey")]
    pub private_key: String,
}

/// An SSH username-with-private-key credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SshCredential {
    #[serde(flatten)]
    pub credential: Credential,
    pub username: String,
    pub passphrase: String,
    #[serde(rename = "privateKeySource")]
    pub key_source: PrivateKeySource,
}

impl SshCredential {
    /// Creates a global-scope SSH credential payload with a directly
    /// entered private key.
    pub fn new(id: &str, username: &str, passphrase: &str, private_key: &str) -> Self {
        Self {
            credential: Credential {
                scope: GLOBAL_SCOPE.to_string(),
                id: id.to_string(),
                class: SSH_CREDENTIAL_STAPLER_CLASS.to_string(),
                stapler_class: SSH_CREDENTIAL_STAPLER_CLASS.to_string(),
                ..Credential::default()
            },
            username: username.to_string(),
            passphrase: passphrase.to_string(),
            key_source: PrivateKeySource {
                stapler_class: DIRECT_SSH_CREDENTIAL_STAPLER_CLASS.to_string(),
                private_key: private_key.to_string(),
            },
        }
    }
}

/// The content of a kubeconfig credential, entered directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KubeconfigSource {
    #[serde(rename = "stapler-class")]
    pub stapler_class: String,
    pub content: String,
}

/// A kubeconfig credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KubeConfigCredential {
    #[serde(flatten)]
    pub credential: Credential,
    #[serde(rename = "kubeconfigSource")]
    pub kubeconfig_source: KubeconfigSource,
}

impl KubeConfigCredential {
    /// Creates a global-scope kubeconfig credential payload.
    pub fn new(id: &str, kubeconfig: &str) -> Self {
        Self {
            credential: Credential {
                scope: GLOBAL_SCOPE.to_string(),
                id: id.to_string(),
                class: KUBECONFIG_CREDENTIAL_STAPLER_CLASS.to_string(),
                stapler_class: KUBECONFIG_CREDENTIAL_STAPLER_CLASS.to_string(),
                ..Credential::default()
            },
            kubeconfig_source: KubeconfigSource {
                stapler_class: DIRECT_KUBECONFIG_CREDENTIAL_STAPLER_CLASS.to_string(),
                content: kubeconfig.to_string(),
            },
        }
    }
}

/// A credential domain listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialList {
    pub description: String,
    pub display_name: String,
    pub full_display_name: String,
    pub full_name: String,
    pub global: bool,
    #[serde(rename = "urlName")]
    pub url_name: String,
    pub credentials: Vec<Credential>,
}

/// Client for the credentials plugin.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    core: JenkinsCore,
}

impl CredentialsManager {
    /// Creates a credentials manager over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    /// Lists the credentials of the default domain of a store (usually
    /// `system`).
    pub async fn get_list(&self, store: &str) -> Result<CredentialList, ApiError> {
        let api = format!("/credentials/store/{store}/domain/_/api/json?pretty=true&depth=1");
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Deletes a credential by id from a store.
    pub async fn delete(&self, store: &str, id: &str) -> Result<(), ApiError> {
        let api = format!("/credentials/store/{store}/domain/_/credential/{id}/doDelete");
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Deletes a credential by id from a folder-scoped store.
    pub async fn delete_in_folder(&self, folder: &str, id: &str) -> Result<(), ApiError> {
        let api =
            format!("/job/{folder}/credentials/store/folder/domain/_/credential/{id}/doDelete");
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .send()
            .await?;
        Ok(())
    }

    /// Creates a credential in a store from a raw JSON credential document.
    pub async fn create(&self, store: &str, credential: &str) -> Result<(), ApiError> {
        let api = format!("/credentials/store/{store}/domain/_/createCredentials");
        tracing::debug!(api = %api, payload = %credential, "create credential");
        let json = format!(r#"{{"credentials": {credential}}}"#);
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .with_form_values(&[("json", &json)])
            .send()
            .await?;
        Ok(())
    }

    /// Creates a credential in a folder-scoped store.
    pub async fn create_in_folder<T: Serialize>(
        &self,
        folder: &str,
        credential: &T,
    ) -> Result<(), ApiError> {
        let api = format!("/job/{folder}/credentials/store/folder/domain/_/createCredentials");
        let json = format!(
            r#"{{"credentials": {}}}"#,
            serde_json::to_string(credential)?
        );
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .with_form_values(&[("json", &json)])
            .send()
            .await?;
        Ok(())
    }

    /// Updates a credential in a folder-scoped store. Some Jenkins versions
    /// answer 404 to `updateSubmit` even on success, so that status is
    /// accepted too.
    pub async fn update_in_folder<T: Serialize>(
        &self,
        folder: &str,
        id: &str,
        credential: &T,
    ) -> Result<(), ApiError> {
        let api =
            format!("/job/{folder}/credentials/store/folder/domain/_/credential/{id}/updateSubmit");
        let json = format!(
            r#"{{"credentials": {}}}"#,
            serde_json::to_string(credential)?
        );
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .with_form_values(&[("json", &json)])
            .accept_status_code(404)
            .send()
            .await?;
        Ok(())
    }

    /// Fetches a credential from a folder-scoped store.
    pub async fn get_in_folder(&self, folder: &str, id: &str) -> Result<Credential, ApiError> {
        let api = format!(
            "/job/{folder}/credentials/store/folder/domain/_/credential/{id}/api/json?depth=2"
        );
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Creates a username/password credential in a store.
    pub async fn create_username_password(
        &self,
        store: &str,
        credential: &UsernamePasswordCredential,
    ) -> Result<(), ApiError> {
        self.create(store, &serde_json::to_string(credential)?).await
    }

    /// Creates a secret-text credential in a store.
    pub async fn create_secret(
        &self,
        store: &str,
        credential: &StringCredentials,
    ) -> Result<(), ApiError> {
        self.create(store, &serde_json::to_string(credential)?).await
    }
}
