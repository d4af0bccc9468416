//
//  jenkins-client
//  user/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Users
//!
//! [`UserClient`] covers the user endpoints: the current user's detail and
//! description, account creation and deletion through the security realm,
//! and API token generation.

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// A Jenkins user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "absoluteUrl")]
    pub absolute_url: String,
    pub description: String,
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub id: String,
}

/// The payload for creating a user through the security realm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserForCreate {
    #[serde(flatten)]
    pub user: User,
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub email: String,
}

/// The token document returned by the API token generator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Token {
    pub status: String,
    pub data: TokenData,
}

/// A generated API token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenData {
    pub token_name: String,
    #[serde(rename = "tokenUuid")]
    pub token_uuid: String,
    pub token_value: String,
    pub user_name: String,
}

/// Generates a random alphanumeric password of the given length.
fn generate_password(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Client for the Jenkins user endpoints.
///
/// Operations on "the current user" use the username configured on the
/// connection context.
#[derive(Debug, Clone)]
pub struct UserClient {
    core: JenkinsCore,
}

impl UserClient {
    /// Creates a user client over the given connection context.
    pub fn new(core: JenkinsCore) -> Self {
        Self { core }
    }

    /// Returns the underlying connection context.
    pub fn core(&self) -> &JenkinsCore {
        &self.core
    }

    fn current_username(&self) -> Result<&str, ApiError> {
        self.core
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                ApiError::InvalidConfig("no username configured on the connection".to_string())
            })
    }

    /// Returns the detail of the current user.
    pub async fn get(&self) -> Result<User, ApiError> {
        let api = format!("/user/{}/api/json", self.current_username()?);
        RequestBuilder::new(&self.core, api).send().await?.as_object()
    }

    /// Updates the description of the current user.
    pub async fn edit_desc(&self, description: &str) -> Result<(), ApiError> {
        let api = format!("/user/{}/submitDescription", self.current_username()?);
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .with_form_values(&[("description", description)])
            .send()
            .await?;
        Ok(())
    }

    /// Removes a user from Jenkins.
    pub async fn delete(&self, username: &str) -> Result<(), ApiError> {
        let api = format!("/securityRealm/user/{username}/doDelete");
        RequestBuilder::new(&self.core, api)
            .as_post_form_request()
            .send()
            .await?;
        Ok(())
    }

    /// Creates a user. An empty password is replaced by a generated one;
    /// the returned payload carries whichever was used. The security realm
    /// redirects on success, so 302 is accepted.
    pub async fn create(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserForCreate, ApiError> {
        let password = if password.is_empty() {
            generate_password(8)
        } else {
            password.to_string()
        };
        let user = UserForCreate {
            user: User {
                full_name: username.to_string(),
                ..User::default()
            },
            username: username.to_string(),
            password1: password.clone(),
            password2: password,
            email: format!("{username}@{username}.com"),
        };
        self.submit_create(&user).await?;
        Ok(user)
    }

    /// Creates a user from a fully specified payload, validating the
    /// required fields before sending anything.
    pub async fn create_with_params(&self, user: UserForCreate) -> Result<UserForCreate, ApiError> {
        for (value, field) in [
            (&user.username, "username"),
            (&user.password1, "password1"),
            (&user.password2, "password2"),
            (&user.email, "email"),
            (&user.user.full_name, "fullname"),
        ] {
            if value.is_empty() {
                return Err(ApiError::InvalidArgument(format!(
                    "{field} cannot be empty"
                )));
            }
        }
        self.submit_create(&user).await?;
        Ok(user)
    }

    async fn submit_create(&self, user: &UserForCreate) -> Result<(), ApiError> {
        let json = serde_json::to_string(user)?;
        RequestBuilder::new(&self.core, "/securityRealm/createAccountByAdmin")
            .with_post_method()
            .with_form_values(&[
                ("json", &json),
                ("username", &user.username),
                ("password1", &user.password1),
                ("password2", &user.password2),
                ("fullname", &user.user.full_name),
                ("email", &user.email),
            ])
            .accept_status_code(302)
            .send()
            .await?;
        Ok(())
    }

    /// Generates an API token. An empty target user means the current user;
    /// an empty token name gets a generated one.
    pub async fn create_token(
        &self,
        target_user: &str,
        new_token_name: &str,
    ) -> Result<Token, ApiError> {
        let token_name = if new_token_name.is_empty() {
            format!("jenkins-client-{}", generate_password(6))
        } else {
            new_token_name.to_string()
        };
        let target = if target_user.is_empty() {
            self.current_username()?
        } else {
            target_user
        };

        let api = format!(
            "/user/{target}/descriptorByName/jenkins.security.ApiTokenProperty/generateNewToken"
        );
        RequestBuilder::new(&self.core, api)
            .with_post_method()
            .with_form_values(&[("newTokenName", &token_name)])
            .send()
            .await?
            .as_object()
    }
}
