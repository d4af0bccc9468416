//
//  jenkins-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Jenkins Client Library
//!
//! A Rust client library for the Jenkins REST/JSON API, covering jobs, builds,
//! artifacts, credentials, plugins, the build queue, users, agents (computers),
//! configuration-as-code, Kubernetes pod templates, and BlueOcean pipelines.
//!
//! ## Overview
//!
//! Every resource client is a thin façade over a shared HTTP core:
//!
//! - [`core::JenkinsCore`] holds the server URL, credentials, TLS/proxy
//!   settings, and the mutable session state (CSRF crumb, cookies).
//! - [`core::RequestBuilder`] composes a single HTTP exchange and declares
//!   which response status codes count as success.
//! - [`core::ApiError`] classifies non-accepted status codes into stable
//!   error categories.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jenkins_client::core::JenkinsCore;
//! use jenkins_client::job::JobClient;
//!
//! # async fn example() -> Result<(), jenkins_client::core::ApiError> {
//! let core = JenkinsCore::new("https://jenkins.example.com")
//!     .with_auth("admin", "11aabbccddeeff");
//!
//! let jobs = JobClient::new(core);
//! jobs.build("my-pipeline").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`core::ApiError`]. Transport failures surface
//! unmodified, non-accepted HTTP status codes map to stable categories
//! (bad request, not found, permission, unexpected status), and JSON decode
//! failures pass through as-is. No call retries automatically.
//!
//! ## Concurrency
//!
//! Calls are async and run on the caller's task. The session state (crumb
//! and cookies) sits behind a mutex purely for interior mutability; callers
//! issuing concurrent state-mutating requests against one [`core::JenkinsCore`]
//! may race benignly on the crumb refresh. Use one core per task if that
//! matters to you.

/// Shared HTTP core: connection context, request builder, error classifier,
/// and system-level operations (restart, shutdown, pipeline converter).
pub mod core;

/// Job management: search, trigger builds, stop builds, create/delete jobs,
/// console logs, pipeline script handling, and the BlueOcean API.
pub mod job;

/// Build artifact listing and download.
pub mod artifact;

/// Configuration-as-code (JCasC) management: export, schema, reload, apply,
/// replace, and source checking.
pub mod casc;

/// Credential management for the system store and folder-scoped stores.
pub mod credential;

/// Build queue inspection and cancellation.
pub mod queue;

/// User management: lookup, creation, deletion, API tokens.
pub mod user;

/// Agent (computer) management: list, launch, logs, secrets.
pub mod computer;

/// Plugin management: installed plugins, install/uninstall, update center.
pub mod plugin;

/// Kubernetes pod template editing inside a CasC YAML document.
pub mod k8s;

/// Structured Jenkinsfile JSON model produced by the pipeline model converter.
pub mod pipeline;

/// Small helpers shared across modules (URL joining).
pub mod util;

pub use crate::core::{ApiError, JenkinsCore, RequestBuilder};

/// Library version, derived from Cargo.toml at compile time.
///
/// Used in the `User-Agent` header sent with every request that goes through
/// a client built by this library (custom clients are used unmodified).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
