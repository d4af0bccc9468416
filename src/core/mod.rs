//
//  jenkins-client
//  core/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Shared HTTP Core
//!
//! The three pieces every resource client builds on:
//!
//! - [`JenkinsCore`]: the connection context holding the URL, credentials,
//!   TLS/proxy settings, timeout, and the mutable session state (crumb,
//!   cookies).
//! - [`RequestBuilder`]: composes one exchange and declares which status
//!   codes count as success.
//! - [`ApiError`]: the unified error type with stable status-code
//!   classification.
//!
//! [`SystemClient`] lives here too because its endpoints (restart, shutdown,
//! pipeline converter) belong to the server itself rather than to any
//! resource.

mod client;
mod error;
mod request;
mod system;

pub use client::{JenkinsCore, JenkinsCrumb};
pub use error::{classify, ApiError};
pub use request::{ApiResponse, RequestBuilder};
pub use system::{
    AgentLabel, ConverterResponse, JenkinsIdentity, LabelsResponse, SystemClient,
    ToJenkinsfileResult, ToJsonResult,
};
