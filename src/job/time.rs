//
//  jenkins-client
//  job/time.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Jenkins timestamp handling.
//!
//! BlueOcean emits timestamps like `2021-08-25T07:29:13.483+0000`, which is
//! almost but not quite RFC 3339 (no colon in the offset). [`JenkinsTime`]
//! accepts that layout with an RFC 3339 fallback, tolerates `null`, and
//! serializes back as RFC 3339 in UTC.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Timestamp layout used by the Jenkins BlueOcean API.
const JENKINS_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// A nullable Jenkins timestamp.
///
/// The zero value stands for both JSON `null` and an absent field; it
/// serializes back to `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JenkinsTime(Option<DateTime<FixedOffset>>);

impl JenkinsTime {
    /// Returns true when no timestamp is present.
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the parsed timestamp, if any.
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }
}

impl From<DateTime<FixedOffset>> for JenkinsTime {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(Some(value))
    }
}

impl<'de> Deserialize<'de> for JenkinsTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(Self(None));
        };
        let parsed = DateTime::parse_from_str(&raw, JENKINS_TIME_LAYOUT)
            .or_else(|_| DateTime::parse_from_rfc3339(&raw))
            .map_err(|e| D::Error::custom(format!("invalid Jenkins timestamp {raw:?}: {e}")))?;
        Ok(Self(Some(parsed)))
    }
}

impl Serialize for JenkinsTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            None => serializer.serialize_none(),
            Some(dt) => serializer.serialize_str(
                &dt.with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        }
    }
}
