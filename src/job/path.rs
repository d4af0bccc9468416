//
//  jenkins-client
//  job/path.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Path building for hierarchical job and pipeline names.
//!
//! Jenkins nests folders as repeated `/job/{name}` URL segments, and
//! BlueOcean nests pipelines as repeated `pipelines/{name}` segments. Both
//! helpers take the segment list and join it once.

/// Turns a job name into its URL path.
///
/// A space-separated name denotes nesting: `"folder job"` becomes
/// `/job/folder/job/job`. A name already in `/job/...` (or `job/...`) form
/// passes through untouched, and an empty name yields an empty path.
///
/// # Example
///
/// ```rust
/// use jenkins_client::job::job_path;
///
/// assert_eq!(job_path("abc"), "/job/abc");
/// assert_eq!(job_path("abc def"), "/job/abc/job/def");
/// assert_eq!(job_path("/job/abc/job/def"), "/job/abc/job/def");
/// ```
pub fn job_path(job_name: &str) -> String {
    if job_name.is_empty() || job_name.starts_with("/job/") || job_name.starts_with("job/") {
        return job_name.to_string();
    }
    let mut path = String::new();
    for item in job_name.split(' ') {
        path.push_str("/job/");
        path.push_str(item);
    }
    path
}

/// Joins pipeline names into a BlueOcean path fragment:
/// `["a", "b"]` becomes `pipelines/a/pipelines/b`.
///
/// Empty segments are kept in place, matching how the BlueOcean API treats
/// them.
pub fn pipeline_path<S: AsRef<str>>(pipelines: &[S]) -> String {
    pipelines
        .iter()
        .map(|p| format!("pipelines/{}", p.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}
