//
//  jenkins-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Shared helpers, currently URL joining with Jenkins path semantics.

use url::Url;

use crate::core::ApiError;

/// Joins a server base URL and an API path into an absolute URL.
///
/// Duplicate slashes are collapsed and a trailing slash on the API path is
/// preserved, because several Jenkins endpoints (e.g. BlueOcean `runs/`)
/// change meaning without it. A query string on the API path is carried over
/// untouched.
///
/// # Example
///
/// ```rust
/// use jenkins_client::util::url_join;
///
/// let joined = url_join("https://host/", "path/").unwrap();
/// assert_eq!(joined.as_str(), "https://host/path/");
///
/// let joined = url_join("https://host", "path").unwrap();
/// assert_eq!(joined.as_str(), "https://host/path");
/// ```
///
/// # Errors
///
/// Returns [`ApiError::InvalidUrl`] when the base URL cannot be parsed.
pub fn url_join(host: &str, api: &str) -> Result<Url, ApiError> {
    let base = Url::parse(host)?;

    let (path_part, query) = match api.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (api, None),
    };

    let mut path = String::new();
    for segment in base
        .path()
        .split('/')
        .chain(path_part.split('/'))
        .filter(|s| !s.is_empty())
    {
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push('/');
    } else if path_part.ends_with('/') {
        path.push('/');
    }

    let mut target = base;
    target.set_path(&path);
    target.set_query(query);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_plain() {
        assert_eq!(
            url_join("http://localhost", "/fake").unwrap().as_str(),
            "http://localhost/fake"
        );
    }

    #[test]
    fn test_url_join_no_trailing_slash_introduced() {
        assert_eq!(
            url_join("https://host", "path").unwrap().as_str(),
            "https://host/path"
        );
        assert_eq!(
            url_join("https://host/", "path").unwrap().as_str(),
            "https://host/path"
        );
    }

    #[test]
    fn test_url_join_trailing_slash_preserved() {
        assert_eq!(
            url_join("https://host/", "path/").unwrap().as_str(),
            "https://host/path/"
        );
        assert_eq!(
            url_join("https://host", "a/b/").unwrap().as_str(),
            "https://host/a/b/"
        );
    }

    #[test]
    fn test_url_join_collapses_duplicate_slashes() {
        assert_eq!(
            url_join("http://localhost/", "/job//fake").unwrap().as_str(),
            "http://localhost/job/fake"
        );
    }

    #[test]
    fn test_url_join_keeps_query() {
        assert_eq!(
            url_join("http://localhost", "/items/list?name=fake&start=0")
                .unwrap()
                .as_str(),
            "http://localhost/items/list?name=fake&start=0"
        );
    }

    #[test]
    fn test_url_join_with_base_path() {
        assert_eq!(
            url_join("http://localhost/jenkins", "/job/fake")
                .unwrap()
                .as_str(),
            "http://localhost/jenkins/job/fake"
        );
    }

    #[test]
    fn test_url_join_invalid_base() {
        assert!(url_join("not a url", "/fake").is_err());
    }
}
