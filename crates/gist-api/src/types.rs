//! Gist API response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A gist as returned by `GET /gists/{id}`
///
/// Files are keyed by name in a `BTreeMap`, so iteration always walks them in
/// ascending name order regardless of how the API ordered the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Absent for anonymous gists
    #[serde(default)]
    pub owner: Option<Owner>,
    pub files: BTreeMap<String, GistFile>,
}

impl Gist {
    /// Login of the owning account, if any
    pub fn owner_login(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.login.as_str())
    }

    /// Files in enumeration (name) order
    pub fn files_in_order(&self) -> impl Iterator<Item = &GistFile> {
        self.files.values()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// A single file within a gist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GistFile {
    pub filename: String,
    /// MIME type label assigned by GitHub (e.g. `application/json`)
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default)]
    pub content: String,
    /// GitHub stops inlining content for large files
    #[serde(default)]
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gist_deserialization() {
        let json = r#"{
            "id": "abc123",
            "description": "rotating fixtures",
            "owner": { "login": "octocat", "id": 1 },
            "public": true,
            "files": {
                "b.json": {
                    "filename": "b.json",
                    "type": "application/json",
                    "language": "JSON",
                    "size": 9,
                    "content": "{\"n\": 2}"
                },
                "a.json": {
                    "filename": "a.json",
                    "type": "application/json",
                    "content": "{\"n\": 1}",
                    "truncated": false
                }
            }
        }"#;

        let gist: Gist = serde_json::from_str(json).unwrap();
        assert_eq!(gist.id, "abc123");
        assert_eq!(gist.description.as_deref(), Some("rotating fixtures"));
        assert_eq!(gist.owner_login(), Some("octocat"));

        let names: Vec<&str> = gist.files_in_order().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
        assert_eq!(gist.files["a.json"].content, "{\"n\": 1}");
    }

    #[test]
    fn test_anonymous_gist() {
        let json = r#"{ "id": "anon", "description": null, "owner": null, "files": {} }"#;

        let gist: Gist = serde_json::from_str(json).unwrap();
        assert!(gist.owner_login().is_none());
        assert!(gist.description.is_none());
        assert!(gist.files.is_empty());
    }

    #[test]
    fn test_not_found_body_is_rejected() {
        let json = r#"{
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        }"#;

        assert!(serde_json::from_str::<Gist>(json).is_err());
    }
}
