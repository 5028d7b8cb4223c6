//! @ai:module:intent Define the records extracted from @api comment blocks
//! @ai:module:layer domain
//! @ai:module:public_api Api, DocInfo, Param, Request, Response, Location, DEFAULT_GROUP
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Group assigned to records that carry no @apiGroup tag.
pub const DEFAULT_GROUP: &str = "default";

/// @ai:intent Represents a source code location
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    /// @ai:intent Create a new Location
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// @ai:intent A named, typed value: path parameter, query parameter or header
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
}

/// @ai:intent Request body description
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
}

/// @ai:intent A documented response, successful or not
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
}

/// @ai:intent One documented endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    pub method: String,
    pub url: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<Param>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Response>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Response>,
    #[serde(skip)]
    pub location: Location,
}

impl Api {
    /// @ai:intent Create a record with the fields every endpoint carries
    pub fn new(method: &str, url: &str, summary: &str) -> Self {
        Self {
            method: method.to_uppercase(),
            url: url.to_string(),
            summary: summary.to_string(),
            group: DEFAULT_GROUP.to_string(),
            ..Default::default()
        }
    }
}

/// @ai:intent Document-level metadata declared by an @apidoc block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocInfo {
    pub title: String,
    pub version: String,
    pub base_url: String,
    pub license_name: String,
    pub license_url: String,
    pub content: String,
}

impl DocInfo {
    /// @ai:intent Fill every still-empty field from another value
    /// @ai:post fields already set are never overwritten
    /// @ai:effects pure
    pub fn fill_from(&mut self, other: &DocInfo) {
        fill(&mut self.title, &other.title);
        fill(&mut self.version, &other.version);
        fill(&mut self.base_url, &other.base_url);
        fill(&mut self.license_name, &other.license_name);
        fill(&mut self.license_url, &other.license_url);
        fill(&mut self.content, &other.content);
    }
}

fn fill(target: &mut String, value: &str) {
    if target.is_empty() && !value.is_empty() {
        *target = value.to_string();
    }
}
