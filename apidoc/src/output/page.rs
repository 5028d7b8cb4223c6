//! @ai:module:intent The index manifest the front-end loads first
//! @ai:module:layer domain
//! @ai:module:public_api Page
//! @ai:module:stateless true

use crate::doc::Doc;
use crate::output::OutputOptions;
use crate::vars;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

/// @ai:intent Document metadata, run statistics and the group file index
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub license_name: String,
    #[serde(rename = "licenseURL")]
    pub license_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_nanos")]
    pub elapsed: Duration,
    /// Group display name to artifact path.
    pub groups: BTreeMap<String, String>,

    pub app_name: String,
    #[serde(rename = "appURL")]
    pub app_url: String,
    pub app_version: String,
}

impl Page {
    /// @ai:intent Assemble the manifest for a rendered document
    /// @ai:effects pure
    pub fn new(doc: &Doc, opt: &OutputOptions, groups: BTreeMap<String, String>) -> Self {
        Self {
            title: doc.info.title.clone(),
            version: doc.info.version.clone(),
            base_url: doc.info.base_url.clone(),
            license_name: doc.info.license_name.clone(),
            license_url: doc.info.license_url.clone(),
            content: doc.info.content.clone(),
            date: opt.date,
            elapsed: opt.elapsed,
            groups,
            app_name: vars::NAME.to_string(),
            app_url: vars::OFFICIAL_URL.to_string(),
            app_version: vars::version().to_string(),
        }
    }
}

fn serialize_nanos<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}
