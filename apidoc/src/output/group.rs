//! @ai:module:intent Partition records into case-insensitive groups with a stable order
//! @ai:module:layer application
//! @ai:module:public_api Group, build_groups, group_paths
//! @ai:module:depends_on doc, vars
//! @ai:module:stateless true

use crate::doc::Doc;
use crate::vars;
use apidoc_parser::Api;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// @ai:intent One group file: display name plus its sorted records
#[derive(Debug, Serialize)]
pub struct Group<'a> {
    /// Lowercased group name, also the map key.
    #[serde(skip)]
    pub key: String,
    /// Where the group file is written.
    #[serde(skip)]
    pub path: PathBuf,
    pub name: String,
    pub apis: Vec<&'a Api>,
}

/// @ai:intent File name of a group's artifact
/// @ai:example ("users") -> "group_users.json"
/// @ai:effects pure
pub fn group_file_name(key: &str) -> String {
    format!("{}{}.json", vars::GROUP_FILE_PREFIX, key)
}

/// @ai:intent Group a document's records by case-insensitive group name
/// @ai:post the display name is the casing first seen in `doc.apis` order
/// @ai:post records are sorted by URL ascending, ties keep their merged order
/// @ai:effects pure
pub fn build_groups<'a>(doc: &'a Doc, data_dir: &Path) -> BTreeMap<String, Group<'a>> {
    let mut groups: BTreeMap<String, Group<'a>> = BTreeMap::new();

    for api in &doc.apis {
        let key = api.group.to_lowercase();
        groups
            .entry(key.clone())
            .or_insert_with(|| Group {
                path: data_dir.join(group_file_name(&key)),
                name: api.group.clone(),
                key,
                apis: Vec::new(),
            })
            .apis
            .push(api);
    }

    for group in groups.values_mut() {
        group.apis.sort_by(|a, b| a.url.cmp(&b.url));
    }

    groups
}

/// @ai:intent Map every group's display name to its artifact path relative to the output dir
/// @ai:post includes groups the output allowlist will skip
/// @ai:effects pure
pub fn group_paths(groups: &BTreeMap<String, Group<'_>>) -> BTreeMap<String, String> {
    groups
        .values()
        .map(|g| {
            (
                g.name.clone(),
                format!("{}/{}", vars::JSON_DATA_DIR_NAME, group_file_name(&g.key)),
            )
        })
        .collect()
}
