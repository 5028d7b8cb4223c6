//! @ai:module:intent Render the aggregated document into the output directory
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputOptions, render, Group, Page, StaticPublisher, EmbeddedAssets
//! @ai:module:depends_on doc, error, vars

pub mod assets;
pub mod group;
pub mod page;

pub use assets::{EmbeddedAssets, StaticPublisher};
pub use group::{build_groups, group_paths, Group};
pub use page::Page;

use crate::doc::Doc;
use crate::error::{Error, OptionsError, Result};
use crate::vars;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// @ai:intent Where and what to render
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    #[serde(default)]
    pub dir: PathBuf,
    /// Only these groups get a file; empty means all of them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Time spent on the run, filled in by the caller.
    #[serde(skip)]
    pub elapsed: Duration,
    /// Generation time, filled in by the caller.
    #[serde(skip)]
    pub date: Option<DateTime<Utc>>,
}

impl OutputOptions {
    /// @ai:intent Validate the output descriptor
    /// @ai:effects pure
    pub fn sanitize(&mut self) -> std::result::Result<(), OptionsError> {
        if self.dir.as_os_str().is_empty() {
            return Err(OptionsError::required("dir"));
        }

        Ok(())
    }

    /// @ai:intent Whether a group's file should be written
    /// @ai:example (groups = []) "Users" -> true
    /// @ai:example (groups = ["Users"]) "users" -> false
    /// @ai:effects pure
    pub fn group_is_enabled(&self, name: &str) -> bool {
        self.groups.is_empty() || self.groups.iter().any(|g| g == name)
    }

    /// @ai:intent Directory holding the JSON data
    pub fn data_dir(&self) -> PathBuf {
        self.dir.join(vars::JSON_DATA_DIR_NAME)
    }
}

/// @ai:intent Replace the output directory with a freshly rendered document
/// @ai:pre opt has been sanitized
/// @ai:post on error the directory may hold a partial render; nothing is rolled back
/// @ai:effects fs:write
pub fn render(doc: &Doc, opt: &OutputOptions, assets: &dyn StaticPublisher) -> Result<()> {
    // File names depend on group names, so stale files from an earlier run must go.
    remove_dir(&opt.dir)?;

    let data_dir = opt.data_dir();
    create_dir(&opt.dir)?;
    create_dir(&data_dir)?;

    assets.publish(&opt.dir).map_err(|source| Error::Assets {
        path: opt.dir.clone(),
        source,
    })?;

    let groups = build_groups(doc, &data_dir);
    let page = Page::new(doc, opt, group_paths(&groups));
    write_json(&page, &data_dir.join(format!("{}.json", vars::PAGE_FILE_NAME)))?;

    let mut written = 0;
    for group in groups.values() {
        if !opt.group_is_enabled(&group.name) {
            debug!("Skipping disabled group {}", group.name);
            continue;
        }

        write_json(group, &group.path)?;
        written += 1;
    }

    info!(
        "Rendered {} of {} groups into {}",
        written,
        groups.len(),
        opt.dir.display()
    );
    Ok(())
}

fn remove_dir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Io {
            action: "remove directory",
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| Error::Io {
        action: "create directory",
        path: dir.to_path_buf(),
        source,
    })
}

/// @ai:intent Write a value as indented JSON
/// @ai:effects fs:write
fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let indent = " ".repeat(vars::JSON_INDENT);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), formatter);
    value.serialize(&mut serializer)?;

    std::fs::write(path, serializer.into_inner()).map_err(|source| Error::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_parser::{Api, DocInfo};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    struct FailingAssets;

    impl StaticPublisher for FailingAssets {
        fn publish(&self, _dir: &Path) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "assets missing"))
        }
    }

    fn api(group: &str, url: &str) -> Api {
        let mut api = Api::new("GET", url, "summary");
        api.group = group.to_string();
        api
    }

    fn sample_doc() -> Doc {
        Doc {
            info: DocInfo {
                title: "Sample".to_string(),
                ..Default::default()
            },
            apis: vec![api("Users", "/users/b"), api("Admin", "/admin"), api("users", "/users/a")],
        }
    }

    fn options(dir: PathBuf) -> OutputOptions {
        OutputOptions {
            dir,
            elapsed: Duration::from_millis(12),
            date: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            ..Default::default()
        }
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    /// Relative path to file contents for every file below `dir`.
    fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
        let mut files = BTreeMap::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            for entry in std::fs::read_dir(&current).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    let rel = path.strip_prefix(dir).unwrap().to_string_lossy().to_string();
                    files.insert(rel, std::fs::read(&path).unwrap());
                }
            }
        }
        files
    }

    #[test]
    fn test_sanitize_requires_dir() {
        let err = OutputOptions::default().sanitize().unwrap_err();
        assert_eq!(err.field, "dir");
    }

    #[test]
    fn test_render_writes_page_and_groups() {
        let temp = TempDir::new().unwrap();
        let opt = options(temp.path().join("doc"));

        render(&sample_doc(), &opt, &EmbeddedAssets).unwrap();

        assert!(opt.dir.join("index.html").exists());
        let page = read_json(&opt.dir.join("data/page.json"));
        assert_eq!(page["title"], "Sample");

        let users = read_json(&opt.dir.join("data/group_users.json"));
        assert_eq!(users["name"], "Users");
        let urls: Vec<_> = users["apis"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["url"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(urls, vec!["/users/a", "/users/b"]);
    }

    #[test]
    fn test_json_uses_configured_indent() {
        let temp = TempDir::new().unwrap();
        let opt = options(temp.path().join("doc"));

        render(&sample_doc(), &opt, &EmbeddedAssets).unwrap();

        let raw = std::fs::read_to_string(opt.dir.join("data/group_admin.json")).unwrap();
        assert!(raw.starts_with("{\n    \"name\": \"Admin\""));
    }

    #[test]
    fn test_allowlist_limits_group_files_but_not_manifest() {
        let temp = TempDir::new().unwrap();
        let mut opt = options(temp.path().join("doc"));
        opt.groups = vec!["Users".to_string()];

        render(&sample_doc(), &opt, &EmbeddedAssets).unwrap();

        assert!(opt.dir.join("data/group_users.json").exists());
        assert!(!opt.dir.join("data/group_admin.json").exists());

        let page = read_json(&opt.dir.join("data/page.json"));
        assert_eq!(page["groups"]["Users"], "data/group_users.json");
        assert_eq!(page["groups"]["Admin"], "data/group_admin.json");
    }

    #[test]
    fn test_rerender_is_byte_identical_and_clears_stale_files() {
        let temp = TempDir::new().unwrap();
        let opt = options(temp.path().join("doc"));

        let other = Doc {
            apis: vec![api("Legacy", "/old")],
            ..Default::default()
        };
        render(&other, &opt, &EmbeddedAssets).unwrap();
        std::fs::write(opt.dir.join("stray.txt"), "left over").unwrap();
        assert!(opt.dir.join("data/group_legacy.json").exists());

        render(&sample_doc(), &opt, &EmbeddedAssets).unwrap();
        let first = snapshot(&opt.dir);
        render(&sample_doc(), &opt, &EmbeddedAssets).unwrap();
        let second = snapshot(&opt.dir);

        assert_eq!(first, second);
        assert!(!first.contains_key("stray.txt"));
        assert!(!first.keys().any(|k| k.contains("group_legacy")));
    }

    #[test]
    fn test_publisher_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let opt = options(temp.path().join("doc"));

        let err = render(&sample_doc(), &opt, &FailingAssets).unwrap_err();

        assert!(matches!(err, Error::Assets { .. }));
        assert!(!opt.dir.join("data/page.json").exists());
    }

    #[test]
    fn test_unwritable_destination_is_fatal() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let opt = options(blocker.join("doc"));

        let err = render(&sample_doc(), &opt, &EmbeddedAssets).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
