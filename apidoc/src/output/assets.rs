//! @ai:module:intent Publish the static front-end shell next to the JSON data
//! @ai:module:layer infrastructure
//! @ai:module:public_api StaticPublisher, EmbeddedAssets

use std::path::Path;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// @ai:intent Writes the non-data files of the output directory
pub trait StaticPublisher: Send + Sync {
    /// @ai:intent Populate `dir` with the front-end files
    /// @ai:pre dir exists
    fn publish(&self, dir: &Path) -> std::io::Result<()>;
}

/// @ai:intent Publisher for the front-end bundled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl StaticPublisher for EmbeddedAssets {
    /// @ai:effects fs:write
    fn publish(&self, dir: &Path) -> std::io::Result<()> {
        std::fs::write(dir.join("index.html"), INDEX_HTML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_assets_write_index() {
        let temp = TempDir::new().unwrap();
        EmbeddedAssets.publish(temp.path()).unwrap();

        let html = std::fs::read_to_string(temp.path().join("index.html")).unwrap();
        assert!(html.contains("data/page.json"));
    }
}
