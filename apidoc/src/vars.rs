//! @ai:module:intent Application identity and output layout constants
//! @ai:module:layer domain
//! @ai:module:stateless true

/// Program name, reported in the page manifest.
pub const NAME: &str = "apidoc";

/// Project home page, reported in the page manifest.
pub const OFFICIAL_URL: &str = "https://apidoc.tools";

/// Title used when no source declares one with `@apidoc`.
pub const DEFAULT_TITLE: &str = "APIDOC";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "apidoc.toml";

/// Subdirectory of the output directory holding the JSON data.
pub const JSON_DATA_DIR_NAME: &str = "data";

/// File name (without extension) of the page manifest.
pub const PAGE_FILE_NAME: &str = "page";

/// Prefix of every group file name.
pub const GROUP_FILE_PREFIX: &str = "group_";

/// Indent width of the emitted JSON.
pub const JSON_INDENT: usize = 4;

/// Encodings the source reader accepts.
pub const SUPPORTED_ENCODINGS: &[&str] = &["utf-8", "utf8"];

/// @ai:intent Version of the running program
/// @ai:effects pure
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
