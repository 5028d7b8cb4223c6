//! @ai:module:intent Load, validate and generate the project configuration file
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, is_semver, is_compatible
//! @ai:module:depends_on input, output, diagnostics, error, vars

use crate::diagnostics::Diagnostics;
use crate::error::{Error, OptionsError, Result};
use crate::input::InputOptions;
use crate::output::OutputOptions;
use crate::vars;
use apidoc_parser::detect_dir_language;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

/// @ai:intent Everything that shapes a run; doc content itself comes from @apidoc tags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Version of the program that wrote the file.
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub inputs: Vec<InputOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputOptions>,
}

/// Serialization format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Toml,
        }
    }
}

impl Config {
    /// @ai:intent Read, validate and version-check a config file
    /// @ai:pre path exists and is readable
    /// @ai:post relative directories are resolved against the config file's directory
    /// @ai:post every input carries `diagnostics`
    /// @ai:effects fs:read
    pub fn load(path: &Path, diagnostics: &Diagnostics) -> Result<Self> {
        info!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            message,
        };
        let mut config: Config = match Format::of(path) {
            Format::Yaml => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
            Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };

        config.resolve_relative(path.parent().unwrap_or_else(|| Path::new("")));
        config.sanitize(diagnostics)?;

        if !is_compatible(&config.version, vars::version()) {
            return Err(OptionsError::new(
                "version",
                format!(
                    "{} is not compatible with {} {}",
                    config.version,
                    vars::NAME,
                    vars::version()
                ),
            )
            .into());
        }

        Ok(config)
    }

    /// @ai:intent Anchor relative input and output directories at `base`
    /// @ai:post empty directories stay empty so validation still reports them
    /// @ai:effects pure
    pub fn resolve_relative(&mut self, base: &Path) {
        let resolve = |dir: &mut PathBuf| {
            if !dir.as_os_str().is_empty() && dir.is_relative() {
                *dir = base.join(&*dir);
            }
        };

        for input in &mut self.inputs {
            resolve(&mut input.dir);
        }
        if let Some(output) = self.output.as_mut() {
            resolve(&mut output.dir);
        }
    }

    /// @ai:intent Validate the config and bind diagnostics to every input
    /// @ai:post on error no input has been bound
    /// @ai:effects fs:read
    pub fn sanitize(&mut self, diagnostics: &Diagnostics) -> std::result::Result<(), OptionsError> {
        if !is_semver(&self.version) {
            return Err(OptionsError::invalid_format("version"));
        }

        if self.inputs.is_empty() {
            return Err(OptionsError::required("inputs"));
        }

        let Some(output) = self.output.as_mut() else {
            return Err(OptionsError::required("output"));
        };

        for (i, input) in self.inputs.iter_mut().enumerate() {
            input
                .sanitize()
                .map_err(|e| e.prefixed(&format!("inputs[{}].", i)))?;
        }

        output.sanitize().map_err(|e| e.prefixed("outputs."))?;

        for input in &mut self.inputs {
            input.diagnostics = Some(diagnostics.clone());
        }

        Ok(())
    }

    /// @ai:intent Build a default configuration documenting `dir`
    /// @ai:post the language is detected from the files in `dir`; empty if none is recognized
    /// @ai:post paths are relative, meant for a config file saved in `dir`
    /// @ai:effects fs:read
    pub fn generate(dir: &Path) -> Self {
        let lang = match detect_dir_language(dir) {
            Some(lang) => lang.name().to_string(),
            None => {
                warn!("No supported source files found in {}", dir.display());
                String::new()
            }
        };

        Config {
            version: vars::version().to_string(),
            inputs: vec![InputOptions {
                dir: PathBuf::from("."),
                recursive: true,
                lang,
                ..Default::default()
            }],
            output: Some(OutputOptions {
                dir: PathBuf::from("doc"),
                ..Default::default()
            }),
        }
    }

    /// @ai:intent Write the configuration, format chosen by extension
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_error = |message: String| Error::ConfigWrite {
            path: path.to_path_buf(),
            message,
        };
        let content = match Format::of(path) {
            Format::Yaml => serde_yaml::to_string(self).map_err(|e| write_error(e.to_string()))?,
            Format::Toml => toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?,
        };

        std::fs::write(path, content).map_err(|e| write_error(e.to_string()))
    }
}

fn semver_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
        )
        .expect("Invalid regex")
    })
}

/// @ai:intent Check a semantic version string
/// @ai:example ("4.0.1") -> true
/// @ai:example ("4.0") -> false
/// @ai:example ("1.2.3-beta.1+build.5") -> true
/// @ai:effects pure
pub fn is_semver(version: &str) -> bool {
    semver_regex().is_match(version)
}

/// @ai:intent Whether a config written by `config_version` can be read by `app_version`
/// @ai:post same major version is compatible; while major is 0 the minor must match too
/// @ai:effects pure
pub fn is_compatible(config_version: &str, app_version: &str) -> bool {
    let parts = |v: &str| -> Option<(u64, u64)> {
        let caps = semver_regex().captures(v)?;
        Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
    };

    match (parts(config_version), parts(app_version)) {
        (Some((cfg_major, cfg_minor)), Some((app_major, app_minor))) => {
            cfg_major == app_major && (app_major != 0 || cfg_minor == app_minor)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn valid_input(dir: &Path) -> InputOptions {
        InputOptions {
            dir: dir.to_path_buf(),
            recursive: true,
            lang: "go".to_string(),
            ..Default::default()
        }
    }

    fn output() -> OutputOptions {
        OutputOptions {
            dir: PathBuf::from("doc"),
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_order() {
        let temp = TempDir::new().unwrap();
        let diagnostics = Diagnostics::default();
        let mut conf = Config::default();

        let err = conf.sanitize(&diagnostics).unwrap_err();
        assert_eq!(err.field, "version");

        conf.version = "4.0".to_string();
        let err = conf.sanitize(&diagnostics).unwrap_err();
        assert_eq!(err.field, "version");

        conf.version = "4.0.1".to_string();
        let err = conf.sanitize(&diagnostics).unwrap_err();
        assert_eq!(err.field, "inputs");

        conf.inputs = vec![valid_input(temp.path())];
        let err = conf.sanitize(&diagnostics).unwrap_err();
        assert_eq!(err.field, "output");

        conf.output = Some(output());
        conf.inputs.push(InputOptions {
            lang: "123".to_string(),
            ..valid_input(temp.path())
        });
        let err = conf.sanitize(&diagnostics).unwrap_err();
        assert!(err.field.starts_with("inputs[1]"), "{}", err.field);
        assert_eq!(err.field, "inputs[1].lang");
    }

    #[test]
    fn test_sanitize_first_input_failure_reported_first() {
        let mut conf = Config {
            version: "4.0.1".to_string(),
            inputs: vec![InputOptions::default(), InputOptions::default()],
            output: Some(output()),
        };

        let err = conf.sanitize(&Diagnostics::default()).unwrap_err();
        assert_eq!(err.field, "inputs[0].dir");
    }

    #[test]
    fn test_sanitize_output_field_path() {
        let temp = TempDir::new().unwrap();
        let mut conf = Config {
            version: "1.0.0".to_string(),
            inputs: vec![valid_input(temp.path())],
            output: Some(OutputOptions::default()),
        };

        let err = conf.sanitize(&Diagnostics::default()).unwrap_err();
        assert_eq!(err.field, "outputs.dir");
        assert!(conf.inputs[0].diagnostics.is_none());
    }

    #[test]
    fn test_sanitize_binds_diagnostics() {
        let temp = TempDir::new().unwrap();
        let errors = Arc::new(MemorySink::new());
        let diagnostics = Diagnostics::new(errors.clone(), Arc::new(MemorySink::new()));
        let mut conf = Config {
            version: "1.0.0".to_string(),
            inputs: vec![valid_input(temp.path()), valid_input(temp.path())],
            output: Some(output()),
        };

        conf.sanitize(&diagnostics).unwrap();

        for input in &conf.inputs {
            input.diagnostics().error("bound");
        }
        assert_eq!(errors.messages().len(), 2);
    }

    #[test]
    fn test_semver() {
        assert!(is_semver("0.1.0"));
        assert!(is_semver("4.0.1"));
        assert!(is_semver("1.2.3-beta.1+build.5"));
        assert!(!is_semver(""));
        assert!(!is_semver("4.0"));
        assert!(!is_semver("01.0.0"));
        assert!(!is_semver("v1.0.0"));
    }

    #[test]
    fn test_compatibility() {
        assert!(is_compatible("1.4.0", "1.0.2"));
        assert!(!is_compatible("2.0.0", "1.9.9"));
        assert!(is_compatible("0.1.5", "0.1.0"));
        assert!(!is_compatible("0.2.0", "0.1.0"));
        assert!(!is_compatible("nope", "0.1.0"));
    }

    #[test]
    fn test_load_toml() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir(&src).unwrap();
        let path = temp.path().join("apidoc.toml");
        std::fs::write(
            &path,
            format!(
                "version = \"{}\"\n\n[[inputs]]\ndir = {:?}\nrecursive = true\nlang = \"rust\"\n\n\
                 [output]\ndir = \"doc\"\ngroups = [\"users\"]\n",
                vars::version(),
                src.to_string_lossy()
            ),
        )
        .unwrap();

        let config = Config::load(&path, &Diagnostics::default()).unwrap();

        assert_eq!(config.inputs.len(), 1);
        assert_eq!(config.inputs[0].encoding, "utf-8");
        assert!(config.inputs[0].diagnostics.is_some());
        let output = config.output.unwrap();
        assert_eq!(output.groups, vec!["users"]);
    }

    #[test]
    fn test_load_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("apidoc.yaml");
        std::fs::write(
            &path,
            format!(
                "version: {}\ninputs:\n  - dir: {:?}\n    lang: go\noutput:\n  dir: doc\n",
                vars::version(),
                temp.path().to_string_lossy()
            ),
        )
        .unwrap();

        let config = Config::load(&path, &Diagnostics::default()).unwrap();
        assert_eq!(config.inputs[0].lang, "go");
        assert!(!config.inputs[0].recursive);
    }

    #[test]
    fn test_load_rejects_incompatible_version() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("apidoc.toml");
        std::fs::write(
            &path,
            format!(
                "version = \"99.0.0\"\n\n[[inputs]]\ndir = {:?}\nlang = \"go\"\n\n[output]\ndir = \"doc\"\n",
                temp.path().to_string_lossy()
            ),
        )
        .unwrap();

        let err = Config::load(&path, &Diagnostics::default()).unwrap_err();
        match err {
            Error::Options(e) => assert_eq!(e.field, "version"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_resolves_relative_dirs_against_config_location() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        std::fs::create_dir_all(project.join("src")).unwrap();
        let path = project.join("apidoc.toml");
        std::fs::write(
            &path,
            format!(
                "version = \"{}\"\n\n[[inputs]]\ndir = \"src\"\nlang = \"go\"\n\n[output]\ndir = \"doc\"\n",
                vars::version()
            ),
        )
        .unwrap();

        let config = Config::load(&path, &Diagnostics::default()).unwrap();

        assert_eq!(config.inputs[0].dir, project.join("src"));
        assert_eq!(config.output.unwrap().dir, project.join("doc"));
    }

    #[test]
    fn test_resolve_relative_keeps_absolute_and_empty_dirs() {
        let absolute = std::env::temp_dir();
        let mut conf = Config {
            version: "1.0.0".to_string(),
            inputs: vec![valid_input(&absolute), InputOptions::default()],
            output: Some(output()),
        };

        conf.resolve_relative(Path::new("/base"));

        assert_eq!(conf.inputs[0].dir, absolute);
        assert!(conf.inputs[1].dir.as_os_str().is_empty());
        assert_eq!(conf.output.unwrap().dir, Path::new("/base/doc"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("apidoc.toml");
        std::fs::write(&path, "version = [").unwrap();

        let err = Config::load(&path, &Diagnostics::default()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));

        let err = Config::load(&temp.path().join("missing.toml"), &Diagnostics::default())
            .unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_generate_and_save_round_trip() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("main.go"), "package main").unwrap();

        let generated = Config::generate(temp.path());
        assert_eq!(generated.inputs[0].lang, "go");

        let path = temp.path().join(vars::DEFAULT_CONFIG_FILENAME);
        generated.save(&path).unwrap();

        let loaded = Config::load(&path, &Diagnostics::default()).unwrap();
        assert_eq!(loaded.inputs[0].dir, temp.path());
        assert_eq!(loaded.output.unwrap().dir, temp.path().join("doc"));
    }
}
