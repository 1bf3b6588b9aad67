//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables prefixed `POLYFORGE__`, e.g.
//!    `POLYFORGE__OUTPUT__DIRECTORY=./out`
//! 3. `--config <FILE>` if given, otherwise `./polyforge.toml` over the
//!    platform config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use polyforge_core::domain::ProjectMetadata;

/// File name used for the local config in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "polyforge.toml";

const ENV_PREFIX: &str = "POLYFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Git identity applied to requests that leave it out.
    pub git: GitDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory project directories are created in.
    pub directory: PathBuf,
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Directory of `template.toml` templates overriding the built-in ones.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitDefaults {
    pub platform_name: Option<String>,
    pub platform_url: Option<String>,
    pub platform_user_name: Option<String>,
}

impl GitDefaults {
    /// Fill the git fields `metadata` leaves empty.
    pub fn apply(&self, metadata: &mut ProjectMetadata) {
        fill(&mut metadata.git_platform_name, &self.platform_name);
        fill(&mut metadata.git_platform_url, &self.platform_url);
        fill(&mut metadata.git_platform_user_name, &self.platform_user_name);
    }
}

fn fill(field: &mut Option<String>, default: &Option<String>) {
    let empty = field.as_deref().is_none_or(|v| v.trim().is_empty());
    if empty && default.is_some() {
        field.clone_from(default);
    }
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("failed to encode default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        builder = match config_file {
            Some(path) => builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            ),
            None => builder
                .add_source(
                    config::File::from(Self::config_path())
                        .format(config::FileFormat::Toml)
                        .required(false),
                )
                .add_source(
                    config::File::from(Path::new(LOCAL_CONFIG_FILE))
                        .format(config::FileFormat::Toml)
                        .required(false),
                ),
        };

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the platform configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `polyforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "polyforge", "polyforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Value of a dotted key, rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let display = |v: &Option<String>| v.clone().unwrap_or_default();
        let value = match key {
            "output.directory" => self.output.directory.display().to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "templates.local_path" => self
                .templates
                .local_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "git.platform_name" => display(&self.git.platform_name),
            "git.platform_url" => display(&self.git.platform_url),
            "git.platform_user_name" => display(&self.git.platform_user_name),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_directory_is_cwd() {
        assert_eq!(AppConfig::default().output.directory, PathBuf::from("."));
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[output]\ndirectory = \"generated\"\n\n[git]\nplatform_user_name = \"octo\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.output.directory, PathBuf::from("generated"));
        assert_eq!(cfg.output.format, "human");
        assert_eq!(cfg.git.platform_user_name.as_deref(), Some("octo"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn git_defaults_fill_only_empty_fields() {
        let defaults = GitDefaults {
            platform_name: Some("github".into()),
            platform_url: None,
            platform_user_name: Some("fallback".into()),
        };
        let mut metadata = ProjectMetadata::default().with_git_platform_user_name("octo");
        defaults.apply(&mut metadata);

        assert_eq!(metadata.git_platform_user_name.as_deref(), Some("octo"));
        assert_eq!(metadata.git_platform_name.as_deref(), Some("github"));
        assert_eq!(metadata.git_platform_url, None);

        let mut blank = ProjectMetadata::default().with_git_platform_user_name("  ");
        defaults.apply(&mut blank);
        assert_eq!(blank.git_platform_user_name.as_deref(), Some("fallback"));
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("git.platform_user_name").as_deref(), Some(""));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
