//! Configuration constants and settings

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::WalkError;
use super::matcher::SkipRules;

// Directories skipped during recursive walks unless `use_default_skips = false`
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &["node_modules", "vendor", ".git"];

// Configuration file and environment overrides
pub const CONFIG_FILE_NAME: &str = ".got.toml";
pub const SKIP_LIST_ENV: &str = "GOT_SKIP_LIST";
pub const USE_DEFAULT_SKIPS_ENV: &str = "GOT_USE_DEFAULT_SKIPS";
pub const LOG_FILTER_ENV: &str = "GOT_LOG";

// Progress line configuration
//
// The walk may visit thousands of directories per second, so redraws are throttled.
// The ETA is cached on a coarser interval so the estimate doesn't flicker between redraws.
pub const PROGRESS_RENDER_INTERVAL: Duration = Duration::from_millis(50);
pub const ETA_REFRESH_INTERVAL: Duration = Duration::from_secs(1);
pub const PROGRESS_BAR_WIDTH: usize = 30;
pub const PROGRESS_FILLED_CHAR: char = '█';
pub const PROGRESS_EMPTY_CHAR: char = '░';
pub const PROGRESS_TEMPLATE: &str = "{wide_msg}";
pub const ETA_UNKNOWN: &str = "--";

// Spinner shown for mutating operations outside of a walk
pub const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const SPINNER_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";
pub const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

// UI Constants
pub const SCANNING_MESSAGE: &str = "🔍 Recursively scanning directories under";
pub const INTERRUPT_MESSAGE: &str = "Received interrupt signal, cancelling operations...";
pub const WALK_ERROR_CONTEXT: &str = "error walking filepath";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 50;
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 120;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 117;

/// Settings read from `~/.got.toml` (or the file passed with `--config`)
///
/// ```toml
/// skip_list = ["custom_dir", "temp"]
/// use_default_skips = true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GotConfig {
    /// Extra exclusion patterns, matched against whole path segments
    pub skip_list: Vec<String>,
    /// Whether [`DEFAULT_SKIP_PATTERNS`] are merged in (defaults to true)
    pub use_default_skips: Option<bool>,
}

impl GotConfig {
    /// Parses configuration from TOML text
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, WalkError> {
        toml::from_str(content).map_err(|e| WalkError::Config {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })
    }

    /// Loads the configuration file
    ///
    /// An explicit path must exist. The default `~/.got.toml` is optional and
    /// a missing file simply yields the default configuration.
    /// Returns the configuration and the file it was read from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), WalkError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok((Self::default(), None)),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok((Self::from_toml(&path, &content)?, Some(path))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok((Self::default(), None))
            }
            Err(e) => Err(WalkError::Config {
                path,
                reason: e.to_string(),
            }),
        }
    }

    /// Applies `GOT_SKIP_LIST` and `GOT_USE_DEFAULT_SKIPS` from the process environment
    pub fn apply_env(&mut self) {
        let skip_list = std::env::var(SKIP_LIST_ENV).ok();
        let use_defaults = std::env::var(USE_DEFAULT_SKIPS_ENV).ok();
        self.apply_overrides(skip_list.as_deref(), use_defaults.as_deref());
    }

    /// Applies raw override values; the skip list is comma-separated and appended
    pub fn apply_overrides(&mut self, skip_list: Option<&str>, use_default_skips: Option<&str>) {
        if let Some(list) = skip_list {
            self.skip_list
                .extend(list.split(',').map(str::to_string));
        }

        if let Some(value) = use_default_skips {
            match parse_bool(value) {
                Some(flag) => self.use_default_skips = Some(flag),
                None => tracing::warn!(
                    value,
                    "ignoring {USE_DEFAULT_SKIPS_ENV}: expected true/false"
                ),
            }
        }
    }

    /// Flattens this configuration into the rule set consumed by the walker
    pub fn skip_rules(&self) -> SkipRules {
        SkipRules::new(&self.skip_list, self.use_default_skips.unwrap_or(true))
    }
}

/// Returns `~/.got.toml`, or None when no home directory can be resolved
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = GotConfig::from_toml(
            Path::new("test.toml"),
            "skip_list = [\"temp\", \"build\"]\nuse_default_skips = false\n",
        )
        .expect("config should parse");

        assert_eq!(config.skip_list, vec!["temp", "build"]);
        assert_eq!(config.use_default_skips, Some(false));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GotConfig::from_toml(Path::new("test.toml"), "").unwrap();
        let rules = config.skip_rules();
        for pattern in DEFAULT_SKIP_PATTERNS {
            assert!(rules.patterns().iter().any(|p| p == pattern));
        }
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = GotConfig::from_toml(Path::new("bad.toml"), "skiplist = [\"x\"]").unwrap_err();
        assert!(matches!(err, WalkError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(GotConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("got.toml");
        std::fs::write(&path, "skip_list = [\"scratch\"]\n").unwrap();

        let (config, used) = GotConfig::load(Some(&path)).unwrap();
        assert_eq!(config.skip_list, vec!["scratch"]);
        assert_eq!(used.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_overrides_append_and_toggle_defaults() {
        let mut config = GotConfig {
            skip_list: vec!["a".to_string()],
            use_default_skips: None,
        };
        config.apply_overrides(Some("b, c"), Some("false"));

        let rules = config.skip_rules();
        assert_eq!(rules.patterns(), &["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_bool_override_is_ignored() {
        let mut config = GotConfig::default();
        config.apply_overrides(None, Some("maybe"));
        assert_eq!(config.use_default_skips, None);
    }
}
