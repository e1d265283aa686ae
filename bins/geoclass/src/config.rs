//! Configuration file loading

use anyhow::{Context, Result};
use geoclass_geo::{Form, Language, Unit};
use geoclass_telemetry::TelemetryConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `geoclass.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigSchema {
    pub defaults: Defaults,
    pub telemetry: TelemetryConfig,
}

/// Output defaults, overridable per invocation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub unit: String,
    pub language: String,
    pub form: String,
    pub decimal_places: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            unit: "km".to_string(),
            language: "en".to_string(),
            form: "short".to_string(),
            decimal_places: 3,
        }
    }
}

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Effective settings after applying command-line overrides
    pub fn settings(&self, unit: Option<&str>, language: Option<&str>, form: Option<&str>) -> Result<Settings> {
        let defaults = &self.schema.defaults;
        let unit: Unit = unit.unwrap_or(defaults.unit.as_str()).parse()?;
        Ok(Settings {
            unit,
            language: Language::from_code(language.unwrap_or(defaults.language.as_str())),
            form: Form::from_name(form.unwrap_or(defaults.form.as_str())),
            decimal_places: defaults.decimal_places,
        })
    }
}

/// Resolved output settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub unit: Unit,
    pub language: Language,
    pub form: Form,
    pub decimal_places: u32,
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["geoclass.toml", ".geoclass.toml", ".config/geoclass.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.defaults.decimal_places, 3);

        let settings = config.settings(None, None, None).unwrap();
        assert_eq!(settings.unit, Unit::Kilometer);
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.form, Form::Short);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\nunit = \"mi\"\nlanguage = \"de\"\n\n[telemetry]\nlog_level = \"debug\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.telemetry.log_level, "debug");

        let settings = config.settings(None, None, Some("long")).unwrap();
        assert_eq!(settings.unit, Unit::Mile);
        assert_eq!(settings.language, Language::De);
        assert_eq!(settings.form, Form::Long);
    }

    #[test]
    fn test_overrides_win() {
        let settings = Config::default().settings(Some("ft"), Some("de"), None).unwrap();
        assert_eq!(settings.unit, Unit::Foot);
        assert_eq!(settings.language, Language::De);
    }

    #[test]
    fn test_unknown_unit() {
        assert!(Config::default().settings(Some("furlong"), None, None).is_err());
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/geoclass.toml")));
        assert!(result.is_err());
    }
}
