//! Handler configuration
//!
//! [`ValidationConfig`] can be built in code, read from environment variables
//! (with `.env` support) or loaded from a JSON or TOML file:
//!
//! ```toml
//! bundle_base_name = "app/messages"
//! default_locale = "en"
//! supported_locales = ["en", "pt-BR"]
//! ```

use crate::error::{ConfigError, Result};
use arbiter_i18n::Locale;
use arbiter_validation::DEFAULT_BASE_NAME;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Detect the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Settings of a [`ValidationExceptionHandler`](crate::ValidationExceptionHandler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Base name of the message bundles; the built-in bundles are always
    /// consulted after it.
    pub bundle_base_name: String,
    /// Locale used when negotiation finds no supported locale.
    pub default_locale: Locale,
    /// Locales offered to clients through `Accept-Language`.
    pub supported_locales: Vec<Locale>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            bundle_base_name: DEFAULT_BASE_NAME.to_string(),
            default_locale: Locale::root(),
            supported_locales: vec![Locale::en(), Locale::pt_br()],
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.bundle_base_name = base_name.into();
        self
    }

    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn with_supported_locales(mut self, locales: impl IntoIterator<Item = Locale>) -> Self {
        self.supported_locales = locales.into_iter().collect();
        self
    }

    /// Load from `<PREFIX>_BUNDLE_BASE_NAME`, `<PREFIX>_DEFAULT_LOCALE` and
    /// `<PREFIX>_SUPPORTED_LOCALES` (comma separated), after reading `.env`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env(prefix: &str) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(prefix, |key| env::var(key).ok())
    }

    /// Load a `.env` style file and then read the environment like
    /// [`from_env`](Self::from_env).
    pub fn from_env_file(path: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        dotenvy::from_path(path.as_ref())
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_vars(prefix, |key| env::var(key).ok())
    }

    fn from_vars(prefix: &str, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key = |name: &str| format!("{}_{}", prefix.to_uppercase(), name);
        let mut config = Self::default();

        if let Some(base_name) = var(&key("BUNDLE_BASE_NAME")) {
            config.bundle_base_name = base_name;
        }

        if let Some(tag) = var(&key("DEFAULT_LOCALE")) {
            config.default_locale = parse_locale(&key("DEFAULT_LOCALE"), &tag)?;
        }

        if let Some(list) = var(&key("SUPPORTED_LOCALES")) {
            let name = key("SUPPORTED_LOCALES");
            config.supported_locales = list
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(|tag| parse_locale(&name, tag))
                .collect::<Result<_>>()?;
        }

        config.validated()
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str::<Self>(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON: {}", e)))?
            .validated()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML: {}", e)))?
            .validated()
    }

    /// Load a JSON or TOML file, picking the format from its extension.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_extension(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let content = std::fs::read_to_string(path)?;

        arbiter_log::debug!(
            target: "arbiter::http",
            "Loading validation config from {}",
            path.display()
        );

        match format {
            FileFormat::Json => Self::from_json_str(&content),
            FileFormat::Toml => Self::from_toml_str(&content),
        }
    }

    fn validated(self) -> Result<Self> {
        if self.bundle_base_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "bundle_base_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}

fn parse_locale(key: &str, tag: &str) -> Result<Locale> {
    tag.parse().map_err(|e: arbiter_i18n::I18nError| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.bundle_base_name, "arbiter/messages");
        assert!(config.default_locale.is_root());
        assert_eq!(config.supported_locales, vec![Locale::en(), Locale::pt_br()]);
    }

    #[test]
    fn test_from_env() {
        unsafe {
            std::env::set_var("ARBITER_TEST_ENV_BUNDLE_BASE_NAME", "app/messages");
            std::env::set_var("ARBITER_TEST_ENV_SUPPORTED_LOCALES", "en-US, pt-BR,");
        }

        let config = ValidationConfig::from_env("arbiter_test_env").unwrap();
        assert_eq!(config.bundle_base_name, "app/messages");
        assert_eq!(config.supported_locales, vec![Locale::en_us(), Locale::pt_br()]);
        assert!(config.default_locale.is_root());

        unsafe {
            std::env::remove_var("ARBITER_TEST_ENV_BUNDLE_BASE_NAME");
            std::env::remove_var("ARBITER_TEST_ENV_SUPPORTED_LOCALES");
        }
    }

    #[test]
    fn test_from_env_rejects_bad_locale() {
        unsafe {
            std::env::set_var("ARBITER_TEST_BAD_DEFAULT_LOCALE", "!!");
        }

        let err = ValidationConfig::from_env("ARBITER_TEST_BAD").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "ARBITER_TEST_BAD_DEFAULT_LOCALE"));

        unsafe {
            std::env::remove_var("ARBITER_TEST_BAD_DEFAULT_LOCALE");
        }
    }

    #[test]
    fn test_from_toml_str() {
        let config = ValidationConfig::from_toml_str(
            r#"
            bundle_base_name = "hr/messages"
            default_locale = "en"
            "#,
        )
        .unwrap();

        assert_eq!(config.bundle_base_name, "hr/messages");
        assert_eq!(config.default_locale, Locale::en());
        assert_eq!(config.supported_locales, vec![Locale::en(), Locale::pt_br()]);
    }

    #[test]
    fn test_from_json_str() {
        let config =
            ValidationConfig::from_json_str(r#"{"supported_locales": ["pt_BR"]}"#).unwrap();
        assert_eq!(config.supported_locales, vec![Locale::pt_br()]);

        assert!(matches!(
            ValidationConfig::from_json_str(r#"{"bundle_base_name": " "}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            ValidationConfig::from_json_str("{"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("validation.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"supported_locales = ["en"]"#).unwrap();
        let config = ValidationConfig::load_file(&path).unwrap();
        assert_eq!(config.supported_locales, vec![Locale::en()]);

        let path = dir.path().join("validation.yaml");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            ValidationConfig::load_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "ARBITER_TEST_FILE_DEFAULT_LOCALE=pt-BR\n").unwrap();

        let config = ValidationConfig::from_env_file(&path, "ARBITER_TEST_FILE").unwrap();
        assert_eq!(config.default_locale, Locale::pt_br());

        unsafe {
            std::env::remove_var("ARBITER_TEST_FILE_DEFAULT_LOCALE");
        }
    }
}
