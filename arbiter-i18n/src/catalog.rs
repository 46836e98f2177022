//! Message Resources
//!
//! A [`Catalog`] holds the templates of one bundle (one base name in one
//! locale). [`Resources`] indexes catalogs by bundle name, the base name
//! joined with the locale suffix the way resource files are named:
//! `arbiter/messages`, `arbiter/messages_en`, `arbiter/messages_pt_BR`.

use crate::{I18nError, Locale, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the bundle holding `base_name` messages for `locale`.
///
/// ```
/// use arbiter_i18n::{bundle_name, Locale};
///
/// assert_eq!(bundle_name("messages", &Locale::pt_br()), "messages_pt_BR");
/// assert_eq!(bundle_name("messages", &Locale::root()), "messages");
/// ```
pub fn bundle_name(base_name: &str, locale: &Locale) -> String {
    let suffix = locale.bundle_suffix();
    if suffix.is_empty() {
        base_name.to_string()
    } else {
        format!("{}_{}", base_name, suffix)
    }
}

/// Templates of a single bundle, keyed by dotted message key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON.
    ///
    /// Nested objects are flattened into dotted keys, so
    /// `{"arbiter": {"constraints": {"NotNull": {"message": "..."}}}}` and
    /// `{"arbiter.constraints.NotNull.message": "..."}` are equivalent.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(root) = data else {
            return Err(I18nError::ParseError(
                "message resource must be a JSON object".to_string(),
            ));
        };

        let mut catalog = Self::new();
        for (key, value) in root {
            catalog.insert_json(key, value)?;
        }
        Ok(catalog)
    }

    fn insert_json(&mut self, key: String, value: serde_json::Value) -> Result<()> {
        match value {
            serde_json::Value::String(s) => {
                self.messages.insert(key, s);
            }
            serde_json::Value::Object(obj) => {
                for (child, value) in obj {
                    self.insert_json(format!("{}.{}", key, child), value)?;
                }
            }
            other => {
                return Err(I18nError::ParseError(format!(
                    "message '{}' must be a string, found {}",
                    key, other
                )));
            }
        }
        Ok(())
    }

    /// Add a message.
    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Builder-style [`Catalog::add`].
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(key, message);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Copy every entry of `other` into this catalog, overriding duplicates.
    pub fn merge(&mut self, other: Catalog) {
        self.messages.extend(other.messages);
    }
}

/// All catalogs known to a message lookup, keyed by bundle name.
///
/// Built once, then shared read-only; [`crate::MessageBundle`] borrows it.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    bundles: HashMap<String, Catalog>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the catalog of `base_name` for `locale`, merging with any
    /// catalog already registered under the same bundle name.
    pub fn add(&mut self, base_name: &str, locale: &Locale, catalog: Catalog) {
        self.bundles
            .entry(bundle_name(base_name, locale))
            .or_default()
            .merge(catalog);
    }

    /// Builder-style [`Resources::add`].
    pub fn with(mut self, base_name: &str, locale: &Locale, catalog: Catalog) -> Self {
        self.add(base_name, locale, catalog);
        self
    }

    /// Register a JSON catalog.
    pub fn add_json(&mut self, base_name: &str, locale: &Locale, json: &str) -> Result<()> {
        let catalog = Catalog::from_json(json)?;
        self.add(base_name, locale, catalog);
        Ok(())
    }

    /// Merge every bundle of `other` into this set.
    pub fn extend(&mut self, other: &Resources) {
        for (name, catalog) in &other.bundles {
            self.bundles
                .entry(name.clone())
                .or_default()
                .merge(catalog.clone());
        }
    }

    /// Load `<base_name>[_<locale>].json` files from a directory.
    ///
    /// Expected structure:
    /// - `i18n/messages.json` (default bundle)
    /// - `i18n/messages_en.json`
    /// - `i18n/messages_pt_BR.json`
    ///
    /// Returns the number of bundles loaded. Files of other base names are
    /// ignored.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>, base_name: &str) -> Result<usize> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(I18nError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Directory not found: {:?}", dir),
            )));
        }

        // base names may contain a path ("arbiter/messages"); files use the last segment
        let file_base = base_name.rsplit('/').next().unwrap_or(base_name);
        let mut loaded = 0;

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| I18nError::ParseError(format!("Invalid filename: {:?}", path)))?;

            let locale = if stem == file_base {
                Locale::root()
            } else if let Some(suffix) = stem
                .strip_prefix(file_base)
                .and_then(|rest| rest.strip_prefix('_'))
            {
                Locale::parse(suffix)?
            } else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            self.add_json(base_name, &locale, &content)?;
            arbiter_log::debug!(
                target: "arbiter::i18n",
                "Loaded bundle {} from {:?}",
                bundle_name(base_name, &locale),
                path
            );
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Catalog registered under an exact bundle name.
    pub fn bundle(&self, bundle_name: &str) -> Option<&Catalog> {
        self.bundles.get(bundle_name)
    }

    /// Names of every registered bundle.
    pub fn bundle_names(&self) -> impl Iterator<Item = &String> {
        self.bundles.keys()
    }
}
