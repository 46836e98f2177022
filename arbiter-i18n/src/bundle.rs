//! Locale-scoped message lookup with fallback.

use crate::{I18nError, Locale, Resources, Result, bundle_name};

/// Source of message templates for one base name and locale.
///
/// Lookups walk the chain `base_lang_REGION -> base_lang -> base`, then the
/// same chain for the fallback base name when one is set. The chain always
/// ends with a language-neutral bundle.
///
/// ```
/// use arbiter_i18n::{Catalog, Locale, MessageBundle, Resources};
///
/// let resources = Resources::new()
///     .with("messages", &Locale::root(), Catalog::new().with("hello", "Hello"))
///     .with("messages", &Locale::pt(), Catalog::new().with("hello", "Olá"));
///
/// let bundle = MessageBundle::new(&resources, "messages", Locale::pt_br());
/// assert_eq!(bundle.get_message("hello").unwrap(), "Olá");
/// ```
#[derive(Debug, Clone)]
pub struct MessageBundle<'r> {
    resources: &'r Resources,
    base_name: String,
    locale: Locale,
    fallback_base_name: Option<String>,
}

impl<'r> MessageBundle<'r> {
    pub fn new(resources: &'r Resources, base_name: impl Into<String>, locale: Locale) -> Self {
        Self {
            resources,
            base_name: base_name.into(),
            locale,
            fallback_base_name: None,
        }
    }

    /// Consult `base_name` after the primary base name is exhausted.
    pub fn with_fallback(mut self, base_name: impl Into<String>) -> Self {
        let base_name = base_name.into();
        if base_name != self.base_name {
            self.fallback_base_name = Some(base_name);
        }
        self
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn resources(&self) -> &'r Resources {
        self.resources
    }

    /// Bundle names searched, in order.
    pub fn chain(&self) -> Vec<String> {
        let locales = self.locale.fallback_chain();
        std::iter::once(&self.base_name)
            .chain(self.fallback_base_name.as_ref())
            .flat_map(|base| locales.iter().map(move |locale| bundle_name(base, locale)))
            .collect()
    }

    /// Find a template, or `None` when no bundle in the chain has the key.
    pub fn find(&self, key: &str) -> Option<&'r str> {
        let resources = self.resources;
        for (depth, name) in self.chain().iter().enumerate() {
            if let Some(message) = resources.bundle(name).and_then(|c| c.get(key)) {
                if depth > 0 {
                    arbiter_log::trace!(
                        target: "arbiter::i18n",
                        "Resolved {} from fallback bundle {}",
                        key,
                        name
                    );
                }
                return Some(message);
            }
        }
        None
    }

    /// Resolve a template.
    ///
    /// Fails with [`I18nError::MessageNotFound`] carrying the full chain when
    /// no bundle defines `key`.
    pub fn get_message(&self, key: &str) -> Result<String> {
        self.find(key).map(str::to_string).ok_or_else(|| {
            let chain = self.chain();
            arbiter_log::warn!(
                target: "arbiter::i18n",
                "Message {} not found in {}",
                key,
                chain.join(", ")
            );
            I18nError::MessageNotFound {
                key: key.to_string(),
                chain,
            }
        })
    }

    /// Resolve a template, using `default` when no bundle defines `key`.
    pub fn get_message_or(&self, key: &str, default: &str) -> String {
        self.find(key).unwrap_or(default).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn resources() -> Resources {
        Resources::new()
            .with(
                "app",
                &Locale::root(),
                Catalog::new()
                    .with("only.default", "default")
                    .with("everywhere", "default everywhere"),
            )
            .with("app", &Locale::pt(), Catalog::new().with("everywhere", "pt everywhere"))
            .with(
                "app",
                &Locale::pt_br(),
                Catalog::new().with("only.pt_br", "pt-BR only"),
            )
            .with("lib", &Locale::root(), Catalog::new().with("lib.key", "from lib"))
            .with("lib", &Locale::pt_br(), Catalog::new().with("everywhere", "lib pt-BR"))
    }

    #[test]
    fn test_chain_for_region_locale() {
        let resources = resources();
        let bundle = MessageBundle::new(&resources, "app", Locale::pt_br()).with_fallback("lib");
        assert_eq!(
            bundle.chain(),
            vec!["app_pt_BR", "app_pt", "app", "lib_pt_BR", "lib_pt", "lib"]
        );
    }

    #[test]
    fn test_most_specific_wins() {
        let resources = resources();
        let bundle = MessageBundle::new(&resources, "app", Locale::pt_br());
        assert_eq!(bundle.get_message("only.pt_br").unwrap(), "pt-BR only");
        assert_eq!(bundle.get_message("everywhere").unwrap(), "pt everywhere");
    }

    #[test]
    fn test_falls_back_to_default_bundle() {
        let resources = resources();
        let bundle = MessageBundle::new(&resources, "app", Locale::pt_br());
        assert_eq!(bundle.get_message("only.default").unwrap(), "default");
    }

    #[test]
    fn test_primary_base_default_beats_fallback_base_locale() {
        let resources = resources();
        let bundle = MessageBundle::new(&resources, "app", Locale::pt_br()).with_fallback("lib");
        assert_eq!(bundle.get_message("everywhere").unwrap(), "pt everywhere");
        assert_eq!(bundle.get_message("lib.key").unwrap(), "from lib");
    }

    #[test]
    fn test_unshipped_locale_uses_default() {
        let resources = resources();
        let bundle = MessageBundle::new(&resources, "app", Locale::new("de", Some("AT")));
        assert_eq!(bundle.get_message("everywhere").unwrap(), "default everywhere");
    }

    #[test]
    fn test_message_not_found_reports_chain() {
        let resources = resources();
        let bundle = MessageBundle::new(&resources, "app", Locale::en());
        let err = bundle.get_message("missing").unwrap_err();
        match err {
            I18nError::MessageNotFound { key, chain } => {
                assert_eq!(key, "missing");
                assert_eq!(chain, vec!["app_en", "app"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(bundle.get_message_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_same_fallback_base_is_ignored() {
        let resources = resources();
        let bundle = MessageBundle::new(&resources, "app", Locale::root()).with_fallback("app");
        assert_eq!(bundle.chain(), vec!["app"]);
    }
}
