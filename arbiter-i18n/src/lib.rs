//! Internationalization support for Arbiter
//!
//! - **Locales**: BCP 47 parsing, Accept-Language negotiation and the
//!   `lang_REGION -> lang -> default` fallback chain
//! - **Resources**: per-locale message catalogs loaded from JSON
//! - **Message bundles**: template lookup through the fallback chain
//! - **Interpolation**: `{name}` placeholder substitution
//! - **Number formatting**: locale-aware separators
//!
//! # Quick Start
//!
//! ```rust
//! use arbiter_i18n::{interpolate, Catalog, Locale, MessageBundle, Resources};
//! use std::collections::HashMap;
//!
//! let resources = Resources::new()
//!     .with("messages", &Locale::root(), Catalog::new().with("greater", "Must be greater than {value}"))
//!     .with("messages", &Locale::pt_br(), Catalog::new().with("greater", "Deve ser maior que {value}"));
//!
//! let bundle = MessageBundle::new(&resources, "messages", Locale::pt_br());
//! let template = bundle.get_message("greater")?;
//! let params = HashMap::from([("value".to_string(), "10".to_string())]);
//! assert_eq!(interpolate(&template, &params), "Deve ser maior que 10");
//! # Ok::<(), arbiter_i18n::I18nError>(())
//! ```

mod bundle;
mod catalog;
mod error;
mod format;
mod interpolate;
mod locale;

pub use bundle::MessageBundle;
pub use catalog::{Catalog, Resources, bundle_name};
pub use error::I18nError;
pub use format::{NumberFormatter, format_integer, format_number, number_separators};
pub use interpolate::{interpolate, interpolate_with};
pub use locale::{Locale, best_match, negotiate_locale, parse_accept_language};

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Catalog, I18nError, Locale, MessageBundle, Resources, Result, format_number, interpolate,
        negotiate_locale, parse_accept_language,
    };
}
