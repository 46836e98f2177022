// Arbiter - declarative object validation for Rust
//
// Describe constraints on an object graph, collect every violation in one
// pass and render them as localized messages or a 422 response.

// Re-export validation functionality
pub use arbiter_validation::*;

// Re-export supporting crates
pub use arbiter_i18n as i18n_core;
pub use arbiter_log as log;

pub use arbiter_i18n::{Catalog, I18nError, Locale, MessageBundle, Resources};

#[cfg(feature = "http")]
pub use arbiter_http as http;

// Prelude for common imports
pub mod prelude {
    pub use arbiter_i18n::{I18nError, Locale};
    pub use arbiter_validation::prelude::*;

    #[cfg(feature = "http")]
    pub use arbiter_http::prelude::*;
}
