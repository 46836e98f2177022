//! Locale Representation and Accept-Language Parsing

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A locale (language + optional script and region).
///
/// The language-neutral root locale ([`Locale::root`]) has an empty language
/// and selects the default message bundle.
///
/// # Examples
///
/// ```
/// use arbiter_i18n::Locale;
///
/// let pt_br: Locale = "pt-BR".parse().unwrap();
/// assert_eq!(pt_br, Locale::pt_br());
/// assert_eq!(pt_br.bundle_suffix(), "pt_BR");
/// assert!(Locale::root().is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language code (ISO 639-1, e.g., "en", "pt"); empty for the root locale
    pub language: String,
    /// Optional script (e.g., "Latn", "Hans")
    pub script: Option<String>,
    /// Optional region code (ISO 3166-1, e.g., "US", "BR")
    pub region: Option<String>,
}

impl Locale {
    /// Create a new locale.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            script: None,
            region: region.map(|r| r.into().to_uppercase()),
        }
    }

    /// The language-neutral locale.
    pub fn root() -> Self {
        Self {
            language: String::new(),
            script: None,
            region: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }

    /// Parse from a BCP 47 tag (e.g., "en-US", "pt_BR", "zh-Hans-CN").
    pub fn parse(tag: &str) -> Result<Self> {
        let parts: Vec<&str> = tag.trim().split(['-', '_']).collect();

        let language = parts[0].to_lowercase();
        if language.len() < 2
            || language.len() > 3
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for part in parts.iter().skip(1) {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                script = Some(title_case(part));
            } else if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(part.to_uppercase());
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) {
                // UN M.49 area code
                region = Some(part.to_string());
            } else {
                return Err(I18nError::InvalidLocale(tag.to_string()));
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// The BCP 47 tag (e.g., "pt-BR"); empty for the root locale.
    pub fn tag(&self) -> String {
        self.joined('-')
    }

    /// Suffix appended to a resource base name (e.g., "pt_BR"); empty for root.
    pub fn bundle_suffix(&self) -> String {
        self.joined('_')
    }

    fn joined(&self, sep: char) -> String {
        let mut tag = self.language.clone();
        for part in [&self.script, &self.region].into_iter().flatten() {
            tag.push(sep);
            tag.push_str(part);
        }
        tag
    }

    /// Language-only locale (strips script and region).
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: None,
            region: None,
        }
    }

    /// Locales to search, most specific first, always ending with the root.
    ///
    /// `zh-Hans-CN` yields `zh-Hans-CN`, `zh-CN`, `zh-Hans`, `zh`, root.
    pub fn fallback_chain(&self) -> Vec<Locale> {
        let mut chain: Vec<Locale> = Vec::with_capacity(4);
        let mut push = |locale: Locale| {
            if !chain.contains(&locale) {
                chain.push(locale);
            }
        };

        if !self.is_root() {
            push(self.clone());
            if self.script.is_some() && self.region.is_some() {
                push(Locale {
                    script: None,
                    ..self.clone()
                });
            }
            if self.script.is_some() {
                push(Locale {
                    region: None,
                    ..self.clone()
                });
            }
            push(self.language_only());
        }
        push(Locale::root());
        chain
    }

    /// Calculate match score (higher is better).
    ///
    /// - 100: Exact match
    /// - 50: Language + region match
    /// - 25: Language + script match
    /// - 10: Language only match
    /// - 0: No match
    pub fn match_score(&self, other: &Locale) -> u32 {
        if self.language != other.language || self.is_root() {
            return 0;
        }

        if self == other {
            return 100;
        }

        let mut score = 10;
        if self.region.is_some() && self.region == other.region {
            score += 40;
        }
        if self.script.is_some() && self.script == other.script {
            score += 15;
        }
        score
    }

    /// English (no region)
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// Portuguese (no region)
    pub fn pt() -> Self {
        Self::new("pt", None::<&str>)
    }

    /// Portuguese (Brazil)
    pub fn pt_br() -> Self {
        Self::new("pt", Some("BR"))
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            f.write_str(&self.tag())
        }
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    /// Like [`Locale::parse`], but also accepts "", "root" and "default".
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "root" | "default" => Ok(Locale::root()),
            tag => Locale::parse(tag),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::root()
    }
}

// ============================================================================
// Accept-Language Parsing
// ============================================================================

#[derive(Debug, Clone)]
struct AcceptLanguageEntry {
    locale: Locale,
    quality: f32,
}

/// Parse an Accept-Language header into a list of locales.
///
/// Returns locales sorted by quality (highest first); entries with equal
/// quality keep header order. Wildcards, `q=0` and malformed tags are skipped.
///
/// # Example
///
/// ```
/// use arbiter_i18n::parse_accept_language;
///
/// let locales = parse_accept_language("pt-BR,pt;q=0.9,en;q=0.8,*;q=0.1");
/// assert_eq!(locales.len(), 3);
/// assert_eq!(locales[0].tag(), "pt-BR");
/// assert_eq!(locales[2].tag(), "en");
/// ```
pub fn parse_accept_language(header: &str) -> Vec<Locale> {
    let mut entries: Vec<AcceptLanguageEntry> = header
        .split(',')
        .filter_map(|part| {
            let mut split = part.trim().splitn(2, ';');
            let tag = split.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = split
                .next()
                .and_then(|q| q.trim().strip_prefix("q=").map(str::to_owned))
                .map(|q| q.trim().parse::<f32>().unwrap_or(0.0))
                .unwrap_or(1.0);
            if quality <= 0.0 {
                return None;
            }

            let locale = Locale::parse(tag).ok()?;
            Some(AcceptLanguageEntry { locale, quality })
        })
        .collect();

    // stable: equal qualities keep their order
    entries.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(Ordering::Equal)
    });

    entries.into_iter().map(|e| e.locale).collect()
}

/// Negotiate the best locale from available locales.
///
/// For each requested locale in preference order, an exact match wins, then
/// the best-scoring available locale of the same language. Falls back to
/// `default` when nothing matches.
///
/// # Example
///
/// ```
/// use arbiter_i18n::{negotiate_locale, parse_accept_language, Locale};
///
/// let available = vec![Locale::en(), Locale::pt_br()];
/// let requested = parse_accept_language("pt-PT,pt;q=0.9,en;q=0.8");
/// let default = Locale::root();
///
/// let best = negotiate_locale(&requested, &available, &default);
/// assert_eq!(best.tag(), "pt-BR");
/// ```
pub fn negotiate_locale<'a>(
    requested: &[Locale],
    available: &'a [Locale],
    default: &'a Locale,
) -> &'a Locale {
    for req in requested {
        if let Some(locale) = available.iter().find(|a| *a == req) {
            return locale;
        }

        if let Some(locale) = best_match(req, available) {
            return locale;
        }
    }

    default
}

/// Find the best matching locale using scores.
pub fn best_match<'a>(requested: &Locale, available: &'a [Locale]) -> Option<&'a Locale> {
    let mut best: Option<(&Locale, u32)> = None;

    for locale in available {
        let score = locale.match_score(requested);
        if score == 0 {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((locale, score)),
        }
    }

    best.map(|(l, _)| l)
}
