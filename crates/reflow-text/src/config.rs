use regex::Regex;

use crate::ConfigError;

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ListOverride::Default)
    }
}

/// Vocabularies and patterns consumed by the [`Normalizer`](crate::Normalizer).
///
/// `None`/`ListOverride::Default` means "use the built-in default". Use
/// [`NormalizerConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    // ── symbols.rs ──
    /// Glyphs deleted by the symbol-stripping step.
    pub(crate) symbol_re: Option<Regex>,

    // ── sections.rs ──
    /// Section names that get a colon and a forced paragraph break.
    pub(crate) section_headers: ListOverride<String>,

    // ── hyphenation.rs ──
    /// Compound-word suffixes that should preserve the hyphen.
    pub(crate) compound_suffixes: ListOverride<String>,
}

/// Builder for [`NormalizerConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with [`ConfigError::InvalidPattern`] if a pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfigBuilder {
    symbol_pattern: Option<String>,
    section_headers: ListOverride<String>,
    compound_suffixes: ListOverride<String>,
}

impl NormalizerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Symbols ──

    pub fn symbol_pattern(mut self, pattern: &str) -> Self {
        self.symbol_pattern = Some(pattern.to_string());
        self
    }

    // ── Section headers ──

    pub fn set_section_headers(mut self, headers: Vec<String>) -> Self {
        self.section_headers = ListOverride::Replace(headers);
        self
    }

    /// Add a header to the vocabulary. After [`set_section_headers`](Self::set_section_headers)
    /// the header joins the replacement list; otherwise it extends the defaults.
    pub fn add_section_header(mut self, header: String) -> Self {
        match &mut self.section_headers {
            ListOverride::Replace(v) | ListOverride::Extend(v) => v.push(header),
            ListOverride::Default => self.section_headers = ListOverride::Extend(vec![header]),
        }
        self
    }

    // ── Compound suffixes ──

    pub fn set_compound_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.compound_suffixes = ListOverride::Replace(suffixes);
        self
    }

    pub fn add_compound_suffix(mut self, suffix: String) -> Self {
        match &mut self.compound_suffixes {
            ListOverride::Replace(v) | ListOverride::Extend(v) => v.push(suffix),
            ListOverride::Default => self.compound_suffixes = ListOverride::Extend(vec![suffix]),
        }
        self
    }

    /// Compile the symbol pattern and produce a [`NormalizerConfig`].
    pub fn build(self) -> Result<NormalizerConfig, ConfigError> {
        let symbol_re = self.symbol_pattern.map(|p| Regex::new(&p)).transpose()?;
        Ok(NormalizerConfig {
            symbol_re,
            section_headers: self.section_headers,
            compound_suffixes: self.compound_suffixes,
        })
    }
}
