use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NormalizerConfig;
use crate::hyphenation::{DEFAULT_COMPOUND_SUFFIXES, default_suffix_set, fix_hyphenation};
use crate::sections::{DEFAULT_HEADER_RE, DEFAULT_SECTION_HEADERS, header_regex, space_section_headers};
use crate::symbols::{DEFAULT_SYMBOL_RE, strip_symbols};
use crate::{ConfigError, dates, spacing};

/// One pure text rewrite in the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Delete emoji, bullet and dingbat glyphs, page-break markers and bars.
    StripSymbols,
    /// Join syllable breaks (`detec- tion`), keeping compound hyphens.
    Dehyphenate,
    /// Collapse letter-spaced words (`A d m i n` → `Admin`).
    RepairLetterSpacing,
    /// Collapse horizontal whitespace, keep newlines, trim.
    CollapseWhitespace,
    /// Paragraph break after sentence-terminal punctuation.
    BreakSentences,
    /// Paragraph break after date ranges.
    SpaceDateRanges,
    /// Colon and paragraph break after section headers.
    SpaceSectionHeaders,
    /// Collapse 3+ newlines to 2, trim.
    FinalCleanup,
}

impl Step {
    pub const DEFAULT_ORDER: [Step; 8] = [
        Step::StripSymbols,
        Step::Dehyphenate,
        Step::RepairLetterSpacing,
        Step::CollapseWhitespace,
        Step::BreakSentences,
        Step::SpaceDateRanges,
        Step::SpaceSectionHeaders,
        Step::FinalCleanup,
    ];

    /// Kebab-case name used in config files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Step::StripSymbols => "strip-symbols",
            Step::Dehyphenate => "dehyphenate",
            Step::RepairLetterSpacing => "letter-spacing",
            Step::CollapseWhitespace => "collapse-whitespace",
            Step::BreakSentences => "break-sentences",
            Step::SpaceDateRanges => "date-ranges",
            Step::SpaceSectionHeaders => "section-headers",
            Step::FinalCleanup => "final-cleanup",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Step::DEFAULT_ORDER
            .into_iter()
            .find(|step| step.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownStep(s.to_string()))
    }
}

/// Repairs extraction artifacts in reconstructed page text.
///
/// Holds compiled patterns and vocabularies only; normalizing is a pure
/// function of the input, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    symbol_re: Regex,
    header_re: Regex,
    compound_suffixes: HashSet<String>,
    steps: Vec<Step>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            symbol_re: DEFAULT_SYMBOL_RE.clone(),
            header_re: DEFAULT_HEADER_RE.clone(),
            compound_suffixes: default_suffix_set(),
            steps: Step::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl Normalizer {
    /// Build a normalizer running [`Step::DEFAULT_ORDER`].
    pub fn new(config: NormalizerConfig) -> Result<Self, ConfigError> {
        Self::with_steps(config, Step::DEFAULT_ORDER.to_vec())
    }

    /// Build a normalizer running a caller-chosen step sequence.
    pub fn with_steps(config: NormalizerConfig, steps: Vec<Step>) -> Result<Self, ConfigError> {
        let symbol_re = config
            .symbol_re
            .unwrap_or_else(|| DEFAULT_SYMBOL_RE.clone());

        let header_re = if config.section_headers.is_default() {
            DEFAULT_HEADER_RE.clone()
        } else {
            let defaults: Vec<String> = DEFAULT_SECTION_HEADERS
                .iter()
                .map(|s| s.to_string())
                .collect();
            header_regex(&config.section_headers.resolve(&defaults))?
        };

        let default_suffixes: Vec<String> = DEFAULT_COMPOUND_SUFFIXES
            .iter()
            .map(|s| s.to_string())
            .collect();
        let compound_suffixes = config
            .compound_suffixes
            .resolve(&default_suffixes)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();

        Ok(Self {
            symbol_re,
            header_re,
            compound_suffixes,
            steps,
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run a single step on `text`.
    pub fn apply_step(&self, step: Step, text: &str) -> String {
        match step {
            Step::StripSymbols => strip_symbols(text, &self.symbol_re),
            Step::Dehyphenate => fix_hyphenation(text, &self.compound_suffixes),
            Step::RepairLetterSpacing => spacing::repair_letter_spacing(text),
            Step::CollapseWhitespace => spacing::collapse_whitespace(text),
            Step::BreakSentences => spacing::break_sentences(text),
            Step::SpaceDateRanges => dates::space_date_ranges(text),
            Step::SpaceSectionHeaders => space_section_headers(text, &self.header_re),
            Step::FinalCleanup => spacing::final_cleanup(text),
        }
    }

    /// Run every configured step in order. Never fails; blank input yields
    /// an empty string.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let mut current = text.to_string();
        for &step in &self.steps {
            let next = self.apply_step(step, &current);
            if next != current {
                tracing::trace!(
                    step = step.name(),
                    before = current.len(),
                    after = next.len(),
                    "normalization step applied"
                );
            }
            current = next;
        }
        current
    }
}

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Normalize with the built-in configuration.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}
