use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Common compound-word suffixes that should keep the hyphen.
pub const DEFAULT_COMPOUND_SUFFIXES: &[&str] = &[
    "based",
    "driven",
    "aware",
    "oriented",
    "focused",
    "centered",
    "specific",
    "related",
    "dependent",
    "independent",
    "like",
    "free",
    "friendly",
    "facing",
    "level",
    "scale",
    "time",
    "term",
    "owned",
    "led",
    "made",
    "wide",
    "wise",
    "minded",
    "solving",
    "making",
    "stack",
    "end",
];

static LINE_HYPHEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w)-\n").unwrap());

/// Join words broken across a single line break: `"recon-\nstruction"` →
/// `"reconstruction"`. Paragraph breaks (`-\n\n`) are left alone.
///
/// The continuation is checked without consuming it, so a one-letter line
/// that is itself hyphen-terminated still gets joined to the next.
pub fn join_line_hyphens(text: &str) -> String {
    LINE_HYPHEN_RE
        .replace_all(text, |caps: &regex::Captures| {
            let end = caps.get(0).map_or(0, |m| m.end());
            match text[end..].chars().next() {
                Some(c) if c.is_alphanumeric() || c == '_' => caps[1].to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Fix hyphenation breaks while preserving compound words.
///
/// - `"detec- tion"` or `"detec-\ntion"` → `"detection"` (syllable break)
/// - `"data- driven"` → `"data-driven"` (compound word)
/// - `"Q3- 2024"` → `"Q3-2024"` (digit before the hyphen)
pub fn fix_hyphenation(text: &str, suffixes: &HashSet<String>) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| {
        // word-char, hyphen, horizontal whitespace or a single newline, then a word
        Regex::new(r"(\w)-(?:[^\S\n]+|[^\S\n]*\n[^\S\n]*)(\w+)").unwrap()
    });

    RE.replace_all(text, |caps: &regex::Captures| {
        let before = &caps[1];
        let after_word = &caps[2];

        // Model numbers and ranges: "GPT-4", "Q3-2024"
        if before.chars().last().is_some_and(|c| c.is_ascii_digit()) {
            return format!("{}-{}", before, after_word);
        }

        if suffixes.contains(&after_word.to_lowercase()) {
            return format!("{}-{}", before, after_word);
        }

        // Otherwise it's a syllable break
        format!("{}{}", before, after_word)
    })
    .into_owned()
}

/// Resolve the default suffix list into a lookup set.
pub(crate) fn default_suffix_set() -> HashSet<String> {
    DEFAULT_COMPOUND_SUFFIXES
        .iter()
        .map(|s| s.to_string())
        .collect()
}
