use once_cell::sync::Lazy;
use regex::Regex;

/// Two or more single letters separated by single spaces, with word
/// boundaries on both ends. The repetition is greedy, so the longest run
/// wins and is collapsed whole.
static LETTER_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\p{L}(?: \p{L})+\b").unwrap());

static HORIZONTAL_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());

static SPACE_AROUND_NEWLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\n *").unwrap());

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?])\s+(\p{Lu})").unwrap());

/// Repair letter-spaced words: `"A d m i n"` → `"Admin"`.
///
/// A single-letter initialism followed by a real word (`"J Smith"`) is not
/// a run and is left alone.
pub fn repair_letter_spacing(text: &str) -> String {
    LETTER_RUN_RE
        .replace_all(text, |caps: &regex::Captures| caps[0].replace(' ', ""))
        .into_owned()
}

/// Collapse horizontal whitespace to single spaces, drop spaces hugging
/// newlines, and trim. Newlines themselves are preserved.
pub fn collapse_whitespace(text: &str) -> String {
    let text = HORIZONTAL_WS_RE.replace_all(text, " ");
    let text = SPACE_AROUND_NEWLINE_RE.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Collapse runs of three or more newlines to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES_RE.replace_all(text, "\n\n").into_owned()
}

/// Insert a paragraph break after `.`/`!`/`?` when whitespace and an
/// uppercase letter follow.
pub fn break_sentences(text: &str) -> String {
    SENTENCE_END_RE.replace_all(text, "$1\n\n$2").into_owned()
}

/// Collapse blank-line runs and trim.
pub fn final_cleanup(text: &str) -> String {
    collapse_blank_lines(text).trim().to_string()
}
