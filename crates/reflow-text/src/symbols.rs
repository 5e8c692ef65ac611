use once_cell::sync::Lazy;
use regex::Regex;

/// Glyphs deleted outright by [`strip_symbols`]:
/// emoji and pictographs (including the clock and media-control emoji of
/// Miscellaneous Technical), miscellaneous symbols and dingbats (card suits,
/// stars, check marks), geometric shapes, bullet punctuation, arrows,
/// the Private Use Area where symbol-font bullets land, and vertical bars.
pub const DEFAULT_SYMBOL_PATTERN: &str = concat!(
    r"[",
    r"\x{1F000}-\x{1FAFF}",
    r"\x{2600}-\x{27BF}",
    r"\x{2B00}-\x{2BFF}",
    r"\x{231A}\x{231B}\x{2328}\x{23CF}\x{23E9}-\x{23F3}\x{23F8}-\x{23FA}",
    r"\x{FE0F}\x{200D}",
    r"\x{25A0}-\x{25FF}",
    r"\x{2022}\x{2023}\x{2043}\x{2219}",
    r"\x{2190}-\x{21FF}\x{27F0}-\x{27FF}\x{2900}-\x{297F}",
    r"\x{E000}-\x{F8FF}",
    r"|\x{A6}\x{2502}",
    r"]",
);

pub(crate) static DEFAULT_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_SYMBOL_PATTERN).unwrap());

/// `--- Page Break ---`, `-- page 3 --` and similar markers left by
/// upstream tooling.
static PAGE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)-{2,}[^\S\n]*page(?:[^\S\n]+(?:break|\d+))?[^\S\n]*-{2,}").unwrap()
});

/// A hyphen used as a bullet: first non-blank character of a line, followed
/// by whitespace.
static HYPHEN_BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([^\S\n]*)-[^\S\n]+").unwrap());

/// Remove decorative glyphs, page-break markers and hyphen bullets.
///
/// Everything is replaced with the empty string; later whitespace rules
/// tidy the gaps.
pub fn strip_symbols(text: &str, symbols: &Regex) -> String {
    let text = PAGE_BREAK_RE.replace_all(text, "");
    let text = symbols.replace_all(&text, "");
    HYPHEN_BULLET_RE.replace_all(&text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(text: &str) -> String {
        strip_symbols(text, &DEFAULT_SYMBOL_RE)
    }

    #[test]
    fn test_strips_bullets_and_dingbats() {
        assert_eq!(strip("• Rust"), " Rust");
        assert_eq!(strip("▪ Go ★ ♦ ➤ Zig"), " Go    Zig");
        assert_eq!(strip("\u{F0B7} Python"), " Python");
    }

    #[test]
    fn test_strips_emoji() {
        assert_eq!(strip("Ship it 🚀✅"), "Ship it ");
        assert_eq!(strip("Call 📞 now"), "Call  now");
        assert_eq!(strip("Great ⭐ work"), "Great  work");
        assert_eq!(strip("Wake ⏰ up"), "Wake  up");
        assert_eq!(strip("Done ⌛ now ⌚"), "Done  now ");
    }

    #[test]
    fn test_strips_vertical_bars() {
        assert_eq!(strip("Email | Phone ¦ Site │ Blog"), "Email  Phone  Site  Blog");
    }

    #[test]
    fn test_strips_arrows() {
        assert_eq!(strip("→ next ⟶ ⤷"), " next  ");
        assert_eq!(strip("Go ⬅ back ➡ ⬆⬇"), "Go  back  ");
    }

    #[test]
    fn test_strips_page_break_markers() {
        assert_eq!(strip("end --- Page Break --- start"), "end  start");
        assert_eq!(strip("a -- PAGE 3 -- b"), "a  b");
        assert_eq!(strip("x ----page---- y"), "x  y");
    }

    #[test]
    fn test_hyphen_bullet_needs_whitespace() {
        assert_eq!(strip("- Led the team\n  - Built tools"), "Led the team\n  Built tools");
        assert_eq!(strip("-5 degrees"), "-5 degrees");
        assert_eq!(strip("well - known"), "well - known");
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "Plain résumé text, with punctuation: (a) & [b]; 50% off!";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn test_custom_symbol_pattern() {
        let custom = Regex::new(r"[#*]").unwrap();
        assert_eq!(strip_symbols("## Title * • kept", &custom), " Title  • kept");
    }
}
