use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in section header vocabulary. Matching is case-insensitive.
pub const DEFAULT_SECTION_HEADERS: &[&str] = &[
    "Experience",
    "Work Experience",
    "Professional Experience",
    "Education",
    "Skills",
    "Technical Skills",
    "Soft Skills",
    "Languages",
    "Projects",
    "Certifications",
    "References",
    "Responsibilities",
    "Key Responsibilities",
    "Achievements",
    "Publications",
    "Awards",
    "Volunteer Work",
    "Interests",
    "Hobbies",
    "Contact Information",
    "Summary",
    "Objective",
    "Personal Statement",
    "Personal Summary",
    "Professional Statement",
    "Professional Summary",
    "Career Highlights",
];

pub(crate) static DEFAULT_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    let headers: Vec<String> = DEFAULT_SECTION_HEADERS
        .iter()
        .map(|s| s.to_string())
        .collect();
    header_regex(&headers).unwrap()
});

/// Compile a header vocabulary into a word-bounded matcher.
///
/// Longer names are tried first so `Work Experience` wins over
/// `Experience`. Inner spaces match any run of horizontal whitespace.
pub fn header_regex(headers: &[String]) -> Result<Regex, regex::Error> {
    let mut names: Vec<&str> = headers
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .collect();
    names.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    });
    names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

    if names.is_empty() {
        // Matches nothing.
        return Regex::new(r"\b\B");
    }

    let alternation = names
        .iter()
        .map(|name| {
            name.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"[^\S\n]+")
        })
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(
        r"(?i)\b(?P<header>{alternation})\b(?P<colon>[^\S\n]*:)?[^\S\n]*"
    ))
}

/// Give section headers a colon and a paragraph break before whatever
/// follows them on the same line.
///
/// The rule fires when the header already carries a colon, ends its line, or
/// is followed by something other than a lowercase letter. Running prose
/// like "Education is important" is left alone.
pub fn space_section_headers(text: &str, header_re: &Regex) -> String {
    header_re
        .replace_all(text, |caps: &regex::Captures| {
            let whole = &caps[0];
            let end = caps.get(0).map_or(0, |m| m.end());
            let header = &caps["header"];

            match text[end..].chars().next() {
                None | Some('\n') => format!("{header}:"),
                Some(_) if caps.name("colon").is_some() => format!("{header}:\n\n"),
                Some(c) if c.is_lowercase() => whole.to_string(),
                Some(_) => format!("{header}:\n\n"),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(text: &str) -> String {
        space_section_headers(text, &DEFAULT_HEADER_RE)
    }

    #[test]
    fn test_header_followed_by_text() {
        assert_eq!(space("Experience Led projects"), "Experience:\n\nLed projects");
    }

    #[test]
    fn test_existing_colon_not_doubled() {
        assert_eq!(space("Skills: Rust, Go"), "Skills:\n\nRust, Go");
        assert_eq!(space("Skills : rust"), "Skills:\n\nrust");
    }

    #[test]
    fn test_header_alone_on_line() {
        assert_eq!(space("EDUCATION\nBSc Physics"), "EDUCATION:\nBSc Physics");
        assert_eq!(space("Summary"), "Summary:");
    }

    #[test]
    fn test_longest_header_wins() {
        assert_eq!(
            space("Work Experience Acme Corp"),
            "Work Experience:\n\nAcme Corp"
        );
        assert_eq!(
            space("Key   Responsibilities Owned releases"),
            "Key   Responsibilities:\n\nOwned releases"
        );
    }

    #[test]
    fn test_prose_is_left_alone() {
        assert_eq!(space("Education is important"), "Education is important");
        assert_eq!(space("Experienced engineer"), "Experienced engineer");
        assert_eq!(space("My Skills are broad"), "My Skills are broad");
    }

    #[test]
    fn test_header_on_later_line() {
        assert_eq!(
            space("Jane Doe\n\nProjects Built a compiler"),
            "Jane Doe\n\nProjects:\n\nBuilt a compiler"
        );
    }

    #[test]
    fn test_header_mid_line() {
        assert_eq!(
            space("Jane Doe Experience Led projects"),
            "Jane Doe Experience:\n\nLed projects"
        );
        assert_eq!(
            space("Built tools. Education BSc Physics"),
            "Built tools. Education:\n\nBSc Physics"
        );
    }

    #[test]
    fn test_header_inside_word_is_ignored() {
        assert_eq!(space("Nonexperience Matters"), "Nonexperience Matters");
    }

    #[test]
    fn test_idempotent() {
        let once = space("Experience Led projects\nSkills\nRust");
        assert_eq!(space(&once), once);
    }

    #[test]
    fn test_custom_vocabulary() {
        let re = header_regex(&["Patents".to_string()]).unwrap();
        assert_eq!(space_section_headers("Patents US123", &re), "Patents:\n\nUS123");
        assert_eq!(space_section_headers("Skills Rust", &re), "Skills Rust");
    }

    #[test]
    fn test_empty_vocabulary_matches_nothing() {
        let re = header_regex(&[]).unwrap();
        assert_eq!(space_section_headers("Skills Rust", &re), "Skills Rust");
    }
}
