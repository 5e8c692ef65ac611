use once_cell::sync::Lazy;
use regex::Regex;

/// Date ranges as they appear in CVs and reports:
/// `2019-2021`, `2020 – Present`, `03/2019 - 11/2021`, `06/2022 — current`.
/// Hyphen, en dash and em dash all separate.
static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<range>\b(?:(?:0?[1-9]|1[0-2])/)?\d{4}[^\S\n]*[-\x{2013}\x{2014}][^\S\n]*(?:(?:(?:0?[1-9]|1[0-2])/)?\d{4}|present|current)\b)\s*",
    )
    .unwrap()
});

/// Force a paragraph break right after each date range. The range itself is
/// kept verbatim; whitespace that followed it is replaced by the break.
pub fn space_date_ranges(text: &str) -> String {
    DATE_RANGE_RE
        .replace_all(text, |caps: &regex::Captures| {
            format!("{}\n\n", &caps["range"])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range() {
        assert_eq!(
            space_date_ranges("2022 - 2025 Managed the team."),
            "2022 - 2025\n\nManaged the team."
        );
        assert_eq!(space_date_ranges("2019-2021 Intern"), "2019-2021\n\nIntern");
    }

    #[test]
    fn test_present_and_current_any_case() {
        assert_eq!(
            space_date_ranges("2020 – PRESENT Lead engineer"),
            "2020 – PRESENT\n\nLead engineer"
        );
        assert_eq!(space_date_ranges("2021—current role"), "2021—current\n\nrole");
    }

    #[test]
    fn test_month_year_range() {
        assert_eq!(
            space_date_ranges("Acme 03/2019 - 11/2021 Built things"),
            "Acme 03/2019 - 11/2021\n\nBuilt things"
        );
        assert_eq!(
            space_date_ranges("1/2020 - Present Ongoing"),
            "1/2020 - Present\n\nOngoing"
        );
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(space_date_ranges("2020 - presentation"), "2020 - presentation");
        assert_eq!(space_date_ranges("ID 123456-78901"), "ID 123456-78901");
        assert_eq!(space_date_ranges("13/2020 - 2021 x"), "13/2020 - 2021\n\nx");
    }

    #[test]
    fn test_idempotent() {
        let once = space_date_ranges("2019-2021 Intern");
        assert_eq!(space_date_ranges(&once), once);
    }

    #[test]
    fn test_range_at_end_gets_trailing_break() {
        assert_eq!(space_date_ranges("Since 2018-2020"), "Since 2018-2020\n\n");
    }
}
