//! Shared page-analysis helpers used by the extractors.
//!
//! All of this is best-effort text mining over marketing pages; every helper
//! returns `Option` or an empty collection when a page gives nothing away.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};

/// A link found on a page, with its visible text resolved against the page
/// URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

fn founded_regexes() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"(?i)\b(?:founded|established|since)\b\D{0,20}\b(1[0-9]{3}|20[0-2][0-9])\b")
                .unwrap(),
            Regex::new(r"(?i)\b(1[0-9]{3}|20[0-2][0-9])\b\D{0,20}\b(?:founded|established)\b")
                .unwrap(),
        ]
    })
}

fn population_regexes() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"(?i)\b(?:students?|enrollment|enrolment)\b\D{0,30}(\d{1,3}(?:,\d{3})+|\d{4,6})")
                .unwrap(),
            Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+|\d{4,6})\D{0,30}\b(?:students?|enrollment|enrolment)\b")
                .unwrap(),
        ]
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap())
}

/// Collapses all runs of whitespace to single spaces.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of the page, good enough for indicator-term scanning.
pub fn page_text(document: &Html) -> String {
    let selector = Selector::parse("p, li, h1, h2, h3, h4, td, span").unwrap();
    let mut text = String::new();
    for element in document.select(&selector) {
        for piece in element.text() {
            text.push_str(piece);
            text.push(' ');
        }
    }
    normalize_text(&text)
}

/// First four-digit year mentioned next to a founding phrase.
pub fn founding_year(text: &str) -> Option<String> {
    founded_regexes()
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|captures| captures[1].to_string())
}

/// First plausible headcount mentioned next to a student/enrollment phrase.
pub fn student_population(text: &str) -> Option<String> {
    population_regexes()
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|captures| captures[1].to_string())
}

/// First contact address on the page: `mailto:` links win, visible addresses
/// are the fallback.
pub fn contact_email(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"a[href^="mailto:"]"#).unwrap();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            let address = href
                .trim_start_matches("mailto:")
                .split('?')
                .next()
                .unwrap_or_default()
                .trim();
            if email_regex().is_match(address) {
                return Some(address.to_string());
            }
        }
    }
    email_regex()
        .find(&page_text(document))
        .map(|found| found.as_str().to_string())
}

/// Picks the first class whose indicator terms appear in the text.
pub fn classify(text: &str, classes: &[(&'static str, &[&str])]) -> Option<&'static str> {
    let haystack = text.to_lowercase();
    for (label, indicators) in classes {
        if indicators
            .iter()
            .any(|indicator| haystack.contains(indicator))
        {
            return Some(label);
        }
    }
    None
}

/// Links whose href or visible text matches `pattern`, resolved against
/// `base_url`, deduplicated, capped at `limit`.
pub fn links_matching(document: &Html, base_url: &str, pattern: &Regex, limit: usize) -> Vec<Link> {
    let selector = Selector::parse("a[href]").unwrap();
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(_) => return Vec::new(),
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("javascript:") {
            continue;
        }

        let text = normalize_text(&element.text().collect::<String>());
        if text.is_empty() {
            continue;
        }
        if !pattern.is_match(href) && !pattern.is_match(&text) {
            continue;
        }

        let Ok(absolute) = base.join(href) else {
            continue;
        };
        let url = absolute.to_string();
        if links.iter().any(|link: &Link| link.url == url) {
            continue;
        }
        links.push(Link { text, url });
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn founding_year_reads_both_phrasings() {
        assert_eq!(
            founding_year("The university was founded in 1861 in Cambridge."),
            Some("1861".to_string())
        );
        assert_eq!(
            founding_year("In 1209 established as a community of scholars"),
            Some("1209".to_string())
        );
        assert_eq!(founding_year("Our campus opened its doors recently."), None);
    }

    #[test]
    fn student_population_prefers_grouped_digits() {
        assert_eq!(
            student_population("home to more than 23,000 students from 120 countries"),
            Some("23,000".to_string())
        );
        assert_eq!(
            student_population("enrollment of 4500 across two campuses"),
            Some("4500".to_string())
        );
        assert_eq!(student_population("a small number of students"), None);
    }

    #[test]
    fn contact_email_prefers_mailto_links() {
        let document = Html::parse_document(
            r#"<html><body>
                <p>Write to info@example.edu for details.</p>
                <a href="mailto:admissions@example.edu?subject=hi">Contact</a>
            </body></html>"#,
        );
        assert_eq!(
            contact_email(&document),
            Some("admissions@example.edu".to_string())
        );
    }

    #[test]
    fn contact_email_falls_back_to_visible_addresses() {
        let document = Html::parse_document(
            "<html><body><p>Questions? info@example.edu</p></body></html>",
        );
        assert_eq!(contact_email(&document), Some("info@example.edu".to_string()));
    }

    #[test]
    fn classify_matches_first_listed_class() {
        let classes: &[(&'static str, &[&str])] = &[
            ("Public", &["public", "state university"]),
            ("Private", &["private", "independent"]),
        ];
        assert_eq!(
            classify("A leading public research university", classes),
            Some("Public")
        );
        assert_eq!(classify("An independent institution", classes), Some("Private"));
        assert_eq!(classify("A place of learning", classes), None);
    }

    #[test]
    fn links_matching_resolves_and_dedupes() {
        let document = Html::parse_document(
            r##"<html><body>
                <a href="/graduate/engineering">MSc Engineering</a>
                <a href="/graduate/engineering">MSc Engineering</a>
                <a href="https://other.example.edu/masters/ai">AI Master's</a>
                <a href="/about">About us</a>
                <a href="#top">Programs</a>
                <a href="mailto:x@example.edu">graduate office</a>
            </body></html>"##,
        );
        let pattern = Regex::new(r"(?i)graduate|master").unwrap();
        let links = links_matching(&document, "https://www.example.edu", &pattern, 10);
        assert_eq!(
            links,
            vec![
                Link {
                    text: "MSc Engineering".into(),
                    url: "https://www.example.edu/graduate/engineering".into(),
                },
                Link {
                    text: "AI Master's".into(),
                    url: "https://other.example.edu/masters/ai".into(),
                },
            ]
        );
    }

    #[test]
    fn links_matching_honours_limit() {
        let document = Html::parse_document(
            r#"<html><body>
                <a href="/labs/one">Lab One</a>
                <a href="/labs/two">Lab Two</a>
                <a href="/labs/three">Lab Three</a>
            </body></html>"#,
        );
        let pattern = Regex::new(r"(?i)lab").unwrap();
        let links = links_matching(&document, "https://www.example.edu", &pattern, 2);
        assert_eq!(links.len(), 2);
    }
}
