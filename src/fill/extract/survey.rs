//! Text-mining extractors for admissions pages and career outcome pages.

use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::fill::extract::{Extractor, FillContext, Record, UNKNOWN};
use crate::fill::heuristics::{links_matching, page_text};
use crate::fill::roster::Institution;
use crate::schema::{SHEET_ADMISSION, SHEET_OUTCOMES};

const EXAMS: &[&str] = &["GRE", "GMAT", "TOEFL", "IELTS"];

fn admission_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)admission|apply|application").unwrap())
}

fn outcomes_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)career|outcome|employment|placement|alumni").unwrap())
}

fn fee_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)application fee\D{0,20}(\d{2,4})").unwrap())
}

fn letters_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(one|two|three|[1-3])\b[^.]{0,30}letters? of recommendation").unwrap()
    })
}

fn employability_regexes() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"(?i)(\d{1,3})\s?%[^.%]{0,60}(?:employ|placement|job)").unwrap(),
            Regex::new(r"(?i)(?:employ|placement)[^.%]{0,60}?(\d{1,3})\s?%").unwrap(),
        ]
    })
}

/// Fetches the first homepage link matching `pattern`, falling back to the
/// homepage itself, and returns the page's visible text.
fn topic_page_text(
    ctx: &mut FillContext,
    institution: &Institution,
    purpose: &str,
    pattern: &Regex,
) -> Option<String> {
    let body = ctx.http.fetch_ok(&institution.url)?;
    let document = Html::parse_document(&body);
    let link = links_matching(&document, &institution.url, pattern, 1)
        .into_iter()
        .next();

    if let Some(link) = link {
        if let Some(page) = ctx.http.fetch_ok(&link.url) {
            ctx.references.record(&institution.name, purpose, &link.url);
            return Some(page_text(&Html::parse_document(&page)));
        }
    }
    Some(page_text(&document))
}

/// Fills `5_Admission` with whatever requirement wording the admissions page
/// yields; one row per institution.
pub struct AdmissionRequirements;

impl Extractor for AdmissionRequirements {
    fn name(&self) -> &'static str {
        "admission-requirements"
    }

    fn sheet(&self) -> &'static str {
        SHEET_ADMISSION
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let text = topic_page_text(ctx, institution, "admissions page", admission_link_regex())
            .unwrap_or_default();
        Ok(vec![admission_record(ctx.next_id("ADM"), institution, &text)])
    }
}

fn admission_record(id: String, institution: &Institution, text: &str) -> Record {
    let mentioned = |term: &str| {
        text.to_lowercase()
            .contains(&term.to_lowercase())
            .then_some("Yes")
            .unwrap_or(UNKNOWN)
    };

    Record::new(SHEET_ADMISSION)
        .with("Admission_ID", id)
        .with("Univ_ID", &institution.id)
        .with("Prog_ID", "")
        .with("Minimum GPA", UNKNOWN)
        .with("GPA Scale", UNKNOWN)
        .with("Required Exams", required_exams(text).unwrap_or_else(|| UNKNOWN.to_string()))
        .with("Minimum Scores", UNKNOWN)
        .with("Language Test Validity (years)", UNKNOWN)
        .with(
            "Letters of Recommendation",
            recommendation_letters(text).unwrap_or_else(|| UNKNOWN.to_string()),
        )
        .with("Statement of Purpose", mentioned("statement of purpose"))
        .with("Resume / CV", mentioned("resume"))
        .with("Interview Requirement", mentioned("interview"))
        .with("Research Proposal", mentioned("research proposal"))
        .with("Experience Required", UNKNOWN)
        .with("Portfolio/Writing Samples", mentioned("portfolio"))
        .with("Application Deadline", UNKNOWN)
        .with(
            "Application Fee (USD)",
            application_fee(text).unwrap_or_else(|| UNKNOWN.to_string()),
        )
        .with("Rolling Admission", mentioned("rolling admission"))
        .with("Other Requirements", UNKNOWN)
        .with("Notes", "")
}

/// Standardised tests the page mentions, in canonical order.
fn required_exams(text: &str) -> Option<String> {
    let upper = text.to_uppercase();
    let found: Vec<&str> = EXAMS
        .iter()
        .copied()
        .filter(|exam| upper.contains(exam))
        .collect();
    (!found.is_empty()).then(|| found.join(", "))
}

fn application_fee(text: &str) -> Option<String> {
    fee_regex()
        .captures(text)
        .map(|captures| captures[1].to_string())
}

fn recommendation_letters(text: &str) -> Option<String> {
    letters_regex()
        .captures(text)
        .map(|captures| captures[1].to_string())
}

/// Fills `7_Outcomes`; one row per institution.
pub struct CareerOutcomes;

impl Extractor for CareerOutcomes {
    fn name(&self) -> &'static str {
        "career-outcomes"
    }

    fn sheet(&self) -> &'static str {
        SHEET_OUTCOMES
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let text = topic_page_text(ctx, institution, "careers page", outcomes_link_regex())
            .unwrap_or_default();
        Ok(vec![outcome_record(ctx.next_id("OUT"), institution, &text)])
    }
}

fn outcome_record(id: String, institution: &Institution, text: &str) -> Record {
    Record::new(SHEET_OUTCOMES)
        .with("Outcome_ID", id)
        .with("Univ_ID", &institution.id)
        .with("Prog_ID", "")
        .with(
            "Employability Rate (%)",
            employability_rate(text).unwrap_or_else(|| UNKNOWN.to_string()),
        )
        .with("Average Starting Salary", UNKNOWN)
        .with("Currency", &institution.currency)
        .with("Time to First Job (months)", UNKNOWN)
        .with("Top Employers", UNKNOWN)
        .with("Internship Opportunities", UNKNOWN)
        .with("Industry Partnerships", UNKNOWN)
        .with("Alumni Network Size", UNKNOWN)
        .with("Alumni Events", UNKNOWN)
        .with("Alumni Mentorship Programs", UNKNOWN)
        .with("Further Study Rate (%)", UNKNOWN)
        .with("Job Satisfaction (1-5)", UNKNOWN)
        .with("Career Support Services", UNKNOWN)
        .with("Visa Extension Options", UNKNOWN)
        .with("Notes", "")
}

/// Percentage mentioned next to employment wording, when plausible.
fn employability_rate(text: &str) -> Option<String> {
    for pattern in employability_regexes() {
        if let Some(captures) = pattern.captures(text) {
            let value: u32 = captures[1].parse().ok()?;
            if value <= 100 {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institution() -> Institution {
        Institution {
            id: "UNIV001".into(),
            name: "Example University".into(),
            city: "Exampleville".into(),
            country: "United States".into(),
            url: "https://www.example.edu".into(),
            language: "English".into(),
            currency: "USD".into(),
        }
    }

    #[test]
    fn required_exams_lists_mentions_in_canonical_order() {
        assert_eq!(
            required_exams("We accept IELTS or TOEFL scores; the GRE is optional."),
            Some("GRE, TOEFL, IELTS".to_string())
        );
        assert_eq!(required_exams("No tests required."), None);
    }

    #[test]
    fn application_fee_reads_the_amount() {
        assert_eq!(
            application_fee("A non-refundable application fee of $90 applies."),
            Some("90".to_string())
        );
        assert_eq!(application_fee("Applications are free of charge."), None);
    }

    #[test]
    fn recommendation_letters_captures_the_count() {
        assert_eq!(
            recommendation_letters("Submit three letters of recommendation with your file."),
            Some("three".to_string())
        );
        assert_eq!(
            recommendation_letters("Submit 2 signed letters of recommendation."),
            Some("2".to_string())
        );
    }

    #[test]
    fn admission_record_flags_mentioned_requirements() {
        let text = "Upload a statement of purpose and a resume. \
                    An interview may be requested. Rolling admission applies.";
        let record = admission_record("ADM001".into(), &institution(), text);
        assert_eq!(record.values["Statement of Purpose"], "Yes");
        assert_eq!(record.values["Resume / CV"], "Yes");
        assert_eq!(record.values["Interview Requirement"], "Yes");
        assert_eq!(record.values["Rolling Admission"], "Yes");
        assert_eq!(record.values["Research Proposal"], UNKNOWN);
    }

    #[test]
    fn employability_rate_accepts_both_phrasings() {
        assert_eq!(
            employability_rate("94% of graduates are employed within six months"),
            Some("94".to_string())
        );
        assert_eq!(
            employability_rate("employment rate after graduation: 88 %"),
            Some("88".to_string())
        );
        assert_eq!(employability_rate("250% growth in applications"), None);
    }
}
