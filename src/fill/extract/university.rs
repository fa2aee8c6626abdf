//! University profile extraction from the institution's homepage.

use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::fill::extract::{Extractor, FillContext, Record, UNKNOWN};
use crate::fill::heuristics::{
    classify, contact_email, founding_year, links_matching, page_text, student_population,
};
use crate::fill::roster::Institution;
use crate::schema::SHEET_UNIVERSITY;

const TYPE_CLASSES: &[(&'static str, &[&str])] = &[
    ("Public", &["public", "state university", "state-funded"]),
    ("Private", &["private", "independent", "not-for-profit"]),
];

const CAMPUS_CLASSES: &[(&'static str, &[&str])] = &[
    ("Urban", &["urban", "city campus", "metropolitan"]),
    ("Suburban", &["suburban", "outskirts", "residential area"]),
    ("Rural", &["rural", "countryside", "remote"]),
];

fn about_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)about|overview|our-university|facts").unwrap())
}

/// Fills the `1_University` sheet: one row per institution, with whatever the
/// homepage (and an "about" page, when one is linked) gives away.
pub struct UniversityProfile;

impl Extractor for UniversityProfile {
    fn name(&self) -> &'static str {
        "university-profile"
    }

    fn sheet(&self) -> &'static str {
        SHEET_UNIVERSITY
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let Some(body) = ctx.http.fetch_ok(&institution.url) else {
            return Ok(vec![base_record(institution)]);
        };
        ctx.references
            .record(&institution.name, "homepage", &institution.url);

        let about_text = {
            let document = Html::parse_document(&body);
            let about = links_matching(&document, &institution.url, about_link_regex(), 1)
                .into_iter()
                .next();
            about.and_then(|link| {
                let page = ctx.http.fetch_ok(&link.url)?;
                ctx.references
                    .record(&institution.name, "about page", &link.url);
                Some(page_text(&Html::parse_document(&page)))
            })
        };

        Ok(vec![profile_record(
            institution,
            &body,
            about_text.as_deref(),
        )])
    }
}

/// The row every profile starts from: roster facts filled in, everything the
/// scrape has to discover still unknown.
fn base_record(institution: &Institution) -> Record {
    Record::new(SHEET_UNIVERSITY)
        .with("Univ_ID", &institution.id)
        .with("Country", &institution.country)
        .with("City", &institution.city)
        .with("University", &institution.name)
        .with("Website", &institution.url)
        .with("Type", UNKNOWN)
        .with("Size", UNKNOWN)
        .with("Campus Environment", UNKNOWN)
        .with("Main Language", &institution.language)
        .with("Other Languages", UNKNOWN)
        .with("Year Established", UNKNOWN)
        .with("Student Population", UNKNOWN)
        .with("Faculty-Student Ratio", UNKNOWN)
        .with("Acceptance Rate (%)", UNKNOWN)
        .with("Global Ranking (QS)", UNKNOWN)
        .with("Global Ranking (THE)", UNKNOWN)
        .with("Subject Ranking", UNKNOWN)
        .with("Research Expenditure (USD)", UNKNOWN)
        .with("Endowment (USD)", UNKNOWN)
        .with("Notable Alumni", UNKNOWN)
        .with("Official Contact Email", UNKNOWN)
        .with("Notes", "")
}

fn profile_record(institution: &Institution, homepage: &str, about_text: Option<&str>) -> Record {
    let document = Html::parse_document(homepage);
    let homepage_text = page_text(&document);
    let mut record = base_record(institution);

    if let Some(year) = founding_year(&homepage_text) {
        record = record.with("Year Established", year);
    }

    if let Some(population) = student_population(&homepage_text) {
        record = record.with("Size", size_from_population(&population));
        record = record.with("Student Population", population);
    }

    // Governance terms usually live on the about page, not the landing page.
    let classification_text = match about_text {
        Some(about) => format!("{homepage_text} {about}"),
        None => homepage_text.clone(),
    };
    if let Some(kind) = classify(&classification_text, TYPE_CLASSES) {
        record = record.with("Type", kind);
    }
    if let Some(environment) = classify(&classification_text, CAMPUS_CLASSES) {
        record = record.with("Campus Environment", environment);
    }

    if let Some(email) = contact_email(&document) {
        record = record.with("Official Contact Email", email);
    }

    record
}

fn size_from_population(population: &str) -> &'static str {
    let count: u64 = population.replace(',', "").parse().unwrap_or(0);
    if count > 30_000 {
        "Large"
    } else if count > 10_000 {
        "Medium"
    } else {
        "Small"
    }
}
