//! Link-scan extractors: programmes, labs, and scholarships are discovered by
//! walking the homepage's outgoing links for topic-specific wording.

use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::fill::extract::{Extractor, FillContext, Record, UNKNOWN};
use crate::fill::heuristics::{Link, links_matching};
use crate::fill::roster::Institution;
use crate::schema::{SHEET_LAB, SHEET_PROGRAM, SHEET_SCHOLARSHIPS};

const PROGRAM_LIMIT: usize = 5;
const LAB_LIMIT: usize = 4;
const SCHOLARSHIP_LIMIT: usize = 4;

fn program_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)graduate|master|msc|m\.sc|phd|ph\.d|doctoral|postgraduate").unwrap()
    })
}

fn lab_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)laborator(?:y|ies)|research (?:center|centre|institute|group)|institute of")
            .unwrap()
    })
}

fn scholarship_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)scholarship|fellowship|financial[ -]aid|funding|grants").unwrap()
    })
}

fn scan_homepage(
    ctx: &mut FillContext,
    institution: &Institution,
    purpose: &str,
    pattern: &Regex,
    limit: usize,
) -> Vec<Link> {
    let Some(body) = ctx.http.fetch_ok(&institution.url) else {
        return Vec::new();
    };
    let document = Html::parse_document(&body);
    let links = links_matching(&document, &institution.url, pattern, limit);
    for link in &links {
        ctx.references.record(&institution.name, purpose, &link.url);
    }
    links
}

/// Fills `2_Program` with graduate programme pages linked from the homepage.
pub struct ProgramCatalog;

impl Extractor for ProgramCatalog {
    fn name(&self) -> &'static str {
        "program-catalog"
    }

    fn sheet(&self) -> &'static str {
        SHEET_PROGRAM
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let links = scan_homepage(ctx, institution, "program page", program_regex(), PROGRAM_LIMIT);
        let records = links
            .into_iter()
            .map(|link| {
                Record::new(SHEET_PROGRAM)
                    .with("Prog_ID", ctx.next_id("PROG"))
                    .with("Univ_ID", &institution.id)
                    .with("Program Name", &link.text)
                    .with("Degree Type", degree_type(&link.text))
                    .with("Program Website", &link.url)
                    .with("Currency", &institution.currency)
                    .with("Language Requirement", &institution.language)
                    .with("Contact Email", UNKNOWN)
                    .with("Notes", "")
            })
            .collect();
        Ok(records)
    }
}

/// Best guess at the degree level from the link wording alone.
fn degree_type(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    if lowered.contains("phd") || lowered.contains("ph.d") || lowered.contains("doctoral") {
        "Ph.D."
    } else if lowered.contains("master") || lowered.contains("msc") || lowered.contains("m.sc") {
        "Master's"
    } else {
        UNKNOWN
    }
}

/// Fills `3_Lab-Research` with laboratory and institute pages.
pub struct LabDirectory;

impl Extractor for LabDirectory {
    fn name(&self) -> &'static str {
        "lab-directory"
    }

    fn sheet(&self) -> &'static str {
        SHEET_LAB
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let links = scan_homepage(ctx, institution, "lab page", lab_regex(), LAB_LIMIT);
        let records = links
            .into_iter()
            .map(|link| {
                Record::new(SHEET_LAB)
                    .with("Lab_ID", ctx.next_id("LAB"))
                    .with("Univ_ID", &institution.id)
                    .with("Laboratory / Center Name", &link.text)
                    .with("Website", &link.url)
                    .with("Contact Email", UNKNOWN)
                    .with("Notes", "")
            })
            .collect();
        Ok(records)
    }
}

/// Fills `4_Scholarships` with funding pages.
pub struct ScholarshipIndex;

impl Extractor for ScholarshipIndex {
    fn name(&self) -> &'static str {
        "scholarship-index"
    }

    fn sheet(&self) -> &'static str {
        SHEET_SCHOLARSHIPS
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let links = scan_homepage(
            ctx,
            institution,
            "scholarship page",
            scholarship_regex(),
            SCHOLARSHIP_LIMIT,
        );
        let records = links
            .into_iter()
            .map(|link| {
                Record::new(SHEET_SCHOLARSHIPS)
                    .with("Scholarship_ID", ctx.next_id("SCH"))
                    .with("Univ_ID", &institution.id)
                    .with("Scholarship Name", &link.text)
                    .with("Currency", &institution.currency)
                    .with("Scholarship Website", &link.url)
                    .with("Contact Email", UNKNOWN)
                    .with("Notes", "")
            })
            .collect();
        Ok(records)
    }
}
