//! Pluggable page extractors.
//!
//! Each extractor covers one concern (profile, programmes, labs, …), knows
//! which sheet its rows belong to, and returns the same uniform [`Record`]
//! shape. A single row-writer in [`crate::fill`] maps records onto sheet
//! tables, so no extractor ever touches the workbook directly.

mod catalog;
mod scaffold;
mod survey;
mod university;

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::fill::http::HttpClient;
use crate::fill::report::ReferenceLog;
use crate::fill::roster::Institution;

pub use catalog::{LabDirectory, ProgramCatalog, ScholarshipIndex};
pub use scaffold::{CostOfLiving, DashboardSummary, NotesScaffold, TimelineScaffold};
pub use survey::{AdmissionRequirements, CareerOutcomes};
pub use university::UniversityProfile;

/// Placeholder for fields no heuristic could settle.
pub const UNKNOWN: &str = "N/A";

/// One row produced by an extractor: the target sheet plus header → value
/// pairs. Columns the record does not mention stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub sheet: &'static str,
    pub values: BTreeMap<String, String>,
}

impl Record {
    pub fn new(sheet: &'static str) -> Self {
        Self {
            sheet,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.values.insert(column.to_string(), value.into());
        self
    }
}

/// Shared state threaded through every extractor call.
pub struct FillContext {
    pub http: HttpClient,
    pub references: ReferenceLog,
    sequences: HashMap<&'static str, u32>,
}

impl FillContext {
    pub fn new(http: HttpClient, references: ReferenceLog) -> Self {
        Self {
            http,
            references,
            sequences: HashMap::new(),
        }
    }

    /// Next identifier for the given prefix, e.g. `PROG001`, `PROG002`, …
    /// Sequences are per run, so ids are stable for a fixed roster.
    pub fn next_id(&mut self, prefix: &'static str) -> String {
        let counter = self.sequences.entry(prefix).or_insert(0);
        *counter += 1;
        format!("{prefix}{:03}", *counter)
    }
}

/// A best-effort data source for one sheet.
pub trait Extractor {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Sheet the produced records belong to.
    fn sheet(&self) -> &'static str;

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>>;
}

/// The full extractor set, in the order their sheets appear in the workbook.
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(UniversityProfile),
        Box::new(ProgramCatalog),
        Box::new(LabDirectory),
        Box::new(ScholarshipIndex),
        Box::new(AdmissionRequirements),
        Box::new(CostOfLiving),
        Box::new(CareerOutcomes),
        Box::new(NotesScaffold),
        Box::new(TimelineScaffold),
        Box::new(DashboardSummary),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WorkbookSchema;
    use tempfile::tempdir;

    #[test]
    fn next_id_counts_per_prefix() {
        let dir = tempdir().expect("temporary directory");
        let references =
            ReferenceLog::create(&dir.path().join("references.md")).expect("log created");
        let mut ctx = FillContext::new(HttpClient::new().expect("client builds"), references);

        assert_eq!(ctx.next_id("PROG"), "PROG001");
        assert_eq!(ctx.next_id("PROG"), "PROG002");
        assert_eq!(ctx.next_id("LAB"), "LAB001");
    }

    #[test]
    fn every_extractor_targets_a_schema_sheet() {
        let schema = WorkbookSchema::default_schema();
        for extractor in default_extractors() {
            assert!(
                schema.sheet(extractor.sheet()).is_some(),
                "{} targets unknown sheet {}",
                extractor.name(),
                extractor.sheet()
            );
        }
    }
}
