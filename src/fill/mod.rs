//! Filler orchestration: open the built workbook, walk the roster through
//! every extractor, merge the records, save the result.

pub mod extract;
pub mod heuristics;
pub mod http;
pub mod report;
pub mod roster;

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::fill::extract::{FillContext, Record};
use crate::fill::http::HttpClient;
use crate::fill::report::{Checkpoint, ReferenceLog};
use crate::io::{excel_read, excel_write};
use crate::schema::WorkbookSchema;
use crate::table::WorkbookData;

/// Paths a fill run works with; defaults come from the CLI.
pub struct FillOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub roster: Option<PathBuf>,
    pub references: PathBuf,
    pub checkpoint: PathBuf,
}

/// Runs the filler end to end.
///
/// The input workbook is validated against the schema before any network
/// traffic; a drifted workbook aborts the run. Individual extractor failures
/// are logged and skipped, so one unreachable site never loses the rest of
/// the roster.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %options.input.display(), output = %options.output.display())
)]
pub fn run(schema: &WorkbookSchema, options: &FillOptions) -> Result<()> {
    if !options.input.exists() {
        return Err(ToolError::MissingInput(options.input.clone()));
    }
    schema.validate()?;

    let mut data = excel_read::read_tables(&options.input, schema)?;
    info!(sheet_count = data.tables.len(), "input workbook matches the schema");

    let roster = match &options.roster {
        Some(path) => roster::from_file(path)?,
        None => roster::default_roster(),
    };
    let institutions = roster::institutions(&roster);
    info!(count = institutions.len(), "roster loaded");

    let resume_from = report::load_checkpoint(&options.checkpoint)
        .map(|checkpoint| checkpoint.institution_index)
        .filter(|index| *index < institutions.len())
        .unwrap_or(0);
    if resume_from > 0 {
        info!(resume_from, "resuming from checkpoint");
    }

    let references = ReferenceLog::create(&options.references)?;
    let mut ctx = FillContext::new(HttpClient::new()?, references);
    let extractors = extract::default_extractors();

    for (index, institution) in institutions.iter().enumerate().skip(resume_from) {
        report::save_checkpoint(
            &options.checkpoint,
            &Checkpoint {
                institution_index: index,
                institution: institution.name.clone(),
            },
        )?;
        info!(
            institution = %institution.name,
            progress = %format!("{}/{}", index + 1, institutions.len()),
            "processing institution"
        );

        for extractor in &extractors {
            match extractor.extract(&mut ctx, institution) {
                Ok(records) => {
                    debug!(
                        extractor = extractor.name(),
                        count = records.len(),
                        "records extracted"
                    );
                    apply_records(&mut data, schema, records);
                }
                Err(error) => warn!(
                    extractor = extractor.name(),
                    institution = %institution.name,
                    %error,
                    "extraction failed, skipping"
                ),
            }
        }
    }

    excel_write::write_workbook(&options.output, schema, &data)?;
    report::clear_checkpoint(&options.checkpoint);
    info!(output = %options.output.display(), "populated workbook written");
    Ok(())
}

/// The single row-writer: maps each record's header → value pairs onto its
/// sheet's column order and upserts by the sheet's key column. Records for
/// sheets the schema does not declare are dropped.
pub fn apply_records(data: &mut WorkbookData, schema: &WorkbookSchema, records: Vec<Record>) {
    for record in records {
        let Some(def) = schema.sheet(record.sheet) else {
            debug!(sheet = record.sheet, "dropping record for undeclared sheet");
            continue;
        };
        let Some(table) = data.table_mut(record.sheet) else {
            continue;
        };

        let row: Vec<String> = def
            .columns
            .iter()
            .map(|column| record.values.get(column).cloned().unwrap_or_default())
            .collect();
        let key_index = def
            .key
            .as_deref()
            .and_then(|key| def.column_index(key));
        table.upsert_row(key_index, row);
    }
}
