//! Workbook schema: sheet names, column headers, and presentation defaults.
//!
//! The schema is the single source of truth shared by the builder (which
//! materialises it as a header-only workbook) and the filler (which checks an
//! opened workbook against it before touching any row). The built-in schema
//! can be replaced wholesale by a JSON file with the same shape.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// Width applied to every column of every sheet.
pub const DEFAULT_COLUMN_WIDTH: f64 = 20.0;

/// Hard limit imposed by the xlsx format.
pub const MAX_SHEET_NAME_LEN: usize = 31;

pub const SHEET_UNIVERSITY: &str = "1_University";
pub const SHEET_PROGRAM: &str = "2_Program";
pub const SHEET_LAB: &str = "3_Lab-Research";
pub const SHEET_SCHOLARSHIPS: &str = "4_Scholarships";
pub const SHEET_ADMISSION: &str = "5_Admission";
pub const SHEET_COST_OF_LIVING: &str = "6_Cost of Living";
pub const SHEET_OUTCOMES: &str = "7_Outcomes";
pub const SHEET_NOTES: &str = "8_Notes";
pub const SHEET_TIMELINE: &str = "9_Timeline";
pub const SHEET_DASHBOARD: &str = "10_Dashboard";

/// A single sheet: its name, ordered column headers, the column the filler
/// keys row replacement on, and any fixed-choice columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDef {
    pub name: String,
    pub columns: Vec<String>,
    /// Column whose value identifies a row when the filler merges records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Column name → allowed values, rendered as a dropdown in the workbook.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pick_lists: BTreeMap<String, Vec<String>>,
}

impl SheetDef {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            key: None,
            pick_lists: BTreeMap::new(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_pick_list(mut self, column: &str, options: &[&str]) -> Self {
        self.pick_lists.insert(
            column.to_string(),
            options.iter().map(|option| option.to_string()).collect(),
        );
        self
    }

    /// Position of a header within this sheet, if declared.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == header)
    }
}

/// Ordered collection of sheet definitions. Sheet order here is the sheet
/// order in the produced file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookSchema {
    pub sheets: Vec<SheetDef>,
}

impl WorkbookSchema {
    /// Loads a schema from a JSON file and validates it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let schema: WorkbookSchema = serde_json::from_str(&source)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetDef> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Checks the structural invariants every usable schema must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.sheets.is_empty() {
            return Err(ToolError::InvalidSchema("schema declares no sheets".into()));
        }

        let mut seen = HashSet::new();
        for sheet in &self.sheets {
            if sheet.name.trim().is_empty() {
                return Err(ToolError::InvalidSchema("empty sheet name".into()));
            }
            if sheet.name.len() > MAX_SHEET_NAME_LEN {
                return Err(ToolError::InvalidSchema(format!(
                    "sheet name '{}' exceeds {MAX_SHEET_NAME_LEN} characters",
                    sheet.name
                )));
            }
            if !seen.insert(sheet.name.as_str()) {
                return Err(ToolError::InvalidSchema(format!(
                    "duplicate sheet name '{}'",
                    sheet.name
                )));
            }
            if sheet.columns.is_empty() {
                return Err(ToolError::InvalidSchema(format!(
                    "sheet '{}' declares no columns",
                    sheet.name
                )));
            }
            if let Some(key) = &sheet.key {
                if sheet.column_index(key).is_none() {
                    return Err(ToolError::InvalidSchema(format!(
                        "sheet '{}' keys on unknown column '{key}'",
                        sheet.name
                    )));
                }
            }
            for (column, options) in &sheet.pick_lists {
                if sheet.column_index(column).is_none() {
                    return Err(ToolError::InvalidSchema(format!(
                        "sheet '{}' declares a pick list for unknown column '{column}'",
                        sheet.name
                    )));
                }
                if options.is_empty() {
                    return Err(ToolError::InvalidSchema(format!(
                        "sheet '{}' declares an empty pick list for column '{column}'",
                        sheet.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// The built-in university comparison schema.
    pub fn default_schema() -> Self {
        let sheets = vec![
            SheetDef::new(
                SHEET_UNIVERSITY,
                &[
                    "Univ_ID",
                    "Country",
                    "City",
                    "University",
                    "Website",
                    "Type",
                    "Size",
                    "Campus Environment",
                    "Main Language",
                    "Other Languages",
                    "Year Established",
                    "Student Population",
                    "Faculty-Student Ratio",
                    "Acceptance Rate (%)",
                    "Global Ranking (QS)",
                    "Global Ranking (THE)",
                    "Subject Ranking",
                    "Research Expenditure (USD)",
                    "Endowment (USD)",
                    "Notable Alumni",
                    "Official Contact Email",
                    "Notes",
                ],
            )
            .with_key("University")
            .with_pick_list("Type", &["Public", "Private"])
            .with_pick_list("Size", &["Large", "Medium", "Small"])
            .with_pick_list("Campus Environment", &["Urban", "Suburban", "Rural"]),
            SheetDef::new(
                SHEET_PROGRAM,
                &[
                    "Prog_ID",
                    "Univ_ID",
                    "Program Name",
                    "Degree Type",
                    "Program Website",
                    "Duration (Years)",
                    "Mode",
                    "Number of Credits",
                    "Tuition Fee (per year)",
                    "Currency",
                    "Main Areas of Focus",
                    "Application Deadline",
                    "Admission Seasons",
                    "Start Date",
                    "Cohort Size",
                    "Language Requirement",
                    "Prerequisites",
                    "Funding Options",
                    "Program Coordinator",
                    "Contact Email",
                    "Notes",
                ],
            )
            .with_key("Program Website")
            .with_pick_list("Degree Type", &["Master's", "Ph.D.", "Certificate", "Diploma"])
            .with_pick_list("Mode", &["Full-time", "Part-time", "Online", "Hybrid"])
            .with_pick_list(
                "Admission Seasons",
                &["Fall", "Spring", "Summer", "Winter", "Multiple"],
            ),
            SheetDef::new(
                SHEET_LAB,
                &[
                    "Lab_ID",
                    "Univ_ID",
                    "Prog_ID",
                    "Laboratory / Center Name",
                    "Department/Faculty",
                    "Research Fields",
                    "Website",
                    "Lab Director",
                    "Contact Email",
                    "Key Researchers",
                    "Location (Building)",
                    "Number of Active Projects",
                    "Grant Funding (USD)",
                    "Industry Collaborations",
                    "Facilities",
                    "Annual Publications",
                    "Student Positions Available",
                    "Lab Ranking (if available)",
                    "Notes",
                ],
            )
            .with_key("Website"),
            SheetDef::new(
                SHEET_SCHOLARSHIPS,
                &[
                    "Scholarship_ID",
                    "Univ_ID",
                    "Prog_ID",
                    "Scholarship Name",
                    "Type of Funding",
                    "Amount",
                    "Currency",
                    "Eligibility Criteria",
                    "Competitiveness",
                    "Number of Awards",
                    "Application Deadline",
                    "Notification Date",
                    "Disbursement Schedule",
                    "Renewal Conditions",
                    "Selection Process",
                    "Scholarship Website",
                    "Contact Person",
                    "Contact Email",
                    "Notes",
                ],
            )
            .with_key("Scholarship Website")
            .with_pick_list(
                "Type of Funding",
                &[
                    "Full Tuition",
                    "Partial Tuition",
                    "Living Stipend",
                    "Travel Grant",
                    "Research Grant",
                    "Mixed",
                ],
            )
            .with_pick_list("Competitiveness", &["High", "Medium", "Low"]),
            SheetDef::new(
                SHEET_ADMISSION,
                &[
                    "Admission_ID",
                    "Univ_ID",
                    "Prog_ID",
                    "Minimum GPA",
                    "GPA Scale",
                    "Required Exams",
                    "Minimum Scores",
                    "Language Test Validity (years)",
                    "Letters of Recommendation",
                    "Statement of Purpose",
                    "Resume / CV",
                    "Interview Requirement",
                    "Research Proposal",
                    "Experience Required",
                    "Portfolio/Writing Samples",
                    "Application Deadline",
                    "Application Fee (USD)",
                    "Rolling Admission",
                    "Other Requirements",
                    "Notes",
                ],
            )
            .with_key("Univ_ID")
            .with_pick_list("Resume / CV", &["Yes", "No", "Optional"])
            .with_pick_list("Interview Requirement", &["Yes", "No", "Optional"])
            .with_pick_list("Research Proposal", &["Yes", "No", "Optional"])
            .with_pick_list("Rolling Admission", &["Yes", "No", "Optional"]),
            SheetDef::new(
                SHEET_COST_OF_LIVING,
                &[
                    "Cost_ID",
                    "Univ_ID",
                    "City",
                    "Country",
                    "Currency",
                    "Estimated Monthly Living Costs",
                    "Housing Type",
                    "Housing Costs",
                    "Food/Groceries",
                    "Public Transportation",
                    "Utilities",
                    "Health Insurance",
                    "Textbooks & Supplies",
                    "Climate",
                    "Safety Rating",
                    "Part-time Work Opportunities",
                    "Visa Cost",
                    "Visa Process",
                    "Student Services",
                    "Notes",
                ],
            )
            .with_key("Univ_ID")
            .with_pick_list(
                "Housing Type",
                &[
                    "University Dorm",
                    "Off-campus Apartment",
                    "Shared Apartment",
                    "Host Family",
                    "Multiple Options",
                ],
            )
            .with_pick_list(
                "Safety Rating",
                &["Very Safe", "Safe", "Average", "Below Average", "Unsafe"],
            ),
            SheetDef::new(
                SHEET_OUTCOMES,
                &[
                    "Outcome_ID",
                    "Univ_ID",
                    "Prog_ID",
                    "Employability Rate (%)",
                    "Average Starting Salary",
                    "Currency",
                    "Time to First Job (months)",
                    "Top Employers",
                    "Internship Opportunities",
                    "Industry Partnerships",
                    "Alumni Network Size",
                    "Alumni Events",
                    "Alumni Mentorship Programs",
                    "Further Study Rate (%)",
                    "Job Satisfaction (1-5)",
                    "Career Support Services",
                    "Visa Extension Options",
                    "Notes",
                ],
            )
            .with_key("Univ_ID"),
            SheetDef::new(
                SHEET_NOTES,
                &[
                    "Notes_ID",
                    "Univ_ID",
                    "Prog_ID",
                    "Personal Interest Level",
                    "Alignment with Career Goals",
                    "Cultural Fit",
                    "Family/Friends Nearby",
                    "Personal Comments",
                    "Date of Last Review",
                    "Next Steps",
                    "Final Decision",
                ],
            )
            .with_key("Univ_ID")
            .with_pick_list(
                "Personal Interest Level",
                &["1-Low", "2", "3-Medium", "4", "5-High"],
            )
            .with_pick_list(
                "Final Decision",
                &[
                    "Shortlist",
                    "Backup",
                    "Rejected",
                    "Top Choice",
                    "Applied",
                    "Accepted",
                    "Declined",
                ],
            ),
            SheetDef::new(
                SHEET_TIMELINE,
                &[
                    "Timeline_ID",
                    "Univ_ID",
                    "Prog_ID",
                    "Program Name",
                    "University",
                    "Program Deadline",
                    "Application Start Date",
                    "Document Preparation",
                    "Test Date(s)",
                    "Letter of Rec Deadline",
                    "Scholarship Deadline",
                    "Expected Response Date",
                    "Deposit Due Date",
                    "Visa Application Date",
                    "Housing Application",
                    "Orientation Date",
                    "Program Start Date",
                    "Status",
                    "Priority",
                    "Notes",
                ],
            )
            .with_key("Univ_ID")
            .with_pick_list(
                "Status",
                &["Not Started", "In Progress", "Completed", "Missed", "NA"],
            )
            .with_pick_list("Priority", &["High", "Medium", "Low"]),
            SheetDef::new(
                SHEET_DASHBOARD,
                &[
                    "Univ_ID",
                    "Prog_ID",
                    "University",
                    "Program",
                    "QS Ranking",
                    "Tuition (per year)",
                    "Monthly Living Costs",
                    "Employability Rate (%)",
                    "Personal Interest",
                    "Final Decision",
                ],
            )
            .with_key("Univ_ID"),
        ];

        Self { sheets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_valid() {
        let schema = WorkbookSchema::default_schema();
        schema.validate().expect("default schema validates");
        assert_eq!(schema.sheets.len(), 10);
        assert_eq!(schema.sheets[0].name, SHEET_UNIVERSITY);
        assert_eq!(schema.sheets[9].name, SHEET_DASHBOARD);
    }

    #[test]
    fn default_schema_keys_and_pick_lists_reference_declared_columns() {
        let schema = WorkbookSchema::default_schema();
        for sheet in &schema.sheets {
            assert!(!sheet.columns.is_empty(), "{} has columns", sheet.name);
            assert!(sheet.name.len() <= MAX_SHEET_NAME_LEN);
            if let Some(key) = &sheet.key {
                assert!(sheet.column_index(key).is_some(), "{}: key {key}", sheet.name);
            }
            for column in sheet.pick_lists.keys() {
                assert!(
                    sheet.column_index(column).is_some(),
                    "{}: pick list {column}",
                    sheet.name
                );
            }
        }
    }

    #[test]
    fn validate_rejects_duplicate_sheet_names() {
        let schema = WorkbookSchema {
            sheets: vec![
                SheetDef::new("Universities", &["Name"]),
                SheetDef::new("Universities", &["Name"]),
            ],
        };
        assert!(matches!(schema.validate(), Err(ToolError::InvalidSchema(_))));
    }

    #[test]
    fn validate_rejects_zero_column_sheet() {
        let schema = WorkbookSchema {
            sheets: vec![SheetDef::new("Empty", &[])],
        };
        assert!(matches!(schema.validate(), Err(ToolError::InvalidSchema(_))));
    }

    #[test]
    fn validate_rejects_unknown_key_column() {
        let schema = WorkbookSchema {
            sheets: vec![SheetDef::new("Universities", &["Name"]).with_key("Country")],
        };
        assert!(matches!(schema.validate(), Err(ToolError::InvalidSchema(_))));
    }

    #[test]
    fn schema_round_trips_through_json() {
        let schema = WorkbookSchema::default_schema();
        let json = serde_json::to_string(&schema).expect("schema serialises");
        let restored: WorkbookSchema = serde_json::from_str(&json).expect("schema deserialises");
        assert_eq!(schema, restored);
    }
}
