//! Extractors that need no network: location-derived cost rows and the
//! per-institution scaffolding for the personal-planning sheets.

use crate::error::Result;
use crate::fill::extract::{Extractor, FillContext, Record, UNKNOWN};
use crate::fill::roster::Institution;
use crate::schema::{SHEET_COST_OF_LIVING, SHEET_DASHBOARD, SHEET_NOTES, SHEET_TIMELINE};

/// Fills `6_Cost of Living` from roster facts (city, country, currency); the
/// amounts themselves are left for manual research.
pub struct CostOfLiving;

impl Extractor for CostOfLiving {
    fn name(&self) -> &'static str {
        "cost-of-living"
    }

    fn sheet(&self) -> &'static str {
        SHEET_COST_OF_LIVING
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let record = Record::new(SHEET_COST_OF_LIVING)
            .with("Cost_ID", ctx.next_id("CST"))
            .with("Univ_ID", &institution.id)
            .with("City", &institution.city)
            .with("Country", &institution.country)
            .with("Currency", &institution.currency)
            .with("Estimated Monthly Living Costs", UNKNOWN)
            .with("Housing Type", UNKNOWN)
            .with("Housing Costs", UNKNOWN)
            .with("Food/Groceries", UNKNOWN)
            .with("Public Transportation", UNKNOWN)
            .with("Utilities", UNKNOWN)
            .with("Health Insurance", UNKNOWN)
            .with("Textbooks & Supplies", UNKNOWN)
            .with("Climate", UNKNOWN)
            .with("Safety Rating", UNKNOWN)
            .with("Part-time Work Opportunities", UNKNOWN)
            .with("Visa Cost", UNKNOWN)
            .with("Visa Process", UNKNOWN)
            .with("Student Services", UNKNOWN)
            .with("Notes", "");
        Ok(vec![record])
    }
}

/// Seeds `8_Notes` with one empty personal-review row per institution.
pub struct NotesScaffold;

impl Extractor for NotesScaffold {
    fn name(&self) -> &'static str {
        "notes-scaffold"
    }

    fn sheet(&self) -> &'static str {
        SHEET_NOTES
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let record = Record::new(SHEET_NOTES)
            .with("Notes_ID", ctx.next_id("NOT"))
            .with("Univ_ID", &institution.id)
            .with("Prog_ID", "")
            .with("Personal Interest Level", "")
            .with("Alignment with Career Goals", "")
            .with("Cultural Fit", "")
            .with("Family/Friends Nearby", "")
            .with("Personal Comments", "")
            .with("Date of Last Review", "")
            .with("Next Steps", "")
            .with("Final Decision", "");
        Ok(vec![record])
    }
}

/// Seeds `9_Timeline` with one not-started application row per institution.
pub struct TimelineScaffold;

impl Extractor for TimelineScaffold {
    fn name(&self) -> &'static str {
        "timeline-scaffold"
    }

    fn sheet(&self) -> &'static str {
        SHEET_TIMELINE
    }

    fn extract(&self, ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let record = Record::new(SHEET_TIMELINE)
            .with("Timeline_ID", ctx.next_id("TL"))
            .with("Univ_ID", &institution.id)
            .with("Prog_ID", "")
            .with("Program Name", "")
            .with("University", &institution.name)
            .with("Program Deadline", UNKNOWN)
            .with("Application Start Date", UNKNOWN)
            .with("Document Preparation", "")
            .with("Test Date(s)", "")
            .with("Letter of Rec Deadline", "")
            .with("Scholarship Deadline", "")
            .with("Expected Response Date", "")
            .with("Deposit Due Date", "")
            .with("Visa Application Date", "")
            .with("Housing Application", "")
            .with("Orientation Date", "")
            .with("Program Start Date", UNKNOWN)
            .with("Status", "Not Started")
            .with("Priority", "Medium")
            .with("Notes", "");
        Ok(vec![record])
    }
}

/// Seeds `10_Dashboard` with one comparison row per institution; the
/// comparison cells stay empty until filled by hand.
pub struct DashboardSummary;

impl Extractor for DashboardSummary {
    fn name(&self) -> &'static str {
        "dashboard-summary"
    }

    fn sheet(&self) -> &'static str {
        SHEET_DASHBOARD
    }

    fn extract(&self, _ctx: &mut FillContext, institution: &Institution) -> Result<Vec<Record>> {
        let record = Record::new(SHEET_DASHBOARD)
            .with("Univ_ID", &institution.id)
            .with("Prog_ID", "")
            .with("University", &institution.name)
            .with("Program", "")
            .with("QS Ranking", "")
            .with("Tuition (per year)", "")
            .with("Monthly Living Costs", "")
            .with("Employability Rate (%)", "")
            .with("Personal Interest", "")
            .with("Final Decision", "");
        Ok(vec![record])
    }
}
