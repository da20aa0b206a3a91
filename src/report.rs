//! Summary report of a check run

use crate::config::VERSION_OVERVIEW_PAGE_URL;
use crate::manifest::types::VersionStatus;

/// Heading of the summary
pub const SUMMARY_HEADING: &str = "UI5 Version Check Result";

const COLUMNS: [&str; 5] = [
    "Manifest path",
    "Found version",
    "Updated version",
    "Status",
    "Description",
];

/// One summary row per checked manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub manifest_path: String,
    pub found_version: String,
    pub updated_version: String,
    pub status: VersionStatus,
    pub description: String,
}

impl ReportRow {
    fn cells(&self) -> [&str; 5] {
        [
            self.manifest_path.as_str(),
            self.found_version.as_str(),
            self.updated_version.as_str(),
            self.status.symbol(),
            self.description.as_str(),
        ]
    }
}

/// Render the rows as a markdown summary
pub fn render_summary(rows: &[ReportRow]) -> String {
    let mut out = format!("## {}\n\n", SUMMARY_HEADING);

    out.push_str(&table_line(&COLUMNS));
    out.push_str(&table_line(&["---"; 5]));
    for row in rows {
        out.push_str(&table_line(&row.cells()));
    }

    out.push_str(&format!(
        "\n[Check this link for valid UI5 versions that can be used in SAP BTP]({})\n",
        VERSION_OVERVIEW_PAGE_URL
    ));
    out
}

fn table_line(cells: &[&str]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |\n", escaped.join(" | "))
}
