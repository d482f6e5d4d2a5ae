//! Page copy: headings, prose and panel captions.

/// Page heading shown in the top bar.
pub const PAGE_TITLE: &str = "Hospital DB • Insights & Optimizations";

pub const JUMP_LABEL: &str = "Jump to Dashboard";

pub const CONTACT_LABEL: &str = "Contact Data Team";

pub const OVERVIEW_TEXT: &str = "As hospital data scaled to millions of rows, key queries—like \
patient‐appointment joins, prescription look‐ups, and nurse schedules—became prohibitively \
slow due to sequential scans.";

pub const OVERVIEW_BULLETS: [&str; 3] = [
    "We added B-tree indexes on critical foreign‐key and filter columns to reduce scan cost by ~90%.",
    "Converted string dates to native DATE types and indexed them for efficient range queries.",
    "Implemented a PostgreSQL trigger to audit inserts and demonstrate full-transaction atomicity.",
];

pub const HIGHLIGHTS_TEXT: &str = "After indexing, our expensive department‐patient join dropped \
from a full‐table cost of ~5,000 to under 500 on a 1M-row benchmark. The atomicity demo ensures \
rollback cleans up both data and audit logs, preventing orphan entries.";

pub const DASHBOARD_INTRO: &str = "Use hover tooltips for exact values and toggle series via the \
legend. These charts illustrate:";

pub const DASHBOARD_BULLETS: [&str; 6] = [
    "Monthly appointment volume trends.",
    "Drug prescription counts by category.",
    "Nurse on‐call distribution per block.",
    "Departmental patient loads and physician workloads.",
    "Transaction atomicity via trigger audit.",
    "Room availability ratios.",
];

pub const EMBED_PLACEHOLDER: &str = "Embedded BI dashboard goes here.";


/// Caption under a chart: an emphasised lead followed by plain text.
///
/// `text` carries its own leading separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caption {
    pub lead: &'static str,
    pub text: &'static str,
}


impl Caption {
    pub const fn new(lead: &'static str, text: &'static str) -> Self {
        Self { lead, text }
    }

    /// Lead and text joined the way the caption reads on the page.
    pub fn plain(&self) -> String {
        format!("{}{}", self.lead, self.text)
    }
}
