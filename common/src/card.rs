//! Card rendering for a single job.

use std::fmt;

use serde::Serialize;

use crate::JobRecord;

/// Characters of job details shown on a collapsed card.
pub const DETAILS_PREVIEW_CHARS: usize = 200;

/// Cuts `text` to its first `n` characters and appends `...`.
/// Text shorter than `n` characters is returned unchanged.
pub fn truncate(text: &str, n: usize) -> String {
    match text.char_indices().nth(n) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None if text.chars().count() == n => format!("{text}..."),
        None => text.to_string(),
    }
}

/// A rendered job card. The only local state is the expand toggle.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobCard {
    pub jd_uid: String,
    pub logo_url: String,
    pub company_name: String,
    pub job_role: String,
    pub location: String,
    pub salary: String,
    pub details: String,
    pub toggle_label: &'static str,
    pub experience: Option<String>,
    pub apply_link: String,
    pub expanded: bool,
    #[serde(skip)]
    preview: String,
    #[serde(skip)]
    full_details: String,
}

impl JobCard {
    /// Renders a collapsed card.
    pub fn new(job: &JobRecord) -> Self {
        let preview = truncate(&job.job_details_from_company, DETAILS_PREVIEW_CHARS);
        Self {
            jd_uid: job.jd_uid.clone(),
            logo_url: job.logo_url.clone(),
            company_name: job.company_name.clone(),
            job_role: job.job_role.clone(),
            location: job.location.clone(),
            salary: salary_line(job),
            details: preview.clone(),
            toggle_label: "View more",
            experience: experience_line(job),
            apply_link: job.jd_link.clone(),
            expanded: false,
            preview,
            full_details: job.job_details_from_company.clone(),
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        if self.expanded != expanded {
            self.toggle();
        }
        self
    }

    /// Swaps between the truncated and the full job details.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        if self.expanded {
            self.details = self.full_details.clone();
            self.toggle_label = "View less";
        } else {
            self.details = self.preview.clone();
            self.toggle_label = "View more";
        }
    }
}

fn salary_line(job: &JobRecord) -> String {
    let range = match (job.min_jd_salary, job.max_jd_salary) {
        (Some(min), Some(max)) => format!("{min} - {max}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => return "Estimate Salary: Not disclosed".to_string(),
    };
    if job.salary_currency_code.is_empty() {
        format!("Estimate Salary: {range}")
    } else {
        format!("Estimate Salary: {range} {}", job.salary_currency_code)
    }
}

fn experience_line(job: &JobRecord) -> Option<String> {
    let min = job.min_exp.filter(|years| *years != 0)?;
    Some(match job.max_exp {
        Some(max) => format!("{min} - {max} years"),
        None => format!("{min}+ years"),
    })
}

impl fmt::Display for JobCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.company_name, self.logo_url)?;
        writeln!(f, "{}", self.job_role)?;
        writeln!(f, "{}", self.location)?;
        writeln!(f, "{}", self.salary)?;
        writeln!(f, "Job Details")?;
        writeln!(f, "{}", self.details)?;
        writeln!(f, "({})", self.toggle_label)?;
        if let Some(experience) = &self.experience {
            writeln!(f, "Minimum Experience: {experience}")?;
        }
        write!(f, "EASY APPLY: {}", self.apply_link)
    }
}
