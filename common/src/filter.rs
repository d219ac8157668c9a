//! Filter derivation and the filter applier.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::JobRecord;

/// How the experience and pay thresholds compare against a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdMode {
    /// A job passes when the selected value is at least the job's minimum.
    #[default]
    AtMost,
    /// A job passes when its minimum is at least the selected value.
    AtLeast,
}

impl ThresholdMode {
    fn passes(self, selected: Option<i64>, job_value: Option<i64>) -> bool {
        match (selected, job_value) {
            (Some(selected), Some(value)) => match self {
                ThresholdMode::AtMost => selected >= value,
                ThresholdMode::AtLeast => value >= selected,
            },
            _ => true,
        }
    }
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdMode::AtMost => f.write_str("at-most"),
            ThresholdMode::AtLeast => f.write_str("at-least"),
        }
    }
}

impl FromStr for ThresholdMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "at-most" | "at_most" => Ok(ThresholdMode::AtMost),
            "at-least" | "at_least" => Ok(ThresholdMode::AtLeast),
            other => Err(format!(
                "unknown threshold mode '{other}', expected 'at-most' or 'at-least'"
            )),
        }
    }
}

/// Submitted filter criteria. Every unset field is a pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub locations: BTreeSet<String>,
    pub job_roles: BTreeSet<String>,
    pub min_experience: Option<i64>,
    pub min_base_pay: Option<i64>,
    pub company_name: String,
}

impl FilterRequest {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.job_roles.is_empty()
            && self.min_experience.is_none()
            && self.min_base_pay.is_none()
            && self.company_name.trim().is_empty()
    }

    /// Checks a single job against every active predicate, in order:
    /// location, role, experience, pay, company name.
    pub fn matches(&self, job: &JobRecord, mode: ThresholdMode) -> bool {
        if !self.locations.is_empty() && !self.locations.contains(&job.location) {
            return false;
        }
        if !self.job_roles.is_empty() && !self.job_roles.contains(&job.job_role) {
            return false;
        }
        if !mode.passes(self.min_experience, job.min_exp) {
            return false;
        }
        if !mode.passes(self.min_base_pay, job.min_jd_salary) {
            return false;
        }
        if !self.company_name.trim().is_empty() {
            let needle = self.company_name.to_lowercase();
            if !job.company_name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Narrows `jobs` to those matching `request`, keeping their order.
pub fn apply_filters<'a>(
    jobs: &'a [JobRecord],
    request: &FilterRequest,
    mode: ThresholdMode,
) -> Vec<&'a JobRecord> {
    jobs.iter().filter(|job| request.matches(job, mode)).collect()
}

/// Selectable values derived from the fetched jobs.
///
/// Every list is distinct and in order of first appearance. Numeric lists
/// are not sorted here; the filter bar sorts them when it renders menus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub job_roles: Vec<String>,
    pub min_experiences: Vec<i64>,
    pub min_base_pays: Vec<i64>,
}

impl FilterOptions {
    pub fn derive(jobs: &[JobRecord]) -> Self {
        Self {
            locations: distinct(jobs.iter().map(|job| job.location.clone())),
            job_roles: distinct(jobs.iter().map(|job| job.job_role.clone())),
            min_experiences: distinct(jobs.iter().filter_map(|job| job.min_exp)),
            min_base_pays: distinct(jobs.iter().filter_map(|job| job.min_jd_salary)),
        }
    }
}

fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}
