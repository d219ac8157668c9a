//! Shared job board model.
//!
//! Wire types for the remote job source plus the pure, in-memory parts of the
//! board: filter derivation, the filter bar, the filter applier and card
//! rendering.

use serde::{Deserialize, Serialize};

pub mod card;
pub mod filter;
pub mod filter_bar;

pub use card::JobCard;
pub use filter::{FilterOptions, FilterRequest, ThresholdMode, apply_filters};
pub use filter_bar::{FilterBar, FilterMenu, MenuEntry};

/// One job posting, exactly as the remote source sends it.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub jd_link: String,
    #[serde(default)]
    pub jd_uid: String,
    #[serde(default)]
    pub job_details_from_company: String,
    #[serde(default)]
    pub job_role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub max_exp: Option<i64>,
    #[serde(default)]
    pub max_jd_salary: Option<i64>,
    #[serde(default)]
    pub min_exp: Option<i64>,
    #[serde(default)]
    pub min_jd_salary: Option<i64>,
    #[serde(default)]
    pub salary_currency_code: String,
}

/// Request body for one page of the remote source.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

/// Response body of the remote source.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    #[serde(default)]
    pub jd_list: Vec<JobRecord>,
    #[serde(default)]
    pub total_count: Option<u64>,
}
