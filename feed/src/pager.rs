//! Pagination over the remote source.
//!
//! `JobFeed` keeps two layers: the append-only set of every record fetched
//! so far, and the visible view derived from it with the active filter.
//! Filtering only ever rebuilds the view.

use std::collections::HashSet;

use common::{FilterOptions, FilterRequest, JobRecord, PageRequest, ThresholdMode};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::source::JobSource;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// What a finished fetch did to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The page arrived. `added` excludes duplicates already fetched.
    Appended { returned: usize, added: usize },
    /// The page failed; nothing but the loading flag changed.
    Failed,
}

#[derive(Debug)]
pub struct JobFeed {
    fetched: Vec<JobRecord>,
    seen: HashSet<String>,
    visible: Vec<usize>,
    active: FilterRequest,
    mode: ThresholdMode,
    options: FilterOptions,
    offset: usize,
    page_size: usize,
    loading: bool,
    has_more: bool,
}

impl Default for JobFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, ThresholdMode::default())
    }
}

impl JobFeed {
    pub fn new(page_size: usize, mode: ThresholdMode) -> Self {
        Self {
            fetched: Vec::new(),
            seen: HashSet::new(),
            visible: Vec::new(),
            active: FilterRequest::default(),
            mode,
            options: FilterOptions::default(),
            offset: 0,
            page_size: page_size.max(1),
            loading: false,
            has_more: true,
        }
    }

    /// Every record fetched so far, in arrival order.
    pub fn fetched(&self) -> &[JobRecord] {
        &self.fetched
    }

    /// The fetched records that pass the active filter.
    pub fn visible(&self) -> Vec<&JobRecord> {
        self.visible.iter().map(|&i| &self.fetched[i]).collect()
    }

    /// Visible records paired with their index in [`JobFeed::fetched`].
    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &JobRecord)> + '_ {
        self.visible.iter().map(|&i| (i, &self.fetched[i]))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn active_filter(&self) -> &FilterRequest {
        &self.active
    }

    pub fn threshold_mode(&self) -> ThresholdMode {
        self.mode
    }

    /// Raw count of records received from the remote, used as the next offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading
    }

    /// Marks a fetch as in flight and returns the page to ask for.
    /// Returns `None` while another fetch is still in flight.
    pub fn begin_fetch(&mut self) -> Option<PageRequest> {
        if self.loading {
            debug!(offset = self.offset, "Fetch already in flight, skipping");
            return None;
        }
        self.loading = true;
        Some(PageRequest {
            limit: self.page_size,
            offset: self.offset,
        })
    }

    /// Completes the fetch started by [`JobFeed::begin_fetch`].
    ///
    /// Failures are logged and swallowed: only the loading flag is cleared.
    pub fn finish_fetch(&mut self, result: Result<Vec<JobRecord>>) -> FetchOutcome {
        self.loading = false;

        let records = match result {
            Ok(records) => records,
            Err(e) => {
                warn!(offset = self.offset, error = %e, "Failed to fetch job page");
                return FetchOutcome::Failed;
            }
        };

        let returned = records.len();
        self.offset += returned;
        self.has_more = returned > 0;

        let mut added = 0;
        for record in records {
            // Records without a uid cannot be told apart, keep them all.
            // Callers key per-record state by fetched index, never by uid.
            if !record.jd_uid.is_empty() && !self.seen.insert(record.jd_uid.clone()) {
                debug!(jd_uid = %record.jd_uid, "Skipping duplicate job");
                continue;
            }
            if self.active.matches(&record, self.mode) {
                self.visible.push(self.fetched.len());
            }
            self.fetched.push(record);
            added += 1;
        }

        if added > 0 {
            self.options = FilterOptions::derive(&self.fetched);
        }

        info!(
            returned,
            added,
            fetched = self.fetched.len(),
            has_more = self.has_more,
            "Job page loaded"
        );
        FetchOutcome::Appended { returned, added }
    }

    /// Fetches the next page from `source` while holding the feed.
    pub async fn fetch_next_page(&mut self, source: &dyn JobSource) -> Option<FetchOutcome> {
        let request = self.begin_fetch()?;
        let result = source.fetch_page(request).await;
        Some(self.finish_fetch(result))
    }

    /// Makes `request` the active filter and rebuilds the visible view from
    /// the fetched set. Returns the number of visible records.
    pub fn apply(&mut self, request: FilterRequest) -> usize {
        self.active = request;
        self.visible = self
            .fetched
            .iter()
            .enumerate()
            .filter(|(_, job)| self.active.matches(job, self.mode))
            .map(|(i, _)| i)
            .collect();

        info!(
            visible = self.visible.len(),
            fetched = self.fetched.len(),
            "Applied job filter"
        );
        self.visible.len()
    }
}
