//! The board: one feed, its filter bar, scroll trigger and card toggles.

use std::collections::HashSet;
use std::sync::Arc;

use common::{FilterBar, FilterMenu, JobCard, JobRecord, PageRequest, ThresholdMode};
use feed::{FeedError, FetchOutcome, JobFeed, JobSource, ScrollTrigger};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{BoardError, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Mutex<Board>>,
    pub source: Arc<dyn JobSource>,
}

impl AppState {
    pub fn new(board: Board, source: Arc<dyn JobSource>) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            source,
        }
    }
}

/// Visible cards plus the feed status the view needs.
#[derive(Debug, Serialize)]
pub struct JobsView {
    pub loading: bool,
    pub has_more: bool,
    pub fetched: usize,
    pub visible: usize,
    pub cards: Vec<JobCard>,
}

#[derive(Debug)]
pub struct Board {
    feed: JobFeed,
    bar: FilterBar,
    trigger: ScrollTrigger,
    /// Expanded cards, by index into the fetched set.
    expanded: HashSet<usize>,
}

impl Board {
    pub fn new(page_size: usize, mode: ThresholdMode, scroll_margin: usize) -> Self {
        Self {
            feed: JobFeed::new(page_size, mode),
            bar: FilterBar::new(),
            trigger: ScrollTrigger::new(scroll_margin),
            expanded: HashSet::new(),
        }
    }

    pub fn feed(&self) -> &JobFeed {
        &self.feed
    }

    pub fn bar(&self) -> &FilterBar {
        &self.bar
    }

    pub fn bar_mut(&mut self) -> &mut FilterBar {
        &mut self.bar
    }

    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    pub fn menu(&self) -> FilterMenu {
        self.bar.menu(self.feed.options())
    }

    pub fn cards(&self) -> Vec<JobCard> {
        self.feed
            .visible_entries()
            .map(|(index, job)| JobCard::new(job).with_expanded(self.expanded.contains(&index)))
            .collect()
    }

    pub fn view(&self) -> JobsView {
        JobsView {
            loading: self.feed.is_loading(),
            has_more: self.feed.has_more(),
            fetched: self.feed.fetched().len(),
            visible: self.feed.visible_len(),
            cards: self.cards(),
        }
    }

    /// Applies the filter bar's draft to the feed.
    pub fn submit_filters(&mut self) -> usize {
        let visible = self.feed.apply(self.bar.submit());
        self.rearm();
        visible
    }

    /// Flips the card of the job with `jd_uid`. Jobs sent without a uid
    /// can only be reached through [`Board::toggle_card_at`].
    pub fn toggle_card(&mut self, jd_uid: &str) -> Result<JobCard> {
        let index = self
            .feed
            .fetched()
            .iter()
            .position(|job| !job.jd_uid.is_empty() && job.jd_uid == jd_uid)
            .ok_or_else(|| BoardError::UnknownCard(jd_uid.to_string()))?;
        Ok(self.toggle_index(index))
    }

    /// Flips the card at `position` in the visible list.
    pub fn toggle_card_at(&mut self, position: usize) -> Result<JobCard> {
        let (index, _) = self
            .feed
            .visible_entries()
            .nth(position)
            .ok_or_else(|| BoardError::UnknownCard(format!("#{position}")))?;
        Ok(self.toggle_index(index))
    }

    fn toggle_index(&mut self, index: usize) -> JobCard {
        let expanded = self.expanded.insert(index);
        if !expanded {
            self.expanded.remove(&index);
        }
        JobCard::new(&self.feed.fetched()[index]).with_expanded(expanded)
    }

    /// Reports the viewport. Returns the page to fetch when the last card is
    /// in view, nothing is in flight and more pages may exist.
    pub fn scrolled_to(&mut self, last_visible_index: usize) -> Option<PageRequest> {
        if !self.trigger.is_triggered(last_visible_index) || !self.feed.can_load_more() {
            return None;
        }
        self.begin_fetch()
    }

    pub fn begin_fetch(&mut self) -> Option<PageRequest> {
        let request = self.feed.begin_fetch();
        self.rearm();
        request
    }

    pub fn finish_fetch(&mut self, result: feed::Result<Vec<JobRecord>>) -> FetchOutcome {
        let outcome = self.feed.finish_fetch(result);
        self.rearm();
        outcome
    }

    /// Stops watching for scrolls; called when the view goes away.
    pub fn teardown(&mut self) {
        self.trigger.disconnect();
    }

    fn rearm(&mut self) {
        self.trigger.observe_last(self.feed.visible_len());
        debug!(watching = ?self.trigger.target(), "Scroll trigger re-armed");
    }
}

/// Runs one fetch against the shared board without holding the lock across
/// the request.
///
/// The fetch runs on its own task, so dropping the caller (a client that
/// disconnects mid-scroll) still finishes it and clears the loading flag.
pub async fn load_page(state: &AppState, request: Option<PageRequest>) -> Option<FetchOutcome> {
    let request = request?;
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let result = task_state.source.fetch_page(request).await;
        task_state.board.lock().await.finish_fetch(result)
    });

    match task.await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            warn!(error = %e, "Page fetch task did not complete");
            let failure = FeedError::Unavailable(format!("fetch task failed: {e}"));
            Some(state.board.lock().await.finish_fetch(Err(failure)))
        }
    }
}
