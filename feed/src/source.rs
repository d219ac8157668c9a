//! The remote job source.

use async_trait::async_trait;
use common::{JobPage, JobRecord, PageRequest};
use reqwest::Client;
use tracing::debug;

use crate::error::{FeedError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.weekday.technology/adhoc/getSampleJdJSON";

const PREVIEW_CHARS: usize = 1200;

/// Anything that can hand out one page of job records.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<JobRecord>>;
}

/// `POST {limit, offset}` against the sample JD endpoint.
#[derive(Clone)]
pub struct HttpJobSource {
    client: Client,
    endpoint: String,
}

impl HttpJobSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent("job-board/0.1").build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<JobRecord>> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        let page = decode_page(&body)?;
        debug!(
            offset = request.offset,
            returned = page.jd_list.len(),
            total = ?page.total_count,
            "Fetched job page"
        );
        Ok(page.jd_list)
    }
}

/// Parses a response body, keeping a preview of it when it is not a page.
fn decode_page(body: &str) -> Result<JobPage> {
    let trimmed = body.trim_start_matches('\u{FEFF}').trim();
    serde_json::from_str(trimmed).map_err(|source| {
        let mut preview: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        if trimmed.chars().count() > PREVIEW_CHARS {
            preview.push('…');
        }
        FeedError::Decode { source, preview }
    })
}
