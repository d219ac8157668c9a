//! Remote job source, pagination and the infinite-scroll trigger.

pub mod error;
pub mod pager;
pub mod source;
pub mod trigger;

pub use error::{FeedError, Result};
pub use pager::{FetchOutcome, JobFeed, DEFAULT_PAGE_SIZE};
pub use source::{HttpJobSource, JobSource, DEFAULT_ENDPOINT};
pub use trigger::ScrollTrigger;
