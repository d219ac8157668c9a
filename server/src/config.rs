use std::net::SocketAddr;

use clap::Parser;
use common::ThresholdMode;
use feed::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE};

#[derive(Parser, Debug, Clone)]
#[command(name = "job-board")]
#[command(version)]
#[command(about = "Browse and filter job postings from a remote job source")]
pub struct Args {
    /// Address the board listens on
    #[arg(long, env = "JOBBOARD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Remote job source accepting `{limit, offset}`
    #[arg(long, env = "JOBBOARD_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Jobs requested per page
    #[arg(long, env = "JOBBOARD_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Cards before the last one that already count as reaching the end
    #[arg(long, env = "JOBBOARD_SCROLL_MARGIN", default_value_t = 0)]
    pub scroll_margin: usize,

    /// Experience and pay comparison: "at-most" (selected >= job minimum)
    /// or "at-least" (job minimum >= selected)
    #[arg(long, env = "JOBBOARD_THRESHOLD", default_value_t = ThresholdMode::AtMost)]
    pub threshold: ThresholdMode,
}
