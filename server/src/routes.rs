//! HTTP surface of the board.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use common::{FilterMenu, FilterRequest, JobCard};
use feed::FetchOutcome;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{AppState, JobsView, load_page};
use crate::error::Result;

/// One edit to the filter bar draft, as a single menu interaction.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterEdit {
    ToggleLocation { value: String },
    ToggleJobRole { value: String },
    SelectMinExperience { value: Option<i64> },
    SelectMinBasePay { value: Option<i64> },
    SetCompanyName { value: String },
    Clear,
}

/// Viewport report sent while scrolling.
#[derive(Debug, Deserialize)]
pub struct ScrollReport {
    pub last_visible_index: usize,
}

#[derive(Debug, Serialize)]
pub struct ScrollResponse {
    pub triggered: bool,
    pub outcome: Option<FetchOutcome>,
    pub loading: bool,
    pub has_more: bool,
    pub fetched: usize,
    pub visible: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/jobs", get(jobs_handler))
        .route("/cards", get(cards_handler))
        .route(
            "/filters",
            get(filters_handler)
                .put(update_filters_handler)
                .patch(edit_filters_handler),
        )
        .route("/search", post(search_handler))
        .route("/scroll", post(scroll_handler))
        .route("/cards/{jd_uid}/toggle", post(toggle_handler))
        .route("/cards/at/{position}/toggle", post(toggle_at_handler))
        .with_state(state)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    concat!(
        "🔍 Job Board\n\n",
        "Endpoints:\n",
        "  GET   /jobs                        - Visible job cards (JSON)\n",
        "  GET   /cards                       - Visible job cards (text)\n",
        "  GET   /filters                     - Filter menus\n",
        "  PUT   /filters                     - Replace the filter draft\n",
        "  PATCH /filters                     - Edit one field of the filter draft\n",
        "  POST  /search                      - Apply the filter draft\n",
        "  POST  /scroll                      - Report {\"last_visible_index\": n}\n",
        "  POST  /cards/{jd_uid}/toggle       - View more / view less\n",
        "  POST  /cards/at/{position}/toggle  - Same, by position in the list\n",
    )
}

async fn jobs_handler(State(state): State<AppState>) -> Json<JobsView> {
    Json(state.board.lock().await.view())
}

async fn cards_handler(State(state): State<AppState>) -> String {
    let board = state.board.lock().await;
    let cards = board.cards();
    if cards.is_empty() {
        return "No jobs to show.\n".to_string();
    }
    let mut out = cards
        .iter()
        .map(JobCard::to_string)
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

async fn filters_handler(State(state): State<AppState>) -> Json<FilterMenu> {
    Json(state.board.lock().await.menu())
}

async fn update_filters_handler(
    State(state): State<AppState>,
    Json(draft): Json<FilterRequest>,
) -> Json<FilterMenu> {
    let mut board = state.board.lock().await;
    board.bar_mut().replace(draft);
    Json(board.menu())
}

async fn edit_filters_handler(
    State(state): State<AppState>,
    Json(edit): Json<FilterEdit>,
) -> Json<FilterMenu> {
    let mut board = state.board.lock().await;
    let bar = board.bar_mut();
    match edit {
        FilterEdit::ToggleLocation { value } => bar.toggle_location(&value),
        FilterEdit::ToggleJobRole { value } => bar.toggle_job_role(&value),
        FilterEdit::SelectMinExperience { value } => bar.select_min_experience(value),
        FilterEdit::SelectMinBasePay { value } => bar.select_min_base_pay(value),
        FilterEdit::SetCompanyName { value } => bar.set_company_name(value),
        FilterEdit::Clear => bar.clear(),
    }
    Json(board.menu())
}

async fn search_handler(State(state): State<AppState>) -> Json<JobsView> {
    let mut board = state.board.lock().await;
    let unfiltered = board.bar().draft().is_empty();
    let visible = board.submit_filters();
    info!(visible, unfiltered, "🔎 Search submitted");
    Json(board.view())
}

async fn scroll_handler(
    State(state): State<AppState>,
    Json(report): Json<ScrollReport>,
) -> Json<ScrollResponse> {
    let request = state
        .board
        .lock()
        .await
        .scrolled_to(report.last_visible_index);
    let triggered = request.is_some();
    let outcome = load_page(&state, request).await;

    let board = state.board.lock().await;
    let feed = board.feed();
    Json(ScrollResponse {
        triggered,
        outcome,
        loading: feed.is_loading(),
        has_more: feed.has_more(),
        fetched: feed.fetched().len(),
        visible: feed.visible_len(),
    })
}

async fn toggle_handler(
    State(state): State<AppState>,
    Path(jd_uid): Path<String>,
) -> Result<Json<JobCard>> {
    let card = state.board.lock().await.toggle_card(&jd_uid)?;
    Ok(Json(card))
}

async fn toggle_at_handler(
    State(state): State<AppState>,
    Path(position): Path<usize>,
) -> Result<Json<JobCard>> {
    let card = state.board.lock().await.toggle_card_at(position)?;
    Ok(Json(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use common::{JobRecord, PageRequest, ThresholdMode};
    use feed::JobSource;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    /// Serves `records` by offset. With a gate, every page after the first
    /// waits for the gate to open.
    struct FakeSource {
        records: Vec<JobRecord>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl JobSource for FakeSource {
        async fn fetch_page(&self, request: PageRequest) -> feed::Result<Vec<JobRecord>> {
            if let Some(gate) = &self.gate {
                if request.offset > 0 {
                    gate.notified().await;
                }
            }
            Ok(self
                .records
                .iter()
                .skip(request.offset)
                .take(request.limit)
                .cloned()
                .collect())
        }
    }

    fn fake_records() -> Vec<JobRecord> {
        let companies = ["Google", "Dropbox", "Stripe", "Googlers"];
        companies
            .iter()
            .enumerate()
            .map(|(i, company)| JobRecord {
                jd_uid: format!("uid-{i}"),
                company_name: company.to_string(),
                location: if i % 2 == 0 { "remote" } else { "mumbai" }.to_string(),
                job_role: "backend".to_string(),
                min_jd_salary: Some(100000 * (i as i64 + 1)),
                job_details_from_company: "d".repeat(250),
                ..Default::default()
            })
            .collect()
    }

    /// A board with page size 2 and its first page already loaded.
    async fn loaded_state(source: FakeSource) -> AppState {
        let state = AppState::new(Board::new(2, ThresholdMode::AtMost, 0), Arc::new(source));
        let request = state.board.lock().await.begin_fetch();
        load_page(&state, request).await;
        state
    }

    async fn test_state() -> AppState {
        loaded_state(FakeSource {
            records: fake_records(),
            gate: None,
        })
        .await
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = router(state.clone())
            .oneshot(request(method, uri, body))
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn scroll(state: &AppState, last_visible_index: usize) -> Value {
        let body = json!({ "last_visible_index": last_visible_index });
        send(state, "POST", "/scroll", Some(body)).await.1
    }

    #[tokio::test]
    async fn test_jobs_lists_first_page() {
        let state = test_state().await;
        let (status, body) = send(&state, "GET", "/jobs", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fetched"], 2);
        assert_eq!(body["has_more"], true);
        assert_eq!(body["cards"][0]["company_name"], "Google");
        assert_eq!(body["cards"][0]["toggle_label"], "View more");
    }

    #[tokio::test]
    async fn test_scroll_loads_until_exhausted() {
        let state = test_state().await;

        let body = scroll(&state, 0).await;
        assert_eq!(body["triggered"], false);

        let body = scroll(&state, 1).await;
        assert_eq!(body["triggered"], true);
        assert_eq!(body["outcome"]["status"], "appended");
        assert_eq!(body["fetched"], 4);

        let body = scroll(&state, 3).await;
        assert_eq!(body["outcome"]["returned"], 0);
        assert_eq!(body["has_more"], false);

        let body = scroll(&state, 3).await;
        assert_eq!(body["triggered"], false);
    }

    #[tokio::test]
    async fn test_dropped_scroll_still_finishes_fetch() {
        let gate = Arc::new(Notify::new());
        let state = loaded_state(FakeSource {
            records: fake_records(),
            gate: Some(gate.clone()),
        })
        .await;

        // The client gives up while the page is still in flight
        let body = json!({ "last_visible_index": 1 });
        let pending = router(state.clone()).oneshot(request("POST", "/scroll", Some(body)));
        assert!(tokio::time::timeout(Duration::from_millis(50), pending).await.is_err());
        assert!(state.board.lock().await.feed().is_loading());

        gate.notify_one();
        for _ in 0..100 {
            if !state.board.lock().await.feed().is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let board = state.board.lock().await;
        assert!(!board.feed().is_loading());
        assert_eq!(board.feed().fetched().len(), 4);
        assert!(board.feed().can_load_more());
        assert_eq!(board.trigger().target(), Some(3));
    }

    #[tokio::test]
    async fn test_filters_apply_only_on_search_and_rewiden() {
        let state = test_state().await;
        scroll(&state, 1).await;

        let draft = json!({ "company_name": "GOOG" });
        let (_, menu) = send(&state, "PUT", "/filters", Some(draft)).await;
        assert_eq!(menu["company_name"], "GOOG");
        let (_, jobs) = send(&state, "GET", "/jobs", None).await;
        assert_eq!(jobs["visible"], 4);

        let (_, jobs) = send(&state, "POST", "/search", None).await;
        assert_eq!(jobs["visible"], 2);
        assert_eq!(jobs["fetched"], 4);
        assert_eq!(jobs["cards"][1]["company_name"], "Googlers");

        send(&state, "PUT", "/filters", Some(json!({}))).await;
        let (_, jobs) = send(&state, "POST", "/search", None).await;
        assert_eq!(jobs["visible"], 4);
    }

    #[tokio::test]
    async fn test_patch_filters_edits_one_field_at_a_time() {
        let state = test_state().await;

        let edit = json!({ "action": "toggle_location", "value": "mumbai" });
        let (status, menu) = send(&state, "PATCH", "/filters", Some(edit)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(menu["locations"][1]["value"], "mumbai");
        assert_eq!(menu["locations"][1]["selected"], true);

        let edit = json!({ "action": "select_min_base_pay", "value": 200000 });
        let (_, menu) = send(&state, "PATCH", "/filters", Some(edit)).await;
        assert_eq!(menu["min_base_pays"][1]["selected"], true);

        let (_, jobs) = send(&state, "POST", "/search", None).await;
        assert_eq!(jobs["visible"], 1);
        assert_eq!(jobs["cards"][0]["jd_uid"], "uid-1");

        let edit = json!({ "action": "clear" });
        let (_, menu) = send(&state, "PATCH", "/filters", Some(edit)).await;
        assert_eq!(menu["locations"][1]["selected"], false);
        let (_, jobs) = send(&state, "POST", "/search", None).await;
        assert_eq!(jobs["visible"], 2);
    }

    #[tokio::test]
    async fn test_min_base_pay_search() {
        let state = test_state().await;
        let draft = json!({ "min_base_pay": 150000 });
        send(&state, "PUT", "/filters", Some(draft)).await;
        let (_, jobs) = send(&state, "POST", "/search", None).await;

        assert_eq!(jobs["visible"], 1);
        assert_eq!(jobs["cards"][0]["jd_uid"], "uid-0");
    }

    #[tokio::test]
    async fn test_filter_menu_lists_options() {
        let state = test_state().await;
        let (status, menu) = send(&state, "GET", "/filters", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(menu["locations"][0]["value"], "remote");
        assert_eq!(menu["locations"][1]["value"], "mumbai");
        assert_eq!(menu["min_base_pays"][0]["value"], 100000);
    }

    #[tokio::test]
    async fn test_toggle_card() {
        let state = test_state().await;
        let (status, card) = send(&state, "POST", "/cards/uid-1/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["expanded"], true);
        assert_eq!(card["details"].as_str().unwrap().len(), 250);

        let (status, _) = send(&state, "POST", "/cards/nope/toggle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_card_by_position() {
        let state = test_state().await;
        let (status, card) = send(&state, "POST", "/cards/at/1/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["jd_uid"], "uid-1");
        assert_eq!(card["toggle_label"], "View less");

        let (status, _) = send(&state, "POST", "/cards/at/7/toggle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cards_text() {
        let state = test_state().await;
        let response = router(state)
            .oneshot(request("GET", "/cards", None))
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.starts_with("Google"));
        assert!(text.contains("Dropbox"));
        assert!(text.contains("(View more)"));
    }
}
