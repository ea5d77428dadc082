//! HTTP API Client
//!
//! Functions for communicating with the CareLoop agent backend. Every call
//! is bounded by [`REQUEST_TIMEOUT_MS`]; a timed-out call surfaces as a
//! retryable [`ApiError::Timeout`], never a hung widget.

use futures_util::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;

use crate::api::error::{ApiError, ApiErrorBody};
use crate::state::actions::ActionInvocation;
use crate::state::global::{FoodLogRecord, GlucosePoint, MealPlanItem};

/// Default backend base URL when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Upper bound for any single backend call, in milliseconds.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

const STORAGE_KEY: &str = "careloop_backend_url";

/// Get the backend base URL from local storage or use the default.
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item(STORAGE_KEY) {
                url
            } else {
                DEFAULT_BACKEND_URL.to_string()
            }
        } else {
            DEFAULT_BACKEND_URL.to_string()
        }
    } else {
        DEFAULT_BACKEND_URL.to_string()
    };
    normalize_base(&url)
}

/// Set the backend base URL in local storage.
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(STORAGE_KEY, &normalize_base(url));
        }
    }
}

/// Normalize a base URL: strip surrounding whitespace and trailing slashes.
fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Response Types ============

/// Dashboard state as the backend sees it. Every field is optional on the
/// wire; a missing field renders as its empty state, never a crash.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub glucose: Vec<GlucosePoint>,
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub food_logs: Vec<FoodLogRecord>,
    #[serde(default)]
    pub meal_plan: Vec<MealPlanItem>,
}

/// One assistant turn from the chat endpoint. The optional action envelope
/// is how the backend invokes a frontend capability.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ChatReply {
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub action: Option<ActionInvocation>,
}

#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

// ============ API Functions ============

/// Backend handshake. The page stays in its loading state until this
/// resolves one way or the other.
pub async fn check_health() -> Result<HealthResponse, ApiError> {
    let api_base = get_api_base();

    with_timeout(async move {
        let response = Request::get(&format!("{}/health", api_base))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(response).await
    })
    .await
}

/// Fetch the full dashboard snapshot for a user.
pub async fn fetch_snapshot(user_id: u32) -> Result<DashboardSnapshot, ApiError> {
    let api_base = get_api_base();

    with_timeout(async move {
        let response = Request::get(&format!("{}/dashboard?user_id={}", api_base, user_id))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(response).await
    })
    .await
}

/// Submit a food log entry. Returns the updated dashboard snapshot.
pub async fn submit_food_log(
    user_id: u32,
    description: &str,
) -> Result<DashboardSnapshot, ApiError> {
    #[derive(serde::Serialize)]
    struct FoodLogRequest {
        user_id: u32,
        description: String,
    }

    post_json(
        "logs/food",
        &FoodLogRequest {
            user_id,
            description: description.to_string(),
        },
    )
    .await
}

/// Submit a CGM reading in mg/dL. Returns the updated dashboard snapshot.
pub async fn submit_cgm_reading(user_id: u32, reading: f64) -> Result<DashboardSnapshot, ApiError> {
    #[derive(serde::Serialize)]
    struct CgmLogRequest {
        user_id: u32,
        reading: f64,
    }

    post_json("logs/cgm", &CgmLogRequest { user_id, reading }).await
}

/// Submit a mood entry. Returns the updated dashboard snapshot.
pub async fn submit_mood(user_id: u32, mood: &str) -> Result<DashboardSnapshot, ApiError> {
    #[derive(serde::Serialize)]
    struct MoodLogRequest {
        user_id: u32,
        mood: String,
    }

    post_json(
        "logs/mood",
        &MoodLogRequest {
            user_id,
            mood: mood.to_string(),
        },
    )
    .await
}

/// Ask the backend to generate a fresh meal plan. Returns the updated
/// dashboard snapshot with the new plan.
pub async fn request_meal_plan(user_id: u32) -> Result<DashboardSnapshot, ApiError> {
    #[derive(serde::Serialize)]
    struct MealPlanRequest {
        user_id: u32,
    }

    post_json("meal-plan", &MealPlanRequest { user_id }).await
}

/// Send one chat message to the agent endpoint.
///
/// The wire contract here is provisional; the real agent protocol is owned
/// by the backend and may replace this endpoint wholesale.
pub async fn send_chat_message(
    message: &str,
    user_id: Option<u32>,
) -> Result<ChatReply, ApiError> {
    #[derive(serde::Serialize)]
    struct ChatRequest {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<u32>,
    }

    let api_base = get_api_base();
    let body = ChatRequest {
        message: message.to_string(),
        user_id,
    };

    with_timeout(async move {
        let response = Request::post(&format!("{}/agno", api_base))
            .json(&body)
            .map_err(request_build_error)?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(response).await
    })
    .await
}

// ============ Internals ============

/// POST a JSON body to `{base}/{path}` and parse a snapshot out of it.
async fn post_json<B: serde::Serialize>(
    path: &str,
    body: &B,
) -> Result<DashboardSnapshot, ApiError> {
    let url = format!("{}/{}", get_api_base(), path);
    let request = Request::post(&url).json(body).map_err(request_build_error)?;

    with_timeout(async move {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(response).await
    })
    .await
}

/// A request that never left the client: the body failed to serialize.
/// Not a network condition.
fn request_build_error(e: gloo_net::Error) -> ApiError {
    ApiError::Parse(format!("request build error: {}", e))
}

/// Race a request future against the request timeout.
async fn with_timeout<T, F>(fut: F) -> Result<T, ApiError>
where
    F: std::future::Future<Output = Result<T, ApiError>>,
{
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    futures_util::pin_mut!(fut, timeout);

    match select(fut, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

/// Turn a raw response into a typed result, mapping non-2xx statuses to
/// [`ApiError::Api`] with whatever error body the backend sent.
async fn parse_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ApiError::Api { status, message });
    }

    response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_strips_trailing_slash() {
        assert_eq!(normalize_base("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base("  http://api.example.com//  "), "http://api.example.com");
        assert_eq!(normalize_base("http://localhost:8000"), "http://localhost:8000");
    }

    #[test]
    fn test_snapshot_tolerates_missing_fields() {
        let snapshot: DashboardSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.glucose.is_empty());
        assert!(snapshot.moods.is_empty());
        assert!(snapshot.food_logs.is_empty());
        assert!(snapshot.meal_plan.is_empty());
    }

    #[test]
    fn test_snapshot_tolerates_partial_points() {
        // A glucose point with no value must come through as unknown.
        let snapshot: DashboardSnapshot =
            serde_json::from_str(r#"{"glucose": [{"label": "Wed"}]}"#).unwrap();
        assert_eq!(snapshot.glucose.len(), 1);
        assert_eq!(snapshot.glucose[0].label, "Wed");
        assert!(snapshot.glucose[0].value.is_none());
        assert!(snapshot.glucose[0].target.is_none());
    }

    #[test]
    fn test_body_serialization_failure_is_not_a_network_error() {
        let serde_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let mapped = request_build_error(gloo_net::Error::SerdeError(serde_err));
        assert!(matches!(mapped, ApiError::Parse(_)));
    }

    #[test]
    fn test_chat_reply_without_action() {
        let reply: ChatReply = serde_json::from_str(r#"{"content": "Hello!"}"#).unwrap();
        assert_eq!(reply.content, "Hello!");
        assert!(reply.action.is_none());
    }

    #[test]
    fn test_chat_reply_with_action_envelope() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"content": "Logged.", "role": "assistant",
                "action": {"name": "log_cgm", "params": {"reading": 142.0}}}"#,
        )
        .unwrap();
        match reply.action {
            Some(ActionInvocation::LogCgm { reading }) => assert_eq!(reading, 142.0),
            other => panic!("unexpected action: {:?}", other),
        }
    }
}
