//! Jules HTTP API client

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info};

use super::audit::AuditLog;

const BASE_URL: &str = "https://jules.googleapis.com/v1alpha";

/// Read calls time out quickly; session creation is allowed to take longer.
const READ_TIMEOUT: Duration = Duration::from_secs(10);
const CREATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the Jules API. An empty session list is `Ok`, never an error.
#[derive(Debug, thiserror::Error)]
pub enum JulesError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jules API error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse Jules API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One session as reported by the list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
}

/// Full session record from get/create
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDetail {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl SessionDetail {
    /// The API sometimes omits `url`; fall back to the canonical web address.
    pub fn url(&self) -> String {
        self.url.clone().unwrap_or_else(|| {
            format!(
                "https://jules.google.com/session/{}",
                clean_session_id(&self.id)
            )
        })
    }
}

/// One activity entry for a session
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    #[serde(rename = "type", default)]
    pub activity_type: String,
    #[serde(rename = "createTime", default)]
    pub create_time: String,
}

#[derive(Debug, Deserialize)]
struct SessionList {
    #[serde(default)]
    sessions: Vec<Session>,
}

#[derive(Debug, Deserialize)]
struct ActivityList {
    #[serde(default)]
    activities: Vec<Activity>,
}

/// Strip the `sessions/` resource prefix the API sometimes includes.
pub fn clean_session_id(id: &str) -> &str {
    id.strip_prefix("sessions/").unwrap_or(id)
}

/// Client for the Jules API
pub struct JulesClient {
    client: Client,
    base_url: String,
    api_key: String,
    audit: AuditLog,
}

impl JulesClient {
    pub fn new(api_key: impl Into<String>, audit: AuditLog) -> Result<Self, JulesError> {
        Self::with_base_url(api_key, BASE_URL, audit)
    }

    /// A builder failure here would mean running without the configured
    /// timeouts, so it is propagated instead of papered over.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        audit: AuditLog,
    ) -> Result<Self, JulesError> {
        let client = Client::builder()
            .timeout(READ_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            audit,
        })
    }

    /// Fetch the most recent sessions
    pub async fn list_sessions(&self, page_size: u32) -> Result<Vec<Session>, JulesError> {
        let url = format!("{}/sessions", self.base_url);

        debug!("Listing Jules sessions (page size {})", page_size);

        let raw = self
            .get_json(
                self.client
                    .get(&url)
                    .query(&[("pageSize", page_size.to_string())]),
            )
            .await?;
        self.audit.record("list_sessions", &raw);

        let list: SessionList = serde_json::from_value(raw)?;
        Ok(list.sessions)
    }

    /// Fetch details for one session. Accepts a raw id or `sessions/<id>`.
    pub async fn get_session(&self, session_id: &str) -> Result<SessionDetail, JulesError> {
        let clean_id = clean_session_id(session_id);
        let url = format!("{}/sessions/{}", self.base_url, clean_id);

        debug!("Fetching Jules session {}", clean_id);

        let raw = self.get_json(self.client.get(&url)).await?;
        self.audit.record(&format!("get_session/{}", clean_id), &raw);

        Ok(serde_json::from_value(raw)?)
    }

    /// Fetch activities for one session. Accepts a raw id or `sessions/<id>`.
    pub async fn list_activities(
        &self,
        session_id: &str,
        page_size: u32,
    ) -> Result<Vec<Activity>, JulesError> {
        let clean_id = clean_session_id(session_id);
        let url = format!("{}/sessions/{}/activities", self.base_url, clean_id);

        debug!("Listing activities for Jules session {}", clean_id);

        let raw = self
            .get_json(
                self.client
                    .get(&url)
                    .query(&[("pageSize", page_size.to_string())]),
            )
            .await?;
        self.audit
            .record(&format!("list_activities/{}", clean_id), &raw);

        let list: ActivityList = serde_json::from_value(raw)?;
        Ok(list.activities)
    }

    /// Create a new session against a GitHub repo
    pub async fn create_session(
        &self,
        repo_owner: &str,
        repo_name: &str,
        prompt: &str,
        branch: &str,
    ) -> Result<SessionDetail, JulesError> {
        let url = format!("{}/sessions", self.base_url);

        let payload = json!({
            "sourceContext": {
                "source": format!("sources/github/{}/{}", repo_owner, repo_name),
                "githubRepoContext": {
                    "startingBranch": branch,
                },
            },
            "prompt": prompt,
        });

        debug!("Creating Jules session on {}/{}", repo_owner, repo_name);

        let raw = self
            .get_json(
                self.client
                    .post(&url)
                    .timeout(CREATE_TIMEOUT)
                    .json(&payload),
            )
            .await?;
        self.audit.record("create_session", &raw);

        let detail: SessionDetail = serde_json::from_value(raw)?;
        info!("Created Jules session: {}", detail.id);

        Ok(detail)
    }

    /// Send a prepared request, map non-2xx to a typed error, and return the
    /// raw JSON body so the caller can audit it before decoding.
    async fn get_json(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, JulesError> {
        let response = request
            .header("X-Goog-Api-Key", self.api_key.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Jules API error: {} - {}", status, body);
            return Err(JulesError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}
