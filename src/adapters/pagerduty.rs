//! PagerDuty REST API v2 client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::{AppError, OnCallWindow, PagerDutySettings};
use crate::ports::{
    AlertingService, AlertingUser, CreatedOverride, OnCallEntry, OverrideRequest, Schedule,
};

const SERVICE: &str = "PagerDuty";
const ACCEPT_V2: &str = "application/vnd.pagerduty+json;version=2";
const PAGE_LIMIT: usize = 100;

/// HTTP client for the PagerDuty API.
#[derive(Clone)]
pub struct PagerDutyClient {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for PagerDutyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerDutyClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl PagerDutyClient {
    pub fn new(settings: &PagerDutySettings, timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { token: settings.token.clone(), api_url: settings.api_url.clone(), client })
    }

    /// API URL extended by `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config_error(format!("Invalid PagerDuty API URL: {}", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Token token={}", self.token))
            .header(ACCEPT, ACCEPT_V2)
    }

    fn send<T: DeserializeOwned>(
        &self,
        what: &str,
        builder: RequestBuilder,
    ) -> Result<T, AppError> {
        let response = self
            .authorized(builder)
            .send()
            .map_err(|e| AppError::Http {
                service: SERVICE,
                details: format!("{}: {}", what, e.without_url()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::Http {
                service: SERVICE,
                details: format!("{} returned {}: {}", what, status.as_u16(), body.trim()),
            });
        }

        response.json().map_err(|e| AppError::Decode {
            service: SERVICE,
            details: e.without_url().to_string(),
        })
    }

    /// Collect every page of an offset-paginated listing.
    fn list_all<P, T, F>(&self, collection: &str, mut take: F) -> Result<Vec<T>, AppError>
    where
        P: DeserializeOwned,
        F: FnMut(P) -> (Vec<T>, bool),
    {
        let url = self.endpoint(&[collection])?;
        let mut items = Vec::new();
        loop {
            let offset = items.len();
            debug!(%url, offset, "PagerDuty list request");
            let request = self
                .client
                .get(url.clone())
                .query(&[("limit", PAGE_LIMIT.to_string()), ("offset", offset.to_string())]);
            let page: P = self.send(&format!("GET {}", url.path()), request)?;
            let (mut batch, more) = take(page);
            let fetched = batch.len();
            items.append(&mut batch);
            if !more || fetched == 0 {
                return Ok(items);
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct Reference {
    id: String,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSchedule {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct SchedulesPage {
    #[serde(default)]
    schedules: Vec<ApiSchedule>,
    #[serde(default)]
    more: bool,
}

#[derive(Debug, Deserialize)]
struct ApiOnCall {
    user: Reference,
}

#[derive(Debug, Deserialize)]
struct OnCallsPage {
    #[serde(default)]
    oncalls: Vec<ApiOnCall>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsersPage {
    #[serde(default)]
    users: Vec<ApiUser>,
    #[serde(default)]
    more: bool,
}

#[derive(Debug, Serialize)]
struct OverrideEnvelope<'a> {
    #[serde(rename = "override")]
    override_: OverrideBody<'a>,
}

#[derive(Debug, Serialize)]
struct OverrideBody<'a> {
    start: String,
    end: String,
    user: UserReference<'a>,
}

#[derive(Debug, Serialize)]
struct UserReference<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct OverrideResponse {
    #[serde(rename = "override")]
    override_: ApiOverride,
}

#[derive(Debug, Deserialize)]
struct ApiOverride {
    id: String,
    start: String,
    end: String,
    user: Reference,
}

impl AlertingService for PagerDutyClient {
    fn list_schedules(&self) -> Result<Vec<Schedule>, AppError> {
        self.list_all("schedules", |page: SchedulesPage| {
            let schedules =
                page.schedules.into_iter().map(|s| Schedule { id: s.id, name: s.name }).collect();
            (schedules, page.more)
        })
    }

    fn list_on_calls(
        &self,
        schedule_id: &str,
        window: &OnCallWindow,
    ) -> Result<Vec<OnCallEntry>, AppError> {
        let url = self.endpoint(&["oncalls"])?;
        debug!(%url, schedule_id, "PagerDuty on-call request");
        let request = self.client.get(url.clone()).query(&[
            ("since", window.start_rfc3339()),
            ("until", window.end_rfc3339()),
            ("time_zone", window.start.timezone().name().to_string()),
            ("schedule_ids[]", schedule_id.to_string()),
        ]);
        let page: OnCallsPage = self.send(&format!("GET {}", url.path()), request)?;
        Ok(page
            .oncalls
            .into_iter()
            .map(|oc| OnCallEntry { user_id: oc.user.id, user_summary: oc.user.summary })
            .collect())
    }

    fn list_users(&self) -> Result<Vec<AlertingUser>, AppError> {
        self.list_all("users", |page: UsersPage| {
            let users = page
                .users
                .into_iter()
                .map(|u| AlertingUser {
                    id: u.id,
                    name: u.name,
                    email: u.email,
                    description: u.description,
                })
                .collect();
            (users, page.more)
        })
    }

    fn create_override(
        &self,
        schedule_id: &str,
        request: &OverrideRequest,
    ) -> Result<CreatedOverride, AppError> {
        let url = self.endpoint(&["schedules", schedule_id, "overrides"])?;
        debug!(%url, user_id = %request.user_id, "PagerDuty override request");
        let body = OverrideEnvelope {
            override_: OverrideBody {
                start: request.window.start_rfc3339(),
                end: request.window.end_rfc3339(),
                user: UserReference { id: &request.user_id, kind: "user_reference" },
            },
        };
        let what = format!("POST {}", url.path());
        let response: OverrideResponse = self.send(&what, self.client.post(url).json(&body))?;
        let created = response.override_;
        Ok(CreatedOverride {
            id: created.id,
            start: created.start,
            end: created.end,
            user_id: created.user.id,
        })
    }
}
