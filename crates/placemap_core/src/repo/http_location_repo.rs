//! `ureq`-backed adapter for the location REST API.
//!
//! Endpoints: `GET|POST <base>/api/locations`, `PUT|DELETE <base>/api/locations/<id>`.

use crate::config::CoreConfig;
use crate::model::location::{Location, NewLocation};
use crate::repo::location_repo::{LocationRepository, RepoError, RepoResult};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use ureq::Agent;

const LOCATIONS_PATH: &str = "/api/locations";
const RESERVED_ID_CHARS: &[char] = &['/', '?', '#', '%', '\\'];

/// HTTP verbs that carry a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMethod {
    Post,
    Put,
}

impl WriteMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

pub struct HttpLocationRepository {
    agent: Agent,
    base_url: String,
}

impl HttpLocationRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.api_base_url.as_str(), config.request_timeout)
    }

    pub fn collection_url(&self) -> String {
        format!("{}{LOCATIONS_PATH}", self.base_url)
    }

    pub fn item_url(&self, id: &str) -> RepoResult<String> {
        if id.is_empty()
            || id
                .chars()
                .any(|ch| ch.is_whitespace() || ch.is_control() || RESERVED_ID_CHARS.contains(&ch))
        {
            return Err(RepoError::InvalidId(id.to_string()));
        }
        Ok(format!("{}/{id}", self.collection_url()))
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: WriteMethod,
        url: &str,
        body: &B,
    ) -> RepoResult<T> {
        let payload =
            serde_json::to_string(body).map_err(|err| RepoError::Decode(err.to_string()))?;
        let request = match method {
            WriteMethod::Post => self.agent.post(url),
            WriteMethod::Put => self.agent.put(url),
        };
        let started_at = Instant::now();
        let result = request
            .header("Content-Type", "application/json")
            .send(payload.as_str())
            .map_err(map_transport_error)
            .and_then(|mut response| read_body(response.body_mut()));
        log_call(method.as_str(), url, started_at, result.as_ref().err());
        result
    }
}

impl LocationRepository for HttpLocationRepository {
    fn list_locations(&self) -> RepoResult<Vec<Location>> {
        let url = self.collection_url();
        let started_at = Instant::now();
        let result = self
            .agent
            .get(&url)
            .call()
            .map_err(map_transport_error)
            .and_then(|mut response| read_body(response.body_mut()));
        log_call("GET", &url, started_at, result.as_ref().err());
        result
    }

    fn create_location(&self, location: &NewLocation) -> RepoResult<Location> {
        self.send_json(WriteMethod::Post, &self.collection_url(), location)
    }

    fn update_location(&self, location: &Location) -> RepoResult<Location> {
        let url = self.item_url(&location.id)?;
        self.send_json(WriteMethod::Put, &url, location)
            .map_err(|err| not_found_as(err, &location.id))
    }

    fn delete_location(&self, id: &str) -> RepoResult<()> {
        let url = self.item_url(id)?;
        let started_at = Instant::now();
        let result = self
            .agent
            .delete(&url)
            .call()
            .map(|_| ())
            .map_err(map_transport_error)
            .map_err(|err| not_found_as(err, id));
        log_call("DELETE", &url, started_at, result.as_ref().err());
        result
    }
}

fn read_body<T: DeserializeOwned>(body: &mut ureq::Body) -> RepoResult<T> {
    let text = body.read_to_string().map_err(map_transport_error)?;
    serde_json::from_str(&text).map_err(|err| RepoError::Decode(err.to_string()))
}

fn map_transport_error(err: ureq::Error) -> RepoError {
    match err {
        ureq::Error::StatusCode(code) => RepoError::Status { code },
        other => RepoError::Transport(other.to_string()),
    }
}

fn not_found_as(err: RepoError, id: &str) -> RepoError {
    match err {
        RepoError::Status { code: 404 } => RepoError::NotFound(id.to_string()),
        other => other,
    }
}

fn log_call(method: &str, url: &str, started_at: Instant, err: Option<&RepoError>) {
    let duration_ms = started_at.elapsed().as_millis();
    match err {
        None => info!(
            "event=api_call module=repo status=ok method={method} url={url} duration_ms={duration_ms}"
        ),
        Some(err) => warn!(
            "event=api_call module=repo status=error method={method} url={url} duration_ms={duration_ms} error={err}"
        ),
    }
}
