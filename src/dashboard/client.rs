//! Records Client
//!
//! Thin HTTP client over the store's JSON endpoints.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;

use crate::error::{GradebookError, Result};
use crate::protocol::{paths, Ack, NaturalKey, Student};

use super::Snapshot;

/// Client for a running records store
#[derive(Debug, Clone)]
pub struct RecordsClient {
    /// e.g. `http://127.0.0.1:5000`, no trailing slash
    base_url: String,
    http: Client,
}

impl RecordsClient {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a client with the default request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GradebookError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Poll the store, treating any failure as "no data"
    pub async fn fetch_snapshot(&self) -> Snapshot {
        match self.try_fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Store unavailable at {}: {}", self.base_url, e);
                Snapshot::default()
            }
        }
    }

    /// Poll the store, surfacing failures
    pub async fn try_fetch_snapshot(&self) -> Result<Snapshot> {
        let response = self.http.get(self.url(paths::STUDENTS)).send().await?;
        let response = check(response).await?;
        let students: Vec<Student> = response.json().await?;

        Ok(Snapshot::new(students))
    }

    /// Add one student
    pub async fn add(&self, student: &Student) -> Result<Ack> {
        self.post(paths::ADD_STUDENT, student).await
    }

    /// Add every student in one request
    pub async fn add_bulk(&self, students: &[Student]) -> Result<Ack> {
        self.post(paths::ADD_BULK, students).await
    }

    /// Delete every record matching the key
    pub async fn delete(&self, key: &NaturalKey) -> Result<Ack> {
        self.post(paths::DELETE_STUDENT, key).await
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Ack> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let response = check(response).await?;

        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-2xx reply into an error carrying the store's message
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Ack>(&body)
        .map(|ack| ack.message)
        .unwrap_or_else(|_| if body.is_empty() { status.to_string() } else { body });

    Err(GradebookError::Http {
        status: status.as_u16(),
        message,
    })
}
