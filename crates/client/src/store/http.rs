//! REST client for the notes API.
//!
//! Wraps the `/api/v1/notes` endpoints using [`reqwest`] and maps HTTP
//! statuses back onto [`ClientError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use codenote_core::note_code::NoteCode;
use codenote_core::owner::OwnerId;

use crate::error::ClientError;
use crate::model::{
    CreateRequest, DataEnvelope, ErrorBody, ExistsPayload, Note, NoteSummary, SaveRequest,
};
use crate::store::NoteStore;

/// HTTP-backed [`NoteStore`].
pub struct HttpNoteStore {
    client: reqwest::Client,
    api_url: String,
}

impl HttpNoteStore {
    /// Create a store for the API at `api_url`, e.g. `http://localhost:3000`.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a store reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/api/v1/notes", self.api_url)
    }

    fn note_url(&self, code: &NoteCode) -> String {
        format!("{}/api/v1/notes/{}", self.api_url, code)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, mapping 404 and 409
    /// onto their dedicated error variants.
    async fn ensure_success(
        response: reqwest::Response,
        code: Option<&NoteCode>,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| {
                tracing::debug!(status = status.as_u16(), code = %e.code, "API error body");
                e.error
            })
            .unwrap_or_else(|_| body.clone());

        Err(match (status, code) {
            (StatusCode::NOT_FOUND, Some(code)) => ClientError::NotFound {
                code: code.to_string(),
            },
            (StatusCode::CONFLICT, _) => ClientError::Conflict(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                body,
            },
        })
    }

    /// Parse a successful `{ "data": T }` response.
    async fn parse_data<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        code: Option<&NoteCode>,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response, code).await?;
        Ok(response.json::<DataEnvelope<T>>().await?.data)
    }
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn fetch_note(&self, code: &NoteCode) -> Result<Note, ClientError> {
        let response = self.client.get(self.note_url(code)).send().await?;
        Self::parse_data(response, Some(code)).await
    }

    async fn note_exists(&self, code: &NoteCode) -> Result<bool, ClientError> {
        let response = self
            .client
            .get(format!("{}/exists", self.note_url(code)))
            .send()
            .await?;
        let payload: ExistsPayload = Self::parse_data(response, Some(code)).await?;
        Ok(payload.exists)
    }

    async fn list_owned(&self, owner: &OwnerId) -> Result<Vec<NoteSummary>, ClientError> {
        let response = self
            .client
            .get(self.notes_url())
            .query(&[("user_id", owner.as_str())])
            .send()
            .await?;
        Self::parse_data(response, None).await
    }

    async fn create_note(&self, owner: &OwnerId) -> Result<Note, ClientError> {
        let response = self
            .client
            .post(self.notes_url())
            .json(&CreateRequest { user_id: owner })
            .send()
            .await?;
        Self::parse_data(response, None).await
    }

    async fn save_note(
        &self,
        code: &NoteCode,
        request: &SaveRequest,
    ) -> Result<Note, ClientError> {
        let response = self
            .client
            .put(self.note_url(code))
            .json(request)
            .send()
            .await?;
        Self::parse_data(response, Some(code)).await
    }

    async fn delete_note(&self, code: &NoteCode) -> Result<(), ClientError> {
        let response = self.client.delete(self.note_url(code)).send().await?;
        Self::ensure_success(response, Some(code)).await?;
        Ok(())
    }
}
