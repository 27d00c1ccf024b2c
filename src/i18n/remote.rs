//! Remote translation services.
//!
//! The translator only needs "text in, translated text out" from a service,
//! so it talks to one through [`RemoteTranslator`]. [`HttpTranslator`] speaks
//! the LibreTranslate JSON API.

use crate::error::TranslationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// A service that can translate a phrase into a target language.
pub trait RemoteTranslator {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError>;
}

/// Translation request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Blocking client for a LibreTranslate-compatible `/translate` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::blocking::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    /// Create a client for `url` (the full `/translate` endpoint).
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteTranslator for HttpTranslator {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!("Requesting translation to {} from {}", target_language, self.url);

        let response = self.client.post(&self.url).json(&request).send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslationError::Status { status, body });
        }

        let body: TranslateResponse = response
            .json()
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        if body.translated_text.trim().is_empty() {
            return Err(TranslationError::MalformedResponse(
                "empty translatedText".to_string(),
            ));
        }

        Ok(body.translated_text)
    }
}
