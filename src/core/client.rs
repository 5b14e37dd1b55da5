//! Async DeepL client

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::config::ClientConfig;
use crate::core::errors::{DeepLError, Result};
use crate::core::models::{Language, TranslateResponse, Translation};
use crate::core::options::{FormPayload, TranslateOptions};

/// DeepL API client
///
/// Read-only after construction; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct DeepLClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl DeepLClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(DeepLError::HttpClient)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create a client for the default endpoint
    pub fn with_auth_key(auth_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(auth_key))
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Translate a single text into `target_lang`
    ///
    /// Returns the translated text and the detected source language.
    pub async fn translate(
        &self,
        text: &str,
        target_lang: &Language,
        options: &TranslateOptions,
    ) -> Result<(String, Language)> {
        let translations = self.translate_many(&[text], target_lang, options).await?;

        translations
            .into_iter()
            .next()
            .map(|t| (t.text, t.detected_source_language))
            .ok_or(DeepLError::EmptyResponse)
    }

    /// Translate several texts into `target_lang` with a single request
    ///
    /// Results are in the same order as `texts`.
    pub async fn translate_many<S: AsRef<str>>(
        &self,
        texts: &[S],
        target_lang: &Language,
        options: &TranslateOptions,
    ) -> Result<Vec<Translation>> {
        let payload = self.build_payload(texts, target_lang, options);

        debug!(
            "Translating {} text(s) into {} via {}",
            texts.len(),
            target_lang,
            self.config.base_url
        );

        let response = self
            .client
            .post(self.config.translate_url())
            .form(&payload)
            .send()
            .await
            .map_err(DeepLError::Transport)?;

        let status = response.status();
        debug!("DeepL responded with {}", status);

        if !status.is_success() {
            return Err(DeepLError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(DeepLError::Transport)?;
        let response: TranslateResponse =
            serde_json::from_slice(&body).map_err(DeepLError::Decode)?;

        Ok(response.translations)
    }

    /// Like [`translate_many`](Self::translate_many), abandoned as soon as
    /// `cancel` resolves
    pub async fn translate_many_until<S, F>(
        &self,
        cancel: F,
        texts: &[S],
        target_lang: &Language,
        options: &TranslateOptions,
    ) -> Result<Vec<Translation>>
    where
        S: AsRef<str>,
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                debug!("Translation cancelled by caller");
                Err(DeepLError::Cancelled)
            }
            result = self.translate_many(texts, target_lang, options) => result,
        }
    }

    /// Like [`translate_many`](Self::translate_many), failing with
    /// [`DeepLError::Timeout`] once `deadline` has elapsed
    pub async fn translate_many_within<S: AsRef<str>>(
        &self,
        deadline: Duration,
        texts: &[S],
        target_lang: &Language,
        options: &TranslateOptions,
    ) -> Result<Vec<Translation>> {
        tokio::time::timeout(deadline, self.translate_many(texts, target_lang, options))
            .await
            .map_err(|_| DeepLError::Timeout)?
    }

    /// Like [`translate`](Self::translate), abandoned as soon as `cancel`
    /// resolves
    pub async fn translate_until<F>(
        &self,
        cancel: F,
        text: &str,
        target_lang: &Language,
        options: &TranslateOptions,
    ) -> Result<(String, Language)>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => Err(DeepLError::Cancelled),
            result = self.translate(text, target_lang, options) => result,
        }
    }

    /// Like [`translate`](Self::translate), bounded by `deadline`
    pub async fn translate_within(
        &self,
        deadline: Duration,
        text: &str,
        target_lang: &Language,
        options: &TranslateOptions,
    ) -> Result<(String, Language)> {
        tokio::time::timeout(deadline, self.translate(text, target_lang, options))
            .await
            .map_err(|_| DeepLError::Timeout)?
    }

    fn build_payload<S: AsRef<str>>(
        &self,
        texts: &[S],
        target_lang: &Language,
        options: &TranslateOptions,
    ) -> FormPayload {
        let mut payload = FormPayload::new();
        payload.set("auth_key", self.config.auth_key.as_str());
        payload.set("target_lang", target_lang.code());

        for text in texts {
            payload.add("text", text.as_ref());
        }

        options.apply(&mut payload);
        payload
    }
}
