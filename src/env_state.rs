//! # HTTP environment
//!
//! [`HttpEnv`] bundles the **shared HTTP client** and the [`ClassifierConfig`] used to reach
//! the prediction/training service.
//!
//! It is cheap to clone: [`reqwest::Client`] is reference-counted internally, so every
//! clone reuses the same connection pool.
//!
//! ## Structure
//!
//! ```text
//! HttpEnv
//! ├── http_client  (reqwest::Client, request timeout from the config)
//! └── config       (ClassifierConfig: base URL, endpoint paths, timeout)
//! ```
//!
//! ## Error mapping
//!
//! - transport failure or timeout → [`KoivizError::ReqwestError`]
//! - non-2xx status → [`KoivizError::ClassifierStatus`] carrying the status and body text
//! - body that is not the expected JSON → [`KoivizError::JsonError`]
//!
//! No request is retried.
use std::time::Duration;

use reqwest::{multipart::Form, Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::koiviz_errors::KoivizError;

/// Where the classifier service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub predict_path: String,
    pub models_path: String,
    pub select_model_path: String,
    pub train_path: String,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            base_url: "http://localhost:8000".into(),
            predict_path: "/api/predict".into(),
            models_path: "/api/models".into(),
            select_model_path: "/api/models/select".into(),
            train_path: "/api/train".into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClassifierConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClassifierConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join the base URL and an endpoint path with exactly one `/`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub struct HttpEnv {
    pub http_client: Client,
    pub config: ClassifierConfig,
}

impl HttpEnv {
    /// Build the client with the configured request timeout.
    ///
    /// Return
    /// ------
    /// * [`KoivizError::ReqwestError`] if the TLS backend cannot be initialized
    pub fn new(config: ClassifierConfig) -> Result<Self, KoivizError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(HttpEnv {
            http_client,
            config,
        })
    }

    async fn checked(response: Response) -> Result<Response, KoivizError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "classifier service error");
        Err(KoivizError::ClassifierStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, KoivizError> {
        let text = Self::checked(response).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, KoivizError> {
        let response = self
            .http_client
            .get(self.config.url(path))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, KoivizError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(self.config.url(path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// POST a JSON body, only checking the status.
    pub(crate) async fn post_json_unit<B>(&self, path: &str, body: &B) -> Result<(), KoivizError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .http_client
            .post(self.config.url(path))
            .json(body)
            .send()
            .await?;
        Self::checked(response).await.map(|_| ())
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, KoivizError> {
        let response = self
            .http_client
            .post(self.config.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }
}
