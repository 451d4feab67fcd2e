//! ApiClient - Portal REST Client
//!
//! Thin reqwest wrapper: bearer token on every request, JSON bodies, and
//! normalization of rate-limit rejections (HTTP 429) into a distinguishable
//! error carrying the retry-after and remaining-quota headers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::HeaderMap;
use reqwest::{multipart, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::domain::record::RecordId;
use crate::error::{Error, Result};

/// Response body of a create call
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResponse {
    /// Identifier assigned by the backend
    pub id: RecordId,
}

/// One file to attach to a created record
#[derive(Debug, Clone)]
pub struct DocumentPart {
    /// Multipart field name (e.g. "cedulaDoc")
    pub field: String,
    /// Original file name
    pub filename: String,
    /// MIME type
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Portal REST client
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Set or clear the bearer token attached to every request
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.token.read().as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn check(response: Response, path: &str) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(normalize_rate_limit(response.headers()));
        }
        if !status.is_success() {
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response)
    }

    /// GET the full collection at `path`
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::check(response, path).await?.json().await?)
    }

    /// GET one record by id
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str, id: &RecordId) -> Result<T> {
        let path = format!("{path}/{id}");
        let response = self.request(Method::GET, &path).send().await?;
        Ok(Self::check(response, &path).await?.json().await?)
    }

    /// POST a new record, returning the backend response body
    pub async fn post<P: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<R> {
        let response = self.request(Method::POST, path).json(payload).send().await?;
        Ok(Self::check(response, path).await?.json().await?)
    }

    /// PUT an update to an existing record
    pub async fn put<P: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        id: &RecordId,
        payload: &P,
    ) -> Result<R> {
        let path = format!("{path}/{id}");
        let response = self.request(Method::PUT, &path).json(payload).send().await?;
        Ok(Self::check(response, &path).await?.json().await?)
    }

    /// DELETE a record by id
    pub async fn delete(&self, path: &str, id: &RecordId) -> Result<()> {
        let path = format!("{path}/{id}");
        let response = self.request(Method::DELETE, &path).send().await?;
        Self::check(response, &path).await?;
        Ok(())
    }

    /// Upload document files tagged with the owning record id
    /// (`POST {path}/{id}/documentos`, multipart)
    pub async fn upload_documents(
        &self,
        path: &str,
        record_id: &str,
        files: Vec<DocumentPart>,
    ) -> Result<()> {
        let path = format!("{path}/{record_id}/documentos");
        let mut form = multipart::Form::new().text("solicitudId", record_id.to_string());
        for file in files {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str(&file.content_type)?;
            form = form.part(file.field, part);
        }
        let response = self.request(Method::POST, &path).multipart(form).send().await?;
        Self::check(response, &path).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.read().is_some())
            .finish()
    }
}

/// Extract retry-after / remaining-quota headers from a 429 response
fn normalize_rate_limit(headers: &HeaderMap) -> Error {
    let retry_after_secs = headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    Error::RateLimited {
        retry_after_secs,
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_rate_limit_headers_normalized() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("30"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));

        match normalize_rate_limit(&headers) {
            Error::RateLimited {
                retry_after_secs,
                remaining,
            } => {
                assert_eq!(retry_after_secs, Some(30));
                assert_eq!(remaining, Some(0));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_missing_headers() {
        match normalize_rate_limit(&HeaderMap::new()) {
            Error::RateLimited {
                retry_after_secs,
                remaining,
            } => {
                assert_eq!(retry_after_secs, None);
                assert_eq!(remaining, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "https://api.example/v1/".to_string(),
            timeout_secs: 5,
        })
        .expect("client");
        assert!(format!("{client:?}").contains("https://api.example/v1"));
    }
}
