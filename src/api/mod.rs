pub mod projects;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the REST client. No retries, no translation beyond
/// splitting transport failures from non-success responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin capability object over the monitoring API: builds URLs, attaches
/// auth headers, issues one request per call.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    account_id: Option<String>,
}

impl ApiClient {
    pub fn new<U: Into<String>, K: Into<String>>(
        base_url: U,
        api_key: K,
        account_id: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            account_id,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key);
        if let Some(account_id) = &self.account_id {
            builder = builder.header("X-Account-Id", account_id);
        }
        builder
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        check_response(response).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        check_response(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        check_response(response).await
    }
}

/// Map non-success statuses to [`ApiError::Api`] with the response body as
/// the message; successful bodies parse as JSON, empty bodies become `null`.
async fn check_response(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    if body.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}
