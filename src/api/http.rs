//! Browser transport backed by `gloo-net` (fetch API).

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use super::{ApiError, Transport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    base_url: String,
}

impl HttpTransport {
    /// `base_url` without trailing slash; empty means same origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let response = Request::get(&self.url(path)).send().await?;
        into_text(response).await
    }

    async fn post_form(&self, path: &str, body: String) -> Result<String, ApiError> {
        let response = Request::post(&self.url(path))
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)?
            .send()
            .await?;
        into_text(response).await
    }
}

async fn into_text(response: Response) -> Result<String, ApiError> {
    // ensure we've got 2xx status
    if response.ok() {
        Ok(response.text().await?)
    } else {
        let code = response.status();
        let reason = match response.status_text() {
            text if text.is_empty() => code.to_string(),
            text => text,
        };
        Err(ApiError::Status { code, reason })
    }
}
