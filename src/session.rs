//! HTTP session shared by every console API call.

use crate::config::{HttpConfig, RetryConfig};
use crate::error::{Error, Result};
use crate::retry::{RetryPolicy, with_retry};
use reqwest::{Request, Response, StatusCode};
use tracing::debug;

/// A `reqwest::Client` with the retry loop wrapped around every request
///
/// Stateless apart from the connection pool; shared by reference for the whole run.
#[derive(Clone, Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    retry: RetryConfig,
}

impl HttpSession {
    /// Create a session from transport settings
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created (e.g. TLS backend failure)
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry: config.retry.clone(),
        })
    }

    /// Start building a request on the underlying client
    pub fn request(&self, method: reqwest::Method, url: url::Url) -> reqwest::RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request, retrying failures the policy allows
    ///
    /// A 5xx or 429 answer counts as a failed attempt. If it is still the answer
    /// after the last attempt it is returned as [`Error::Api`]. Every other status
    /// is handed back to the caller untouched.
    pub async fn execute(&self, request: Request, policy: RetryPolicy) -> Result<Response> {
        let method = request.method().clone();
        let endpoint = request.url().path().to_string();

        with_retry(&self.retry, policy, || {
            let attempt = request.try_clone();
            let method = method.clone();
            let endpoint = endpoint.clone();
            async move {
                let attempt = attempt.ok_or_else(|| {
                    Error::Other(format!("request body for {} cannot be replayed", endpoint))
                })?;

                let response = self.client.execute(attempt).await?;
                let status = response.status();
                debug!(
                    %method,
                    endpoint = %endpoint,
                    status = status.as_u16(),
                    "console API response"
                );

                if is_retryable_status(status) {
                    let message = response.text().await.unwrap_or_default();
                    return Err(Error::Api {
                        endpoint,
                        status: status.as_u16(),
                        message,
                    });
                }

                Ok::<_, Error>(response)
            }
        })
        .await
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}
