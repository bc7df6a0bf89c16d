//! Client for the Dify console API.
//!
//! Three calls are needed for an export: log in, page through the
//! applications, and export each one. Every request goes through the shared
//! [`HttpSession`], which applies the retry policy.

use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::session::HttpSession;
use crate::types::{
    ApiErrorBody, AppId, AppPage, ExportResponse, LoginRequest, LoginResponse, SessionToken,
};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

mod pager;

pub use pager::AppPager;

/// Stateless client for the console API
///
/// Holds the API base and transport only. Credentials and the session token are
/// owned by the caller and lent to each call.
#[derive(Clone, Debug)]
pub struct ConsoleClient {
    api_base: String,
    session: HttpSession,
    page_size: u32,
}

impl ConsoleClient {
    /// Create a client from the run configuration
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let session = HttpSession::new(&config.http)?;
        Ok(Self::with_session(
            config.credentials.api_base.clone(),
            session,
            config.page_size,
        ))
    }

    /// Create a client around an existing session
    pub fn with_session(api_base: impl Into<String>, session: HttpSession, page_size: u32) -> Self {
        Self {
            api_base: api_base.into(),
            session,
            page_size,
        }
    }

    /// Number of applications requested per listing page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Log in and obtain a session token
    ///
    /// Sends `{email, password}` to `POST /login`. Empty credentials are sent as
    /// they are; only the server's answer decides the outcome.
    ///
    /// The login request is only retried when it never reached the server, so
    /// credentials are submitted at most once.
    ///
    /// # Errors
    /// - [`Error::Api`] if the server answers with a non-success status
    /// - [`Error::Authentication`] if the answer's `result` is not `"success"` or
    ///   it carries no access token
    /// - [`Error::Serialization`] if the body is not JSON
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        let url = self.endpoint("/login", &[])?;
        let request = self
            .session
            .request(Method::POST, url)
            .json(&LoginRequest {
                email: &credentials.email,
                password: &credentials.password,
            })
            .build()?;

        let response = self
            .session
            .execute(request, RetryPolicy::UnsentOnly)
            .await?;
        let parsed: LoginResponse = read_json(response).await?;

        if parsed.result != "success" {
            return Err(Error::Authentication(format!(
                "login returned result {:?}",
                parsed.result
            )));
        }

        if parsed.data.access_token.is_empty() {
            return Err(Error::Authentication(
                "login response did not contain an access token".to_string(),
            ));
        }

        info!(email = %credentials.email, "logged in to console API");
        Ok(parsed.data)
    }

    /// Start paging through every application visible to the account
    ///
    /// Nothing is fetched until the pager is advanced. Each call starts from page 1.
    pub fn list_apps<'a>(&'a self, token: &'a SessionToken) -> AppPager<'a> {
        AppPager::new(self, token)
    }

    /// Fetch one page of `GET /apps`
    ///
    /// `page` is 1-based.
    pub async fn app_page(&self, token: &SessionToken, page: u32) -> Result<AppPage> {
        let url = self.endpoint(
            "/apps",
            &[
                ("page", page.to_string()),
                ("limit", self.page_size.to_string()),
            ],
        )?;
        let request = self.authorized(Method::GET, url, token)?;

        let response = self
            .session
            .execute(request, RetryPolicy::Idempotent)
            .await?;
        let parsed: AppPage = read_json(response).await?;

        debug!(
            page,
            count = parsed.data.len(),
            has_more = parsed.has_more,
            "fetched application page"
        );
        Ok(parsed)
    }

    /// Export one application's document
    ///
    /// Returns the `data` field of `GET /apps/{id}/export` verbatim.
    pub async fn export_app(
        &self,
        token: &SessionToken,
        id: &AppId,
        include_secret: bool,
    ) -> Result<String> {
        let path = format!("/apps/{}/export", urlencoding::encode(id.as_str()));
        let url = self.endpoint(&path, &[("include_secret", include_secret.to_string())])?;
        let request = self.authorized(Method::GET, url, token)?;

        let response = self
            .session
            .execute(request, RetryPolicy::Idempotent)
            .await?;
        let parsed: ExportResponse = read_json(response).await?;

        debug!(app_id = %id, bytes = parsed.data.len(), "exported application");
        Ok(parsed.data)
    }

    /// Join the API base and a path, then attach the query parameters
    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.api_base, path))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn authorized(
        &self,
        method: Method,
        url: Url,
        token: &SessionToken,
    ) -> Result<reqwest::Request> {
        Ok(self
            .session
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, token.authorization())
            .build()?)
    }
}

/// Decode a JSON response, turning non-success statuses into [`Error::Api`]
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let endpoint = response.url().path().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(ApiErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("{} ({})", message, code),
            Ok(ApiErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ => body,
        };
        return Err(Error::Api {
            endpoint,
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
