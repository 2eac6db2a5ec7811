//! The request executor.
//!
//! Every resource client issues its calls through [`ApiClient`], which
//! builds the URL, merges default, auth, and caller headers, performs the
//! call once, and normalizes the response. There is no retry, timeout, or
//! backoff: a failed call is reported to the caller as-is.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use tracing::{debug, error, instrument};

use filehub_core::config::ApiConfig;
use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::types::QueryParams;

use super::request::RequestDescriptor;
use super::response::{self, Payload, REQUEST_FAILED};
use crate::session::Session;

/// Executes requests against the FileHub backend on behalf of a session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Create an executor from API configuration.
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http, &config.base_url, session))
    }

    /// Create an executor around an existing HTTP client.
    pub fn with_client(http: Client, base_url: &str, session: Arc<Session>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The session whose token is attached to requests.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The base origin endpoints are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying HTTP client, for transfers that bypass the executor.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Build the full URL for `endpoint`, appending every non-null entry of
    /// `params` as a query parameter.
    pub fn build_url(&self, endpoint: &str, params: &QueryParams) -> AppResult<Url> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::configuration(format!("Invalid request URL '{raw}': {e}")))?;

        let pairs: Vec<_> = params.pairs().collect();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Issue an authenticated call and normalize its response.
    pub async fn execute(&self, request: RequestDescriptor) -> AppResult<Payload> {
        let endpoint = request.endpoint.clone();
        let response = self.send(request).await?;
        let payload = response::normalize(response).await.inspect_err(|e| {
            error!(endpoint = %endpoint, error = %e, "Failed to read response");
        })?;
        debug!(endpoint = %endpoint, ?payload, "Response received");
        Ok(payload)
    }

    /// Issue a call without a bearer token and normalize its response.
    pub async fn execute_unauthenticated(&self, request: RequestDescriptor) -> AppResult<Payload> {
        let endpoint = request.endpoint.clone();
        let response = self.dispatch(request, false).await?;
        response::normalize(response).await.inspect_err(|e| {
            error!(endpoint = %endpoint, error = %e, "Failed to read response");
        })
    }

    /// Issue an authenticated call and return the successful response
    /// without reading its body.
    ///
    /// Non-2xx responses are turned into errors exactly as in
    /// [`execute`](Self::execute).
    pub async fn send(&self, request: RequestDescriptor) -> AppResult<Response> {
        self.dispatch(request, true).await
    }

    #[instrument(skip(self, request), fields(method = %request.method, endpoint = %request.endpoint))]
    async fn dispatch(&self, request: RequestDescriptor, authenticated: bool) -> AppResult<Response> {
        let url = self.build_url(&request.endpoint, &request.params)?;
        let headers = self.headers(&request.headers, authenticated)?;

        debug!(url = %url, authenticated, "Making request");

        let mut builder = self.http.request(request.method, url).headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "Request failed to reach server");
            AppError::from(e)
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let err = response::error_from_response(response, REQUEST_FAILED).await;
            error!(status = status.as_u16(), message = %err.message, "Request failed");
            return Err(err);
        }

        Ok(response)
    }

    /// Default JSON content type, then the bearer token, then caller
    /// headers; later entries win.
    fn headers(&self, caller: &HeaderMap, authenticated: bool) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if authenticated {
            if let Some(token) = self.session.bearer_token() {
                let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                    AppError::validation("Stored token is not a valid header value")
                })?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        for (name, value) in caller {
            headers.insert(name.clone(), value.clone());
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(Client::new(), base, Arc::new(Session::in_memory()))
    }

    #[test]
    fn test_build_url_drops_null_params() {
        let params = QueryParams::new()
            .insert("a", 1)
            .insert("b", Value::Null)
            .insert_opt::<i32>("c", None);

        let url = client("http://localhost:8080").build_url("/x", &params).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/x?a=1");
    }

    #[test]
    fn test_build_url_without_params_has_no_query() {
        let url = client("http://localhost:8080/")
            .build_url("/api/files/recent", &QueryParams::new())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/files/recent");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_encodes_values() {
        let params = QueryParams::new().insert("keyword", "q1 & q2");
        let url = client("http://h").build_url("/api/users", &params).unwrap();
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("keyword".to_string(), "q1 & q2".to_string())]);
    }

    #[test]
    fn test_caller_headers_win() {
        let api = client("http://h");
        api.session().set("a.b.c");

        let mut caller = HeaderMap::new();
        caller.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let headers = api.headers(&caller, true).unwrap();

        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers[AUTHORIZATION], "Bearer a.b.c");
    }

    #[test]
    fn test_no_auth_header_without_token_or_when_unauthenticated() {
        let api = client("http://h");
        assert!(!api.headers(&HeaderMap::new(), true).unwrap().contains_key(AUTHORIZATION));

        api.session().set("a.b.c");
        let headers = api.headers(&HeaderMap::new(), false).unwrap();
        assert!(!headers.contains_key(AUTHORIZATION));
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }
}
