//! Pure PocketBase REST API client.
//!
//! A minimal client for a PocketBase backend. Supports listing, fetching,
//! creating and updating collection records, plus auth token refresh for
//! resolving the calling user.
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketbase::PocketBaseClient;
//!
//! let pb = PocketBaseClient::new("http://127.0.0.1:8090".into());
//!
//! let page = pb.list_records("submissions", Some("status = 'pending'"), 1, 50).await?;
//! for item in &page.items {
//!     println!("{}", item["name"]);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{PocketBaseError, Result};
pub use types::{ApiErrorBody, AuthRecord, AuthRefreshResponse, RawRecord, RecordList};

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

pub struct PocketBaseClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl PocketBaseClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a static auth token (superuser or service account) used for
    /// all requests that do not override it.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// List records of a collection, optionally filtered with a PocketBase
    /// filter expression.
    pub async fn list_records(
        &self,
        collection: &str,
        filter: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<RecordList<RawRecord>> {
        let url = format!("{}/api/collections/{}/records", self.base_url, collection);
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        if let Some(f) = filter {
            query.push(("filter", f.to_string()));
        }

        let resp = self
            .request(Method::GET, &url, None)
            .query(&query)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// Fetch a single record by id.
    pub async fn get_record(&self, collection: &str, id: &str) -> Result<RawRecord> {
        let url = format!(
            "{}/api/collections/{}/records/{}",
            self.base_url, collection, id
        );
        let resp = self.request(Method::GET, &url, None).send().await?;
        self.decode(resp).await
    }

    /// Create a record.
    pub async fn create_record(&self, collection: &str, body: &Value) -> Result<RawRecord> {
        let url = format!("{}/api/collections/{}/records", self.base_url, collection);
        debug!(collection = %collection, "Creating record");
        let resp = self.request(Method::POST, &url, Some(body)).send().await?;
        self.decode(resp).await
    }

    /// Update a record by id.
    ///
    /// `query` parameters are forwarded verbatim; the backend's update rule
    /// may reference them (`@request.query.*`) to make the write
    /// conditional on the record's current state. A rule miss surfaces as
    /// `NotFound`, which callers that just read the record should treat as
    /// a lost conditional write.
    pub async fn update_record(
        &self,
        collection: &str,
        id: &str,
        body: &Value,
        query: &[(&str, &str)],
    ) -> Result<RawRecord> {
        let url = format!(
            "{}/api/collections/{}/records/{}",
            self.base_url, collection, id
        );
        debug!(collection = %collection, id = %id, "Updating record");
        let resp = self
            .request(Method::PATCH, &url, Some(body))
            .query(query)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// Validate an auth token and return a fresh token plus the user record
    /// (including the `admin` flag).
    pub async fn auth_refresh(&self, auth_collection: &str, token: &str) -> Result<AuthRefreshResponse> {
        let url = format!(
            "{}/api/collections/{}/auth-refresh",
            self.base_url, auth_collection
        );
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await?;
        self.decode(resp).await
    }

    fn request(&self, method: Method, url: &str, body: Option<&Value>) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, url);
        if let Some(token) = &self.token {
            req = req.header(reqwest::header::AUTHORIZATION, token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req
    }

    async fn decode<T: serde::de::DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            let bytes = resp.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Self::api_error(status, &body))
    }

    fn api_error(status: StatusCode, body: &str) -> PocketBaseError {
        match status {
            StatusCode::NOT_FOUND => PocketBaseError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PocketBaseError::Unauthorized,
            _ => {
                if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
                    if let Some(field) = parsed.not_unique_field() {
                        return PocketBaseError::NotUnique {
                            field: field.to_string(),
                        };
                    }
                    return PocketBaseError::Api {
                        status: status.as_u16(),
                        message: parsed.message,
                    };
                }
                PocketBaseError::Api {
                    status: status.as_u16(),
                    message: body.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_unique_error_is_detected() {
        let body = r#"{"code":400,"message":"Failed to create record.","data":{"name":{"code":"validation_not_unique","message":"Value must be unique."}}}"#;
        let err = PocketBaseClient::api_error(StatusCode::BAD_REQUEST, body);
        match err {
            PocketBaseError::NotUnique { field } => assert_eq!(field, "name"),
            other => panic!("expected NotUnique, got {other:?}"),
        }
    }

    #[test]
    fn missing_record_maps_to_not_found() {
        let err = PocketBaseClient::api_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, PocketBaseError::NotFound));
    }

    #[test]
    fn opaque_errors_keep_status_and_message() {
        let err = PocketBaseClient::api_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            PocketBaseError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let pb = PocketBaseClient::new("http://127.0.0.1:8090/".into());
        assert_eq!(pb.base_url, "http://127.0.0.1:8090");
    }
}
