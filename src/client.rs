use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use store::models::{ErrorBody, Item, ListQuery, NewItem, PageResult};
use thiserror::Error;

/// The browser always talks to the API on this origin.
pub const API_ORIGIN: &str = "http://localhost:3001";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{message} ({status})")]
    Status { status: StatusCode, message: String },

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Where views load their data from.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<PageResult, ClientError>;

    async fn get(&self, id: i64) -> Result<Item, ClientError>;
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    origin: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::with_origin(API_ORIGIN)
    }
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn create(&self, new_item: &NewItem) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/items", self.origin))
            .json(new_item)
            .send()
            .await?;

        decode(response).await
    }
}

#[async_trait]
impl ItemSource for CatalogClient {
    async fn list(&self, query: &ListQuery) -> Result<PageResult, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/items", self.origin))
            .query(query)
            .send()
            .await?;

        decode(response).await
    }

    async fn get(&self, id: i64) -> Result<Item, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/items/{id}", self.origin))
            .send()
            .await?;

        decode(response).await
    }
}

/// Error statuses keep the server's `{ error }` message when it sent one.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    parse_body(status, &body)
}

fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ClientError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        return Err(ClientError::Status { status, message });
    }

    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_keeps_server_message() {
        let err = parse_body::<Item>(StatusCode::NOT_FOUND, r#"{"error":"Item not found"}"#).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Item not found (404 Not Found)");
    }

    #[test]
    fn error_status_without_body_uses_reason() {
        let err = parse_body::<Item>(StatusCode::NOT_FOUND, "").unwrap_err();

        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn success_with_bad_body_is_malformed() {
        let err = parse_body::<PageResult>(StatusCode::OK, "not json").unwrap_err();

        assert!(matches!(err, ClientError::Malformed(_)));
        assert!(err.to_string().starts_with("Malformed response"));
    }
}
