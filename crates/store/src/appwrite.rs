//! REST client for an Appwrite TablesDB table.
//!
//! Wraps the row create and list endpoints using [`reqwest`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Query, Row, RowList, RowStore, StoreError};

/// Response format the row payloads are decoded against.
const RESPONSE_FORMAT: &str = "1.8.0";

/// Where the share table lives.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// Base API URL, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub table_id: String,
}

/// HTTP client for one Appwrite table.
pub struct AppwriteStore {
    client: reqwest::Client,
    config: AppwriteConfig,
}

/// Error body Appwrite sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: u16,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl AppwriteStore {
    pub fn new(config: AppwriteConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a store reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: AppwriteConfig) -> Self {
        Self { client, config }
    }

    fn rows_url(&self) -> String {
        format!(
            "{}/tablesdb/{}/tables/{}/rows",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            self.config.table_id,
        )
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: String,
        api_key: &str,
    ) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", api_key)
            .header("X-Appwrite-Response-Format", RESPONSE_FORMAT)
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`StoreError::Api`].
    ///
    /// The reported code comes from the Appwrite error body, falling back to
    /// the HTTP status when the body is missing or unrecognised.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        let err = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => StoreError::Api {
                code: if parsed.code == 0 {
                    status.as_u16()
                } else {
                    parsed.code
                },
                kind: parsed.kind,
                message: parsed.message,
            },
            Err(_) => StoreError::Api {
                code: status.as_u16(),
                kind: None,
                message: body,
            },
        };
        Err(err)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RowStore for AppwriteStore {
    async fn create_row(
        &self,
        api_key: &str,
        row_id: &str,
        data: Map<String, Value>,
    ) -> Result<Row, StoreError> {
        let body = serde_json::json!({
            "rowId": row_id,
            "data": data,
        });

        tracing::debug!(table = %self.config.table_id, row_id, "Creating row");

        let response = self
            .request(reqwest::Method::POST, self.rows_url(), api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn list_rows(&self, api_key: &str, queries: &[Query]) -> Result<RowList, StoreError> {
        let params = queries
            .iter()
            .map(|q| {
                serde_json::to_string(q)
                    .map(|encoded| ("queries[]", encoded))
                    .map_err(|e| StoreError::Decode(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(table = %self.config.table_id, queries = params.len(), "Listing rows");

        let response = self
            .request(reqwest::Method::GET, self.rows_url(), api_key)
            .query(&params)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
