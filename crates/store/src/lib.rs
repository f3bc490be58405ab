//! Row store access for share persistence.
//!
//! [`RowStore`] is the seam between the HTTP handlers and the managed table
//! holding shares. [`AppwriteStore`] talks to an Appwrite TablesDB table over
//! REST; [`MemoryStore`] keeps rows in process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod appwrite;
pub mod memory;

pub use appwrite::{AppwriteConfig, AppwriteStore};
pub use memory::MemoryStore;

/// Row id that asks the store to generate a unique identifier.
pub const UNIQUE_ID: &str = "unique()";

/// Attribute name of a row's identifier in queries.
pub const ID_ATTRIBUTE: &str = "$id";

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A row as returned by the store.
///
/// System attributes other than the id and creation time, and all user
/// columns, end up in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Row {
    /// Look up a column by name.
    ///
    /// `$id` and `$createdAt` resolve to the typed fields.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "$id" => Some(Value::String(self.id.clone())),
            "$createdAt" => Some(Value::String(self.created_at.clone())),
            other => self.data.get(other).cloned(),
        }
    }
}

/// Result of a list query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowList {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub rows: Vec<Row>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// A filter understood by the store's list endpoint.
///
/// Serializes to the JSON query form, e.g.
/// `{"method":"equal","attribute":"$id","values":["abc"]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Query {
    Equal {
        attribute: String,
        values: Vec<Value>,
    },
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    /// Whether `row` satisfies this filter.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Query::Equal { attribute, values } => row
                .attribute(attribute)
                .is_some_and(|actual| values.contains(&actual)),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the row store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store rejected the call and reported a numeric code.
    #[error("{message}")]
    Api {
        /// Reported code, equal to the HTTP status for REST calls.
        code: u16,
        /// Machine-readable error type, when the store sends one.
        kind: Option<String>,
        message: String,
    },

    /// The store answered with a body that does not have the expected shape.
    #[error("Unexpected store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// The store-reported code, if the failure carried one.
    pub fn code(&self) -> Option<u16> {
        match self {
            StoreError::Api { code, .. } => Some(*code),
            StoreError::Request(err) => err.status().map(|s| s.as_u16()),
            StoreError::Decode(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// A single table of rows.
///
/// Every call carries the API key to authenticate with; the store decides
/// what the key may do.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Create a row. Pass [`UNIQUE_ID`] to let the store pick the id.
    async fn create_row(
        &self,
        api_key: &str,
        row_id: &str,
        data: Map<String, Value>,
    ) -> Result<Row, StoreError>;

    /// List rows matching every query.
    async fn list_rows(&self, api_key: &str, queries: &[Query]) -> Result<RowList, StoreError>;
}
