//! In-process row store.
//!
//! Generates ids and timestamps the way the managed store does and can be
//! restricted to a set of accepted API keys.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{Query, Row, RowList, RowStore, StoreError, UNIQUE_ID};

#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Row>>,
    /// `None` accepts every key.
    api_keys: Option<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that answers 401 to any key not in `keys`.
    pub fn with_api_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: RwLock::default(),
            api_keys: Some(keys.into_iter().map(Into::into).collect()),
        }
    }

    /// Insert a row as-is, bypassing id generation.
    pub async fn insert(&self, row: Row) {
        self.rows.write().await.push(row);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn authenticate(&self, api_key: &str) -> Result<(), StoreError> {
        match &self.api_keys {
            Some(keys) if !keys.contains(api_key) => Err(StoreError::Api {
                code: 401,
                kind: Some("user_unauthorized".into()),
                message: "The current user is not authorized to perform the requested action."
                    .into(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn create_row(
        &self,
        api_key: &str,
        row_id: &str,
        data: Map<String, Value>,
    ) -> Result<Row, StoreError> {
        self.authenticate(api_key)?;

        let id = if row_id == UNIQUE_ID {
            uuid::Uuid::new_v4().simple().to_string()
        } else {
            row_id.to_string()
        };

        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id == id) {
            return Err(StoreError::Api {
                code: 409,
                kind: Some("row_already_exists".into()),
                message: format!("Row with the requested ID '{id}' already exists."),
            });
        }

        let row = Row {
            id,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            data,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_rows(&self, api_key: &str, queries: &[Query]) -> Result<RowList, StoreError> {
        self.authenticate(api_key)?;

        let rows: Vec<Row> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| queries.iter().all(|q| q.matches(row)))
            .cloned()
            .collect();

        Ok(RowList {
            total: rows.len() as u64,
            rows,
        })
    }
}
