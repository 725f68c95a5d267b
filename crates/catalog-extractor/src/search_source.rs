// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Lance Authors

//! Paginated table search behind a single lazy record sequence.
//!
//! [`CatalogSearchClient`] is the narrow interface to the catalog service: it
//! executes exactly one page request. [`CatalogSearchSource`] drives it,
//! following continuation tokens on demand so the caller only ever sees one
//! flat sequence of [`RawCatalogRecord`]s.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogResult;

/// One table or view exactly as the catalog service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCatalogRecord(Value);

impl RawCatalogRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The catalog's own `Name` for the record, used in diagnostics only.
    pub fn name(&self) -> Option<&str> {
        self.0.get("Name").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawCatalogRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Comparison applied by a [`SearchFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterComparator {
    Equals,
    GreaterThan,
    LessThan,
    GreaterThanEquals,
    LessThanEquals,
}

/// A key/value predicate restricting which catalog entries are returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchFilter {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<FilterComparator>,
}

impl SearchFilter {
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comparator: Some(FilterComparator::Equals),
        }
    }
}

/// A single page request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchTablesRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<SearchFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// A single page of results plus the token for the next one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchTablesPage {
    #[serde(default)]
    pub table_list: Vec<RawCatalogRecord>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl SearchTablesPage {
    pub fn new(table_list: Vec<RawCatalogRecord>, next_token: Option<String>) -> Self {
        Self {
            table_list,
            next_token,
        }
    }
}

/// Client capable of running one page of a "search tables" operation.
///
/// Connection and authentication setup belong to the implementation; the
/// search source only ever calls [`Self::search_tables`].
#[async_trait]
pub trait CatalogSearchClient: Send + Sync {
    /// Human-readable name of the catalog service (e.g., "aws-glue").
    fn name(&self) -> &str;

    /// Fetch one page. Errors are returned as-is; no retry is attempted.
    async fn search_tables(&self, request: &SearchTablesRequest) -> CatalogResult<SearchTablesPage>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// No page requested yet.
    Start,
    /// More pages are available behind this token.
    Next(String),
    /// The service reported no further pages.
    Done,
}

/// Lazy, finite, non-restartable sequence of raw records.
///
/// Holds at most one page in memory and fetches the next page only when the
/// buffer runs dry.
pub struct CatalogSearchSource {
    client: Arc<dyn CatalogSearchClient>,
    request: SearchTablesRequest,
    buffer: VecDeque<RawCatalogRecord>,
    cursor: Cursor,
    pages_fetched: usize,
}

impl CatalogSearchSource {
    /// Build a sequence over every entry matching `request`'s filters.
    ///
    /// No request is issued until the first call to [`Self::next_record`].
    pub fn fetch_all(client: Arc<dyn CatalogSearchClient>, request: SearchTablesRequest) -> Self {
        Self {
            client,
            request: SearchTablesRequest {
                next_token: None,
                ..request
            },
            buffer: VecDeque::new(),
            cursor: Cursor::Start,
            pages_fetched: 0,
        }
    }

    /// Number of page requests that completed successfully.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Advance by one record, fetching further pages as needed.
    ///
    /// Returns `Ok(None)` once the service reports no further pages and the
    /// buffer is drained. A failed page request leaves the cursor where it
    /// was, so calling again re-issues the same request.
    pub async fn next_record(&mut self) -> CatalogResult<Option<RawCatalogRecord>> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }

            self.request.next_token = match &self.cursor {
                Cursor::Start => None,
                Cursor::Next(token) => Some(token.clone()),
                Cursor::Done => return Ok(None),
            };

            let page = self.client.search_tables(&self.request).await?;
            self.pages_fetched += 1;
            log::debug!(
                "{}: fetched page {} with {} records",
                self.client.name(),
                self.pages_fetched,
                page.table_list.len()
            );

            self.buffer.extend(page.table_list);
            self.cursor = match page.next_token {
                Some(token) if !token.is_empty() => Cursor::Next(token),
                _ => Cursor::Done,
            };
        }
    }
}
