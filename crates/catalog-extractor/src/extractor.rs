// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Lance Authors

//! Pull-based extractor turning raw Glue records into [`TableMetadata`].
//!
//! Each call to [`MetadataExtractor::extract`] pulls exactly one raw record
//! from a [`CatalogSearchSource`] and normalizes it:
//!
//! - `StorageDescriptor.Location` (`catalog.schema.table`) gives the
//!   qualified name.
//! - `Description`, falling back to `Parameters.comment`, gives the
//!   description.
//! - `StorageDescriptor.Columns` followed by `PartitionKeys` give the columns,
//!   numbered from 0 in that order.
//! - `TableType == "VIRTUAL_VIEW"` marks a view.
//!
//! A record that cannot be normalized fails only the call that pulled it.
//! The record is consumed either way, so the next call moves on to the
//! following record; aborting the run is left to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CatalogResult, MalformedRecordSnafu};
use crate::models::{ColumnMetadata, TableMetadata};
use crate::search_source::{
    CatalogSearchClient, CatalogSearchSource, RawCatalogRecord, SearchFilter, SearchTablesRequest,
};

const VIRTUAL_VIEW: &str = "VIRTUAL_VIEW";
const COMMENT_PARAMETER: &str = "comment";

/// Abstract trait for anything that yields normalized table metadata one
/// record at a time.
#[async_trait]
pub trait MetadataExtractor: Send {
    /// Configuration scope of this extractor (e.g., "extractor.glue").
    fn scope(&self) -> &str;

    /// Return the next record, or `None` once the source is drained.
    ///
    /// `None` is terminal: every later call returns `None` as well.
    async fn extract(&mut self) -> CatalogResult<Option<TableMetadata>>;
}

/// Settings for a Glue extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GlueExtractorConfig {
    /// Restricts which catalog entries are returned.
    pub filters: Vec<SearchFilter>,
    /// Catalog to search; the account's default catalog when unset.
    pub catalog_id: Option<String>,
    /// Page size requested from the service.
    pub max_results: Option<u32>,
}

impl GlueExtractorConfig {
    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    fn search_request(&self) -> SearchTablesRequest {
        SearchTablesRequest {
            filters: self.filters.clone(),
            catalog_id: self.catalog_id.clone(),
            max_results: self.max_results,
            next_token: None,
        }
    }
}

/// Whether the underlying record sequence still has records to offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorState {
    Active,
    /// Terminal.
    Exhausted,
}

/// Extracts [`TableMetadata`] from AWS Glue `SearchTables` results.
pub struct GlueMetadataExtractor {
    source: CatalogSearchSource,
    state: ExtractorState,
    records_extracted: usize,
}

impl GlueMetadataExtractor {
    /// Attach to `client` and set up the lazy record sequence.
    ///
    /// Nothing is fetched until the first [`Self::extract`] call.
    pub fn init(config: GlueExtractorConfig, client: Arc<dyn CatalogSearchClient>) -> Self {
        let source = CatalogSearchSource::fetch_all(client, config.search_request());
        Self {
            source,
            state: ExtractorState::Active,
            records_extracted: 0,
        }
    }

    /// Build a [`crate::GlueCatalogClient`] from `glue_config`, then [`Self::init`].
    #[cfg(feature = "glue-http")]
    pub fn connect(
        config: GlueExtractorConfig,
        glue_config: crate::glue_catalog::GlueCatalogConfig,
    ) -> CatalogResult<Self> {
        let client = crate::glue_catalog::GlueCatalogClient::new(glue_config)?;
        Ok(Self::init(config, Arc::new(client)))
    }

    pub fn state(&self) -> ExtractorState {
        self.state
    }

    /// Number of records normalized so far.
    pub fn records_extracted(&self) -> usize {
        self.records_extracted
    }

    /// Advance the underlying sequence by one record.
    pub async fn extract(&mut self) -> CatalogResult<Option<TableMetadata>> {
        if self.state == ExtractorState::Exhausted {
            return Ok(None);
        }

        let Some(raw) = self.source.next_record().await? else {
            log::debug!(
                "Glue extraction exhausted after {} records from {} pages",
                self.records_extracted,
                self.source.pages_fetched()
            );
            self.state = ExtractorState::Exhausted;
            return Ok(None);
        };

        let table = normalize_record(raw)?;
        self.records_extracted += 1;
        log::trace!("Extracted {}", table);
        Ok(Some(table))
    }
}

#[async_trait]
impl MetadataExtractor for GlueMetadataExtractor {
    fn scope(&self) -> &str {
        "extractor.glue"
    }

    async fn extract(&mut self) -> CatalogResult<Option<TableMetadata>> {
        GlueMetadataExtractor::extract(self).await
    }
}

// ---- Serde view of the fields read from a raw Glue record ----

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GlueTable {
    database_name: String,
    description: Option<String>,
    storage_descriptor: Option<GlueStorageDescriptor>,
    partition_keys: Option<Vec<GlueColumn>>,
    /// Only `comment` is read; other entries may hold any JSON value.
    parameters: Option<Value>,
    table_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GlueStorageDescriptor {
    columns: Option<Vec<GlueColumn>>,
    location: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GlueColumn {
    name: String,
    #[serde(rename = "Type")]
    data_type: String,
    comment: Option<String>,
}

/// Normalize one raw record.
pub fn normalize_record(raw: RawCatalogRecord) -> CatalogResult<TableMetadata> {
    let record = raw.name().unwrap_or("<unnamed>").to_string();
    let glue: GlueTable = serde_json::from_value(raw.into_value()).map_err(|e| {
        MalformedRecordSnafu {
            record: record.as_str(),
            message: e.to_string(),
        }
        .build()
    })?;

    let (columns, location) = match glue.storage_descriptor {
        Some(sd) => (sd.columns.unwrap_or_default(), sd.location),
        None => (Vec::new(), None),
    };

    let Some(location) = location else {
        return MalformedRecordSnafu {
            record,
            message: "missing StorageDescriptor.Location",
        }
        .fail();
    };
    let (cluster, schema, table) = split_location(&location).ok_or_else(|| {
        MalformedRecordSnafu {
            record: record.as_str(),
            message: format!(
                "location '{}' is not of the form catalog.schema.table",
                location
            ),
        }
        .build()
    })?;

    let description = glue
        .description
        .filter(|d| !d.is_empty())
        .or_else(|| {
            glue.parameters?
                .get(COMMENT_PARAMETER)
                .and_then(Value::as_str)
                .map(str::to_string)
        });

    let columns = columns
        .into_iter()
        .chain(glue.partition_keys.unwrap_or_default())
        .enumerate()
        .map(|(position, col)| ColumnMetadata {
            name: col.name,
            description: col.comment,
            data_type: col.data_type,
            ordinal_position: position,
        })
        .collect();

    Ok(TableMetadata {
        database: glue.database_name,
        cluster: cluster.to_string(),
        schema: schema.to_string(),
        table: table.to_string(),
        description,
        columns,
        is_view: glue.table_type.as_deref() == Some(VIRTUAL_VIEW),
    })
}

fn split_location(location: &str) -> Option<(&str, &str, &str)> {
    let parts: Vec<&str> = location.split('.').collect();
    match parts.as_slice() {
        [catalog, schema, table] if parts.iter().all(|p| !p.is_empty()) => {
            Some((*catalog, *schema, *table))
        }
        _ => None,
    }
}
