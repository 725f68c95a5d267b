// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Lance Authors

//! Normalized table metadata produced by the extractor.
//!
//! These are the records handed to downstream cataloging tools. Once
//! returned by [`crate::MetadataExtractor::extract`] they are owned by the
//! caller; the extractor keeps no reference to them.

use std::fmt;

use arrow_schema::SchemaRef;
use serde::Serialize;

use crate::error::CatalogResult;

/// Metadata about a column in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub description: Option<String>,
    /// Type string exactly as the catalog reports it (e.g. "bigint", "varchar(64)").
    pub data_type: String,
    /// Column position (0-based). Partition keys continue after regular columns.
    pub ordinal_position: usize,
}

impl ColumnMetadata {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        data_type: impl Into<String>,
        ordinal_position: usize,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            data_type: data_type.into(),
            ordinal_position,
        }
    }
}

/// Full table or view metadata including columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    /// Catalog-level database the record was found in.
    pub database: String,
    /// First segment of the storage location.
    pub cluster: String,
    pub schema: String,
    pub table: String,
    pub description: Option<String>,
    pub columns: Vec<ColumnMetadata>,
    pub is_view: bool,
}

impl TableMetadata {
    /// `cluster.schema.table`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.cluster, self.schema, self.table)
    }

    /// Convert the column definitions to an Arrow schema.
    ///
    /// Uses the standard mapping from
    /// [`crate::type_mapping::columns_to_arrow_schema`].
    pub fn arrow_schema(&self) -> CatalogResult<SchemaRef> {
        crate::type_mapping::columns_to_arrow_schema(&self.columns)
    }
}

impl fmt::Display for TableMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} '{}' in database '{}' ({} columns)",
            if self.is_view { "view" } else { "table" },
            self.qualified_name(),
            self.description.as_deref().unwrap_or_default(),
            self.database,
            self.columns.len()
        )
    }
}
