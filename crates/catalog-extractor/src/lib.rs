// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Lance Authors

//! Table metadata extraction from remote data catalogs.
//!
//! This crate turns the heterogeneous table records of a data catalog
//! service into one uniform [`TableMetadata`] model:
//!
//! - [`CatalogSearchClient`] — runs one page of a catalog table search
//! - [`CatalogSearchSource`] — hides pagination behind a lazy record sequence
//! - [`MetadataExtractor`] — pulls and normalizes one record per call
//!
//! [`GlueCatalogClient`] talks to the AWS Glue `SearchTables` API.

pub mod error;
pub mod extractor;
#[cfg(feature = "glue-http")]
pub mod glue_catalog;
pub mod models;
pub mod search_source;
pub mod type_mapping;

pub use error::{CatalogError, CatalogResult};
pub use extractor::{
    normalize_record, ExtractorState, GlueExtractorConfig, GlueMetadataExtractor,
    MetadataExtractor,
};
pub use models::{ColumnMetadata, TableMetadata};
pub use search_source::{
    CatalogSearchClient, CatalogSearchSource, FilterComparator, RawCatalogRecord, SearchFilter,
    SearchTablesPage, SearchTablesRequest,
};
pub use type_mapping::columns_to_arrow_schema;

#[cfg(feature = "glue-http")]
pub use glue_catalog::{GlueCatalogClient, GlueCatalogConfig};
