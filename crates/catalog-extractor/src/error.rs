// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Lance Authors

//! Error type shared by the search source, the HTTP client and the extractor.

use snafu::{Location, Snafu};

/// Errors that can occur while extracting catalog metadata.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CatalogError {
    /// Network or HTTP error talking to the catalog service.
    #[snafu(display("Catalog connection error: {message}, {location}"))]
    Connection {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Authentication or authorization failure.
    #[snafu(display("Auth error: {message}, {location}"))]
    Auth {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// The catalog service rejected the request because of rate limits.
    #[snafu(display("Request throttled: {message}, {location}"))]
    Throttled {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Invalid or unparsable response from the catalog service.
    #[snafu(display("Invalid response: {message}, {location}"))]
    InvalidResponse {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// A raw catalog record could not be normalized.
    #[snafu(display("Malformed record '{record}': {message}, {location}"))]
    MalformedRecord {
        record: String,
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Failed to map a catalog type to an Arrow type.
    #[snafu(display("Type mapping error: {message}, {location}"))]
    TypeMapping {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl CatalogError {
    /// Whether this error came from the upstream service call rather than
    /// from the content of a record.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::Auth { .. }
                | Self::Throttled { .. }
                | Self::InvalidResponse { .. }
        )
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
