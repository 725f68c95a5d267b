// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Lance Authors

//! AWS Glue `SearchTables` client implementing [`CatalogSearchClient`].
//!
//! Speaks the Glue JSON protocol over HTTP. Request signing is not handled
//! here; point the client at a signing proxy or supply a bearer token.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::*;
use crate::search_source::{CatalogSearchClient, SearchTablesPage, SearchTablesRequest};

const SEARCH_TABLES_TARGET: &str = "AWSGlue.SearchTables";
const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Configuration for connecting to a Glue endpoint.
#[derive(Debug, Clone)]
pub struct GlueCatalogConfig {
    /// Endpoint URL (e.g., `https://glue.us-east-1.amazonaws.com`).
    pub endpoint: String,
    /// Optional bearer token for authenticated access.
    pub bearer_token: Option<String>,
    /// Optional request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl GlueCatalogConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bearer_token: None,
            timeout_secs: None,
        }
    }

    /// Public Glue endpoint for an AWS region.
    pub fn for_region(region: &str) -> Self {
        Self::new(format!("https://glue.{}.amazonaws.com", region))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Glue HTTP client.
pub struct GlueCatalogClient {
    config: GlueCatalogConfig,
    client: Client,
}

impl GlueCatalogClient {
    pub fn new(config: GlueCatalogConfig) -> CatalogResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(timeout));
        }
        let client = builder.build().map_err(|e| {
            ConnectionSnafu {
                message: format!("Failed to build HTTP client: {}", e),
            }
            .build()
        })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GlueCatalogConfig {
        &self.config
    }

    fn request(&self, target: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/", self.config.endpoint);
        let mut req = self
            .client
            .post(&url)
            .header("X-Amz-Target", target)
            .header(reqwest::header::CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE);
        if let Some(ref token) = self.config.bearer_token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> CatalogResult<T> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.bytes().await.map_err(|e| {
                ConnectionSnafu {
                    message: e.to_string(),
                }
                .build()
            })?;
            return serde_json::from_slice(&body).map_err(|e| {
                InvalidResponseSnafu {
                    message: e.to_string(),
                }
                .build()
            });
        }

        let body = resp.text().await.unwrap_or_default();
        let kind = serde_json::from_str::<GlueErrorBody>(&body)
            .ok()
            .and_then(|b| b.error_type)
            .map(|t| error_kind(&t).to_string())
            .unwrap_or_default();
        let message = format!("HTTP {}: {}", status, body);

        match (status, kind.as_str()) {
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _)
            | (
                _,
                "AccessDeniedException"
                | "UnrecognizedClientException"
                | "InvalidSignatureException",
            ) => AuthSnafu { message }.fail(),
            (StatusCode::TOO_MANY_REQUESTS, _) | (_, "ThrottlingException") => {
                ThrottledSnafu { message }.fail()
            }
            _ => ConnectionSnafu { message }.fail(),
        }
    }
}

// ---- Serde models for Glue error responses ----

#[derive(Deserialize)]
struct GlueErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
}

/// Glue may prefix the error name with a namespace, e.g.
/// `com.amazonaws.glue#AccessDeniedException`.
fn error_kind(error_type: &str) -> &str {
    error_type.rsplit('#').next().unwrap_or(error_type)
}

// ---- CatalogSearchClient implementation ----

#[async_trait]
impl CatalogSearchClient for GlueCatalogClient {
    fn name(&self) -> &str {
        "aws-glue"
    }

    async fn search_tables(
        &self,
        request: &SearchTablesRequest,
    ) -> CatalogResult<SearchTablesPage> {
        // `json` keeps the amz-json content type set by `request`.
        let resp = self
            .request(SEARCH_TABLES_TARGET)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                ConnectionSnafu {
                    message: e.to_string(),
                }
                .build()
            })?;

        self.handle_response(resp).await
    }
}
