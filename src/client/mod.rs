// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Backend access.
//!
//! [`GraphBackend`] is the transport seam (path in, body text out). [`GraphClient`] sits on top
//! and turns bodies into typed replies. Every fetch resolves to `Ok(Some(_))`, `Ok(None)` for a
//! reply without payload, or a [`FetchError`].

mod error;
pub mod http;
pub mod payload;
pub mod sequence;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::model::{NodeDetail, NodeLabel, PropertyEntry};
use crate::selection::node_path;

pub use error::FetchError;
pub use http::HttpBackend;
pub use sequence::{RequestKind, RequestSeq, RequestTracker};

pub type FetchResult<T> = Result<Option<T>, FetchError>;

pub const NODE_LIST_PATH: &str = "/nodeList";

#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// GETs `path` (relative to the backend root) and returns the reply body.
    async fn get(&self, path: &str) -> Result<String, FetchError>;
}

#[derive(Clone)]
pub struct GraphClient {
    backend: Arc<dyn GraphBackend>,
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient").finish_non_exhaustive()
    }
}

impl GraphClient {
    pub fn new(backend: Arc<dyn GraphBackend>) -> Self {
        Self { backend }
    }

    pub async fn fetch_node_list(&self) -> FetchResult<Vec<String>> {
        self.fetch(NODE_LIST_PATH).await
    }

    /// `path` is a full property route as built by
    /// [`Selection::properties_path`](crate::selection::Selection::properties_path).
    pub async fn fetch_properties(&self, path: &str) -> FetchResult<Vec<PropertyEntry>> {
        self.fetch(path).await
    }

    pub async fn fetch_node(&self, node: &NodeLabel) -> FetchResult<NodeDetail> {
        self.fetch(&node_path(node)).await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        tracing::debug!(path, "fetch");
        let body = self.backend.get(path).await?;
        payload::decode(&body).map_err(|source| FetchError::Decode {
            path: path.to_owned(),
            source,
        })
    }
}
