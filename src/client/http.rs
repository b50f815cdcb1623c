// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use async_trait::async_trait;

use super::{FetchError, GraphBackend};

/// Callback name sent when JSONP is requested. Any identifier works; the decoder strips it.
pub const JSONP_CALLBACK: &str = "mgnav_cb";

/// [`GraphBackend`] over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    jsonp: bool,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> HttpBackendBuilder {
        HttpBackendBuilder {
            base_url: base_url.into(),
            timeout: None,
            jsonp: false,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Debug, Clone)]
pub struct HttpBackendBuilder {
    base_url: String,
    timeout: Option<Duration>,
    jsonp: bool,
}

impl HttpBackendBuilder {
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn jsonp(mut self, jsonp: bool) -> Self {
        self.jsonp = jsonp;
        self
    }

    pub fn build(self) -> Result<HttpBackend, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::transport(self.base_url.clone(), err))?;

        Ok(HttpBackend {
            client,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            jsonp: self.jsonp,
        })
    }
}

#[async_trait]
impl GraphBackend for HttpBackend {
    async fn get(&self, path: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(self.url_for(path));
        if self.jsonp {
            request = request.query(&[("callback", JSONP_CALLBACK)]);
        }

        let response = request.send().await.map_err(|err| map_reqwest_error(path, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_owned(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        response.text().await.map_err(|err| map_reqwest_error(path, err))
    }
}

fn map_reqwest_error(path: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            path: path.to_owned(),
        }
    } else {
        FetchError::transport(path, err)
    }
}
