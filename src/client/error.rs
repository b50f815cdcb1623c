// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed fetch. Terminal at the UI boundary: reported once, never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: BoxError,
    },
    #[error("request to {path} timed out")]
    Timeout { path: String },
    #[error("{path} answered {status} {reason}")]
    Status {
        path: String,
        status: u16,
        reason: String,
    },
    #[error("malformed reply from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn transport(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Transport { path, .. }
            | Self::Timeout { path }
            | Self::Status { path, .. }
            | Self::Decode { path, .. } => path,
        }
    }

    /// Short status text for the status line, in the vocabulary script-tag fetchers report:
    /// the HTTP reason phrase, `timeout`, `parsererror`, or plain `error`.
    pub fn status_text(&self) -> &str {
        match self {
            Self::Transport { .. } => "error",
            Self::Timeout { .. } => "timeout",
            Self::Status { reason, .. } if !reason.is_empty() => reason,
            Self::Status { .. } => "error",
            Self::Decode { .. } => "parsererror",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchError;

    #[test]
    fn status_text_prefers_reason_phrase() {
        let err = FetchError::Status {
            path: "/node/x/props".to_owned(),
            status: 404,
            reason: "Not Found".to_owned(),
        };
        assert_eq!(err.status_text(), "Not Found");
        assert_eq!(err.path(), "/node/x/props");
        assert_eq!(err.to_string(), "/node/x/props answered 404 Not Found");
    }

    #[test]
    fn status_text_falls_back_per_kind() {
        let err = FetchError::Status {
            path: "/props".to_owned(),
            status: 599,
            reason: String::new(),
        };
        assert_eq!(err.status_text(), "error");
        assert_eq!(FetchError::transport("/props", "connection refused").status_text(), "error");
        assert_eq!(FetchError::Timeout { path: "/props".to_owned() }.status_text(), "timeout");

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FetchError::Decode { path: "/props".to_owned(), source };
        assert_eq!(err.status_text(), "parsererror");
    }
}
