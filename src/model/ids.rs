// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;

/// A graph element label as it appears in backend routes.
///
/// Labels are spliced verbatim into paths like `/node/<node>/pin/<pin>/props`, and the
/// backend splits request paths on `/` (skipping empty segments). A label is therefore only
/// addressable when it is a non-empty path segment; that is the one thing enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<K> {
    segment: String,
    kind: PhantomData<fn() -> K>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label must not be empty")]
    Empty,
    #[error("label must not contain '/'")]
    ContainsSlash,
}

impl<K> Label<K> {
    pub fn new(segment: impl Into<String>) -> Result<Self, LabelError> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(LabelError::Empty);
        }
        if segment.contains('/') {
            return Err(LabelError::ContainsSlash);
        }
        Ok(Self {
            segment,
            kind: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.segment
    }
}

impl<K> fmt::Display for Label<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segment)
    }
}

impl<K> FromStr for Label<K> {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<K> PartialEq<str> for Label<K> {
    fn eq(&self, other: &str) -> bool {
        self.segment == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinKind {}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {}

pub type NodeLabel = Label<NodeKind>;
pub type PinLabel = Label<PinKind>;
pub type StreamLabel = Label<StreamKind>;

#[cfg(test)]
mod tests {
    use super::{LabelError, NodeLabel, PinLabel};

    #[test]
    fn labels_must_be_one_path_segment() {
        assert_eq!(NodeLabel::new(""), Err(LabelError::Empty));
        assert_eq!(PinLabel::new("a/b"), Err(LabelError::ContainsSlash));
        assert_eq!(LabelError::ContainsSlash.to_string(), "label must not contain '/'");
    }

    #[test]
    fn label_keeps_markup_verbatim() {
        let label: NodeLabel = "<script>producer".parse().expect("label");
        assert_eq!(label.as_str(), "<script>producer");
        assert_eq!(label.to_string(), "<script>producer");
        assert!(label == *"<script>producer");
    }
}
