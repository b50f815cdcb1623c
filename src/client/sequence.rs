// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// The three independent fetch channels. Each only competes with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    NodeList,
    Properties,
    Node,
}

impl RequestKind {
    fn slot(self) -> usize {
        match self {
            Self::NodeList => 0,
            Self::Properties => 1,
            Self::Node => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out per-kind sequence numbers and answers whether a reply is still wanted.
///
/// Only the reply to the most recently issued request of a kind is current; anything older
/// arrived late and must not overwrite the view.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: [u64; 3],
}

impl RequestTracker {
    pub fn issue(&mut self, kind: RequestKind) -> RequestSeq {
        let slot = &mut self.latest[kind.slot()];
        *slot = slot.wrapping_add(1);
        RequestSeq(*slot)
    }

    /// Invalidates any in-flight request of `kind` without issuing a new one.
    pub fn supersede(&mut self, kind: RequestKind) {
        self.issue(kind);
    }

    pub fn is_current(&self, kind: RequestKind, seq: RequestSeq) -> bool {
        self.latest[kind.slot()] == seq.0
    }
}
