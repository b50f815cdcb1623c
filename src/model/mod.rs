// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire data model.
//!
//! A graph exposes nodes; nodes expose output streams and input pins; every one of them (and
//! the graph root) carries a flat property list.

pub mod graph;
pub mod ids;

pub use graph::{display_value, NodeDetail, PinConnection, PinRef, PropertyEntry, StreamRef};
pub use ids::{Label, LabelError, NodeLabel, PinLabel, StreamLabel};
