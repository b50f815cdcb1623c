// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! mgnav: terminal navigator for live media-processing graphs.
//!
//! A backend serves node names, node wiring and typed properties over HTTP (optionally
//! JSONP). The client keeps a single node/pin/stream selection, derives the property route
//! from it, and renders replies into a terminal UI or a static HTML snapshot.

pub mod client;
pub mod config;
pub mod demo;
pub mod logging;
pub mod model;
pub mod selection;
pub mod snapshot;
pub mod tui;
pub mod ui;
pub mod view;
