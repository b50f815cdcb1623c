// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! File-backed tracing setup. The terminal belongs to the TUI, so nothing is logged to
//! stdout/stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "MGNAV_LOG";
const DEFAULT_FILTER: &str = "mgnav=info";

/// Builds the event filter from `MGNAV_LOG`, falling back to `mgnav=info` when the variable
/// is unset or unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a global fmt subscriber appending to `path`.
pub fn init_file_logging(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}
