// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! mgnav CLI entrypoint.
//!
//! By default this runs the interactive TUI against a graph backend. `--demo` serves a
//! built-in graph on an ephemeral local port and connects to it; `--snapshot` prints the
//! HTML view once instead of starting the TUI.

use std::error::Error;
use std::sync::Arc;

use mgnav::client::{GraphClient, HttpBackend};
use mgnav::config::{parse_options, print_usage, BackendTarget, Config, BACKEND_URL_ENV};
use tokio::sync::oneshot;

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "mgnav".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        let config = Config::resolve(options, std::env::var(BACKEND_URL_ENV).ok())?;

        if let Some(path) = config.log_file.as_deref() {
            mgnav::logging::init_file_logging(path)?;
        }

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
            let (base_url, server_handle) = match &config.backend {
                BackendTarget::Url(url) => (url.clone(), None),
                BackendTarget::Demo => {
                    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await?;
                    let addr = listener.local_addr()?;
                    let graph = Arc::new(mgnav::demo::demo_graph());
                    let handle = tokio::spawn(async move {
                        let shutdown = async move {
                            let _ = shutdown_rx.await;
                        };
                        if let Err(err) = mgnav::demo::serve(listener, graph, shutdown).await {
                            tracing::error!(error = %err, "demo backend failed");
                        }
                    });
                    tracing::info!(%addr, "demo backend listening");
                    (format!("http://{addr}"), Some(handle))
                }
            };

            let backend = HttpBackend::builder(base_url.clone())
                .timeout(config.timeout)
                .jsonp(config.jsonp)
                .build()?;
            let client = GraphClient::new(Arc::new(backend));

            let outcome: Result<(), Box<dyn Error>> = if config.snapshot {
                let state =
                    mgnav::snapshot::capture_state(&client, config.initial_actions()).await;
                let view = mgnav::view::GraphView::build(&state);
                print!("{}", mgnav::view::html::render_html(&view));
                Ok(())
            } else {
                let options = mgnav::tui::TuiOptions {
                    base_url,
                    refresh: config.refresh,
                    initial_actions: config.initial_actions().to_vec(),
                };
                let runtime = tokio::runtime::Handle::current();
                let tui_join = tokio::task::spawn_blocking(move || {
                    mgnav::tui::run(client, options, runtime).map_err(|err| err.to_string())
                })
                .await;

                match tui_join {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(err)) => Err(err.into()),
                    Err(err) => Err(Box::new(err) as Box<dyn Error>),
                }
            };

            let _ = shutdown_tx.send(());
            if let Some(handle) = server_handle {
                let _ = handle.await;
            }

            outcome
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("mgnav: {err}");
        std::process::exit(1);
    }
}
