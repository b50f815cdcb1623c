// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One-shot, non-interactive capture used by `--snapshot`.

use crate::client::GraphClient;
use crate::selection::{Effect, SelectionAction};
use crate::ui::GraphState;

/// Replays `actions` through the reducer, then performs the fetches the resulting selection
/// calls for (node list, properties, node detail) one after another.
///
/// Failures land in the status line exactly as they would in the TUI.
pub async fn capture_state(client: &GraphClient, actions: &[SelectionAction]) -> GraphState {
    let mut state = GraphState::default();
    let mut wants_node = false;
    for action in actions {
        wants_node |= state.dispatch(action.clone()).contains(&Effect::FetchNode);
    }

    match client.fetch_node_list().await {
        Ok(Some(labels)) => state.apply_node_list(labels),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "node list fetch failed");
            state.node_list_failed(&err);
        }
    }

    let path = state.selection().properties_path();
    match client.fetch_properties(&path).await {
        Ok(Some(properties)) => state.apply_properties(properties),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "properties fetch failed");
            state.properties_failed(&path, &err);
        }
    }

    if let Some(node) = state.selection().node().cloned().filter(|_| wants_node) {
        match client.fetch_node(&node).await {
            Ok(Some(detail)) => state.apply_node(detail),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "node fetch failed");
                state.node_failed(node.as_str(), &err);
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::capture_state;
    use crate::client::{FetchError, GraphBackend, GraphClient};
    use crate::model::{NodeLabel, StreamLabel};
    use crate::selection::SelectionAction;

    struct MapBackend(BTreeMap<&'static str, &'static str>);

    #[async_trait]
    impl GraphBackend for MapBackend {
        async fn get(&self, path: &str) -> Result<String, FetchError> {
            self.0.get(path).map(|body| (*body).to_owned()).ok_or_else(|| FetchError::Status {
                path: path.to_owned(),
                status: 404,
                reason: "Not Found".to_owned(),
            })
        }
    }

    fn client(routes: &[(&'static str, &'static str)]) -> GraphClient {
        GraphClient::new(Arc::new(MapBackend(routes.iter().copied().collect())))
    }

    #[tokio::test]
    async fn root_snapshot_fetches_list_and_root_properties() {
        let client = client(&[
            ("/nodeList", r#"["producer"]"#),
            ("/props", r#"[{"name":"Running","type":"bool","value":true}]"#),
        ]);

        let state = capture_state(&client, &[]).await;
        assert_eq!(state.node_list(), ["producer".to_owned()]);
        assert_eq!(state.properties()[0].name, "Running");
        assert!(state.node().is_none());
        assert_eq!(state.status(), None);
    }

    #[tokio::test]
    async fn selected_stream_fetches_its_properties_and_node() {
        let client = client(&[
            ("/nodeList", r#"["producer"]"#),
            ("/node/producer", r#"{name:"producer",output:[{name:"out",type:"int"}],input:[]}"#),
            ("/node/producer/stream/out/props", r#"[{name:"MaxQueueSize",type:"int",value:16}]"#),
        ]);
        let actions = [
            SelectionAction::ToggleNode(NodeLabel::new("producer").unwrap()),
            SelectionAction::SelectStream(StreamLabel::new("out").unwrap()),
        ];

        let state = capture_state(&client, &actions).await;
        assert_eq!(state.properties()[0].display_value(), "16");
        assert_eq!(state.node().map(|n| n.name.as_str()), Some("producer"));
    }

    #[tokio::test]
    async fn failures_keep_the_selection_and_report() {
        let client = client(&[("/nodeList", "[]")]);
        let actions = [SelectionAction::ToggleNode(NodeLabel::new("ghost").unwrap())];

        let state = capture_state(&client, &actions).await;
        assert_eq!(state.selection().node().map(|n| n.as_str()), Some("ghost"));
        // The node fetch runs last, so its message wins.
        assert_eq!(state.status(), Some("Error getting node ghost"));
    }
}
