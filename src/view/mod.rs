// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Declarative view tree.
//!
//! [`GraphView::build`] computes what should be on screen from a [`GraphState`]; renderers
//! (the TUI, [`html::render_html`]) only draw it. Text in the tree is raw; each renderer
//! applies its own escaping.

pub mod html;
pub mod text;

use crate::model::PinConnection;
use crate::ui::GraphState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphView {
    pub node_list: Vec<NodeEntryView>,
    pub properties: Vec<PropertyRowView>,
    pub detail: Option<NodeDetailView>,
    pub status: Option<String>,
    /// Element path the property table belongs to (`""` for the graph root).
    pub properties_target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEntryView {
    pub label: String,
    pub marked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRowView {
    pub name: String,
    pub type_name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDetailView {
    pub header: String,
    pub outputs: Vec<StreamRowView>,
    pub inputs: Vec<PinRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRowView {
    pub name: String,
    pub type_name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRowView {
    pub name: String,
    pub type_name: String,
    pub connection: Option<PinConnection>,
    pub selected: bool,
}

/// One activatable row of the node detail panel, in display order (outputs, then inputs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailRow<'a> {
    Stream(&'a StreamRowView),
    Pin(&'a PinRowView),
}

impl GraphView {
    pub fn build(state: &GraphState) -> Self {
        let selection = state.selection();

        let node_list = state
            .node_list()
            .iter()
            .map(|label| NodeEntryView {
                label: label.clone(),
                marked: selection.is_node_selected(label),
            })
            .collect();

        let properties = state
            .properties()
            .iter()
            .map(|entry| PropertyRowView {
                name: entry.name.clone(),
                type_name: entry.type_name.clone(),
                value: entry.display_value(),
            })
            .collect();

        let detail = state.node().map(|node| {
            let selected_stream = selection.stream().map(|s| s.as_str());
            let selected_pin = selection.pin().map(|p| p.as_str());
            NodeDetailView {
                header: node.name.clone(),
                outputs: node
                    .output
                    .iter()
                    .map(|stream| StreamRowView {
                        name: stream.name.clone(),
                        type_name: stream.type_name.clone(),
                        selected: selected_stream == Some(stream.name.as_str()),
                    })
                    .collect(),
                inputs: node
                    .input
                    .iter()
                    .map(|pin| PinRowView {
                        name: pin.name.clone(),
                        type_name: pin.type_name.clone(),
                        connection: pin.connection.clone(),
                        selected: selected_pin == Some(pin.name.as_str()),
                    })
                    .collect(),
            }
        });

        Self {
            node_list,
            properties,
            detail,
            status: state.status().map(ToOwned::to_owned),
            properties_target: selection.element_path(),
        }
    }

    pub fn marked_node(&self) -> Option<&NodeEntryView> {
        self.node_list.iter().find(|entry| entry.marked)
    }
}

impl NodeDetailView {
    pub fn rows(&self) -> impl Iterator<Item = DetailRow<'_>> + '_ {
        self.outputs
            .iter()
            .map(DetailRow::Stream)
            .chain(self.inputs.iter().map(DetailRow::Pin))
    }

    pub fn row_count(&self) -> usize {
        self.outputs.len() + self.inputs.len()
    }

    pub fn row(&self, idx: usize) -> Option<DetailRow<'_>> {
        self.rows().nth(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailRow, GraphView};
    use crate::model::{NodeDetail, NodeLabel, PinConnection, PinRef, StreamLabel, StreamRef};
    use crate::selection::SelectionAction;
    use crate::ui::GraphState;

    fn passthrough() -> NodeDetail {
        NodeDetail {
            name: "passthrough".to_owned(),
            output: vec![StreamRef { name: "out".to_owned(), type_name: "int".to_owned() }],
            input: vec![PinRef {
                name: "in".to_owned(),
                type_name: "int".to_owned(),
                connection: Some(PinConnection {
                    node: "producer".to_owned(),
                    stream: "out".to_owned(),
                }),
            }],
        }
    }

    #[test]
    fn only_the_selected_node_is_marked() {
        let mut state = GraphState::default();
        state.apply_node_list(vec!["A".to_owned(), "B".to_owned(), "C".to_owned()]);
        state.dispatch(SelectionAction::ToggleNode(NodeLabel::new("A").unwrap()));
        state.dispatch(SelectionAction::ToggleNode(NodeLabel::new("B").unwrap()));

        let view = GraphView::build(&state);
        let marked = view.node_list.iter().filter(|entry| entry.marked).collect::<Vec<_>>();
        assert_eq!(marked.len(), 1);
        assert_eq!(view.marked_node().map(|e| e.label.as_str()), Some("B"));
    }

    #[test]
    fn deselecting_unmarks_everything() {
        let mut state = GraphState::default();
        state.apply_node_list(vec!["A".to_owned()]);
        state.dispatch(SelectionAction::ToggleNode(NodeLabel::new("A").unwrap()));
        state.dispatch(SelectionAction::ToggleNode(NodeLabel::new("A").unwrap()));

        let view = GraphView::build(&state);
        assert!(view.marked_node().is_none());
        assert_eq!(view.properties_target, "");
    }

    #[test]
    fn detail_rows_list_outputs_before_inputs() {
        let mut state = GraphState::default();
        state.dispatch(SelectionAction::ToggleNode(NodeLabel::new("passthrough").unwrap()));
        state.dispatch(SelectionAction::SelectStream(StreamLabel::new("out").unwrap()));
        state.apply_node(passthrough());

        let view = GraphView::build(&state);
        let detail = view.detail.as_ref().expect("detail");
        assert_eq!(detail.header, "passthrough");
        assert_eq!(detail.row_count(), 2);
        assert!(matches!(detail.row(0), Some(DetailRow::Stream(row)) if row.selected));
        assert!(matches!(detail.row(1), Some(DetailRow::Pin(row)) if !row.selected));
        assert_eq!(view.properties_target, "/node/passthrough/stream/out");
    }

    #[test]
    fn property_values_are_coerced_for_display() {
        let mut state = GraphState::default();
        state.apply_properties(vec![crate::model::PropertyEntry::new(
            "Running",
            "bool",
            serde_json::Value::Bool(false),
        )]);

        let view = GraphView::build(&state);
        assert_eq!(view.properties[0].value, "false");
    }
}
