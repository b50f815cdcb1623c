// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection state machine.
//!
//! The selection is a plain value; [`reduce`] maps `(selection, action)` to the next selection
//! plus the fetches the caller has to issue. Nothing in here touches the network or the view.

use crate::model::{NodeLabel, PinLabel, StreamLabel};

/// What the user is currently looking at.
///
/// At most one of pin/stream is set, and neither is set without a node. Both invariants are
/// maintained by [`reduce`]; the fields are private so nothing else can break them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    node: Option<NodeLabel>,
    pin: Option<PinLabel>,
    stream: Option<StreamLabel>,
}

impl Selection {
    pub fn node(&self) -> Option<&NodeLabel> {
        self.node.as_ref()
    }

    pub fn pin(&self) -> Option<&PinLabel> {
        self.pin.as_ref()
    }

    pub fn stream(&self) -> Option<&StreamLabel> {
        self.stream.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none() && self.pin.is_none() && self.stream.is_none()
    }

    pub fn is_node_selected(&self, label: &str) -> bool {
        self.node.as_ref().is_some_and(|node| node.as_str() == label)
    }

    /// Path of the selected element, without the trailing `/props`.
    ///
    /// Pin wins over stream if both were ever set.
    pub fn element_path(&self) -> String {
        let mut path = String::new();
        if let Some(node) = &self.node {
            path.push_str("/node/");
            path.push_str(node.as_str());
        }
        if let Some(pin) = &self.pin {
            path.push_str("/pin/");
            path.push_str(pin.as_str());
        } else if let Some(stream) = &self.stream {
            path.push_str("/stream/");
            path.push_str(stream.as_str());
        }
        path
    }

    /// Route of the property listing for the current selection.
    pub fn properties_path(&self) -> String {
        let mut path = self.element_path();
        path.push_str("/props");
        path
    }
}

/// Route of a node detail reply.
pub fn node_path(node: &NodeLabel) -> String {
    format!("/node/{node}")
}

/// User intent, as dispatched by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// Activate a node list entry: selects it, or deselects everything if already selected.
    ToggleNode(NodeLabel),
    /// Activate an input pin row of the node detail view.
    SelectPin(PinLabel),
    /// Activate an output stream row of the node detail view.
    SelectStream(StreamLabel),
}

/// A fetch the caller must issue after applying a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchProperties,
    /// Fetch the selected node's detail, or clear the detail view if no node is selected.
    FetchNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub selection: Selection,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(selection: Selection) -> Self {
        Self {
            selection,
            effects: Vec::new(),
        }
    }
}

pub fn reduce(selection: Selection, action: SelectionAction) -> Transition {
    match action {
        SelectionAction::ToggleNode(label) => {
            let node = if selection.node.as_ref() == Some(&label) {
                None
            } else {
                Some(label)
            };
            Transition {
                selection: Selection {
                    node,
                    pin: None,
                    stream: None,
                },
                effects: vec![Effect::FetchProperties, Effect::FetchNode],
            }
        }
        SelectionAction::SelectPin(pin) => {
            if selection.node.is_none() {
                return Transition::unchanged(selection);
            }
            Transition {
                selection: Selection {
                    pin: Some(pin),
                    stream: None,
                    ..selection
                },
                effects: vec![Effect::FetchProperties],
            }
        }
        SelectionAction::SelectStream(stream) => {
            if selection.node.is_none() {
                return Transition::unchanged(selection);
            }
            Transition {
                selection: Selection {
                    pin: None,
                    stream: Some(stream),
                    ..selection
                },
                effects: vec![Effect::FetchProperties],
            }
        }
    }
}
