// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side state: the selection plus the last reply applied to each region.
//!
//! Every `apply_*` replaces its region wholesale, so a region never mixes entries from two
//! replies. `rev` bumps on every change so renderers can skip redundant work.
//!
//! The status line remembers which region failed. Only a later success for that same region
//! clears it; a success elsewhere leaves the error on screen.

use crate::client::FetchError;
use crate::model::{NodeDetail, PropertyEntry};
use crate::selection::{reduce, Effect, Selection, SelectionAction};

pub const NODE_LIST_ERROR: &str = "Error getting node list";

/// Region a fetch reply belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    NodeList,
    Properties,
    Node,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphState {
    rev: u64,
    selection: Selection,
    node_list: Vec<String>,
    properties: Vec<PropertyEntry>,
    node: Option<NodeDetail>,
    status: Option<(Region, String)>,
}

impl GraphState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn node_list(&self) -> &[String] {
        &self.node_list
    }

    pub fn properties(&self) -> &[PropertyEntry] {
        &self.properties
    }

    pub fn node(&self) -> Option<&NodeDetail> {
        self.node.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(_, message)| message.as_str())
    }

    /// Region whose failure produced the current status line.
    pub fn status_region(&self) -> Option<Region> {
        self.status.as_ref().map(|(region, _)| *region)
    }

    /// Runs `action` through the reducer and returns the fetches to issue.
    ///
    /// Fetched regions are left alone; they change only when replies arrive.
    pub fn dispatch(&mut self, action: SelectionAction) -> Vec<Effect> {
        let transition = reduce(self.selection.clone(), action);
        if transition.selection != self.selection {
            self.selection = transition.selection;
            self.bump();
        }
        transition.effects
    }

    pub fn apply_node_list(&mut self, labels: Vec<String>) {
        self.node_list = labels;
        self.clear_status(Region::NodeList);
        self.bump();
    }

    pub fn apply_properties(&mut self, properties: Vec<PropertyEntry>) {
        self.properties = properties;
        self.clear_status(Region::Properties);
        self.bump();
    }

    pub fn apply_node(&mut self, node: NodeDetail) {
        self.node = Some(node);
        self.clear_status(Region::Node);
        self.bump();
    }

    /// Empties the node detail region without a fetch (no node selected).
    pub fn clear_node(&mut self) {
        if self.node.take().is_some() {
            self.bump();
        }
    }

    pub fn node_list_failed(&mut self, _err: &FetchError) {
        self.set_status(Region::NodeList, NODE_LIST_ERROR);
    }

    pub fn properties_failed(&mut self, path: &str, err: &FetchError) {
        self.set_status(
            Region::Properties,
            format!(
                "Error getting properties for {}:{}",
                path.strip_suffix("/props").unwrap_or(path),
                err.status_text()
            ),
        );
    }

    pub fn node_failed(&mut self, node: &str, _err: &FetchError) {
        self.set_status(Region::Node, format!("Error getting node {node}"));
    }

    fn set_status(&mut self, region: Region, message: impl Into<String>) {
        self.status = Some((region, message.into()));
        self.bump();
    }

    fn clear_status(&mut self, region: Region) {
        if self.status_region() == Some(region) {
            self.status = None;
        }
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphState, Region, NODE_LIST_ERROR};
    use crate::client::FetchError;
    use crate::model::{NodeDetail, NodeLabel, PinLabel, PropertyEntry};
    use crate::selection::{Effect, SelectionAction};

    fn not_found(path: &str) -> FetchError {
        FetchError::Status {
            path: path.to_owned(),
            status: 404,
            reason: "Not Found".to_owned(),
        }
    }

    #[test]
    fn apply_replaces_regions_wholesale() {
        let mut state = GraphState::default();
        state.apply_node_list(vec!["a".to_owned(), "b".to_owned()]);
        state.apply_node_list(vec!["c".to_owned()]);
        assert_eq!(state.node_list(), ["c".to_owned()]);

        state.apply_properties(vec![PropertyEntry::new("x", "int", 1.into())]);
        state.apply_properties(Vec::new());
        assert!(state.properties().is_empty());
    }

    #[test]
    fn property_failure_message_names_the_element_path() {
        let mut state = GraphState::default();
        state.properties_failed("/node/n/pin/p/props", &not_found("/node/n/pin/p/props"));
        assert_eq!(state.status(), Some("Error getting properties for /node/n/pin/p:Not Found"));

        state.properties_failed("/props", &not_found("/props"));
        assert_eq!(state.status(), Some("Error getting properties for :Not Found"));
    }

    #[test]
    fn fixed_messages_for_node_list_and_node() {
        let mut state = GraphState::default();
        state.node_list_failed(&FetchError::transport("/nodeList", "refused"));
        assert_eq!(state.status(), Some(NODE_LIST_ERROR));

        state.node_failed("producer", &not_found("/node/producer"));
        assert_eq!(state.status(), Some("Error getting node producer"));
    }

    fn detail(name: &str) -> NodeDetail {
        NodeDetail {
            name: name.to_owned(),
            output: Vec::new(),
            input: Vec::new(),
        }
    }

    #[test]
    fn success_of_the_failed_region_clears_the_status_line() {
        let mut state = GraphState::default();
        state.node_failed("n", &not_found("/node/n"));
        assert_eq!(state.status_region(), Some(Region::Node));

        state.apply_node(detail("n"));
        assert_eq!(state.status(), None);
    }

    #[test]
    fn success_of_another_region_keeps_the_error() {
        let mut state = GraphState::default();
        state.properties_failed("/node/n/props", &not_found("/node/n/props"));
        state.apply_node(detail("n"));
        state.apply_node_list(vec!["n".to_owned()]);

        assert_eq!(state.status(), Some("Error getting properties for /node/n:Not Found"));
        assert_eq!(state.status_region(), Some(Region::Properties));
    }

    #[test]
    fn failures_do_not_roll_back_the_selection() {
        let mut state = GraphState::default();
        state.dispatch(SelectionAction::ToggleNode(NodeLabel::new("n").unwrap()));
        state.dispatch(SelectionAction::SelectPin(PinLabel::new("p").unwrap()));
        state.properties_failed("/node/n/pin/p/props", &not_found("/node/n/pin/p/props"));

        assert_eq!(state.selection().properties_path(), "/node/n/pin/p/props");
    }

    #[test]
    fn dispatch_bumps_rev_only_on_change() {
        let mut state = GraphState::default();
        let rev = state.rev();
        let effects = state.dispatch(SelectionAction::SelectPin(PinLabel::new("p").unwrap()));
        assert!(effects.is_empty());
        assert_eq!(state.rev(), rev);

        let effects = state.dispatch(SelectionAction::ToggleNode(NodeLabel::new("n").unwrap()));
        assert_eq!(effects, vec![Effect::FetchProperties, Effect::FetchNode]);
        assert_ne!(state.rev(), rev);
    }

    #[test]
    fn clear_node_is_idempotent() {
        let mut state = GraphState::default();
        state.clear_node();
        let rev = state.rev();
        state.clear_node();
        assert_eq!(state.rev(), rev);
        assert!(state.node().is_none());
    }
}
