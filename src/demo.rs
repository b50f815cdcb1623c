// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo backend.
//!
//! Serves the graph HTTP routes over a small in-memory graph (`producer.out -> passthrough.in`)
//! so the client can be exercised without a running media pipeline.
//!
//! Objects go out the way the graph server writes them, with bare keys
//! (`{name:"out",type:"int"}`), so the client's lenient decoder sees the real wire form.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::model::{NodeDetail, PinConnection, PinRef, PropertyEntry, StreamRef};

const SCRIPT_CONTENT_TYPE: &str = "application/x-javascript";
const TEXT_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug)]
pub struct DemoGraph {
    nodes: Vec<DemoNode>,
    updates: AtomicI64,
}

#[derive(Debug, Clone)]
struct DemoNode {
    name: String,
    outputs: Vec<DemoStream>,
    inputs: Vec<DemoPin>,
}

#[derive(Debug, Clone)]
struct DemoStream {
    name: String,
    type_name: String,
    max_queue_size: i64,
}

#[derive(Debug, Clone)]
struct DemoPin {
    name: String,
    type_name: String,
    connection: Option<PinConnection>,
}

/// A reply as the graph server would send it, before HTTP framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl DemoReply {
    fn ok(payload: String, callback: Option<&str>) -> Self {
        let body = match callback.filter(|cb| !cb.is_empty()) {
            Some(cb) => format!("{cb}({payload})"),
            None => payload,
        };
        Self {
            status: StatusCode::OK,
            content_type: SCRIPT_CONTENT_TYPE,
            body,
        }
    }

    fn not_found(reason: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            content_type: TEXT_CONTENT_TYPE,
            body: reason.to_owned(),
        }
    }
}

impl IntoResponse for DemoReply {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

impl Default for DemoGraph {
    fn default() -> Self {
        demo_graph()
    }
}

pub fn demo_graph() -> DemoGraph {
    let int_stream = |name: &str| DemoStream {
        name: name.to_owned(),
        type_name: "int".to_owned(),
        max_queue_size: 16,
    };

    DemoGraph {
        nodes: vec![
            DemoNode {
                name: "producer".to_owned(),
                outputs: vec![int_stream("out")],
                inputs: Vec::new(),
            },
            DemoNode {
                name: "passthrough".to_owned(),
                outputs: vec![int_stream("out")],
                inputs: vec![DemoPin {
                    name: "in".to_owned(),
                    type_name: "int".to_owned(),
                    connection: Some(PinConnection {
                        node: "producer".to_owned(),
                        stream: "out".to_owned(),
                    }),
                }],
            },
        ],
        updates: AtomicI64::new(0),
    }
}

impl DemoGraph {
    fn node(&self, name: &str) -> Option<&DemoNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    fn root_properties(&self) -> Vec<PropertyEntry> {
        vec![
            PropertyEntry::new("Running", "bool", Value::Bool(true)),
            PropertyEntry::new("NumNodes", "int", json!(self.nodes.len())),
            PropertyEntry::new("TargetRate", "float", json!(29.97)),
        ]
    }

    fn node_properties(&self, node: &DemoNode) -> Vec<PropertyEntry> {
        vec![
            PropertyEntry::new("Name", "string", json!(node.name)),
            PropertyEntry::new("NumOutputStreams", "int", json!(node.outputs.len())),
            PropertyEntry::new("NumInputPins", "int", json!(node.inputs.len())),
        ]
    }

    fn stream_properties(&self, stream: &DemoStream) -> Vec<PropertyEntry> {
        // The demo streams "update" once per request served.
        let updates = self.updates.load(Ordering::Relaxed);
        vec![
            PropertyEntry::new("NumUpdates", "int64", json!(updates)),
            PropertyEntry::new("NumItemsInQueue", "int", json!(0)),
            PropertyEntry::new("MaxQueueSize", "int", json!(stream.max_queue_size)),
        ]
    }

    fn pin_properties(&self, pin: &DemoPin) -> Vec<PropertyEntry> {
        vec![PropertyEntry::new("Connected", "bool", Value::Bool(pin.connection.is_some()))]
    }

    fn detail(&self, node: &DemoNode) -> NodeDetail {
        NodeDetail {
            name: node.name.clone(),
            output: node
                .outputs
                .iter()
                .map(|stream| StreamRef {
                    name: stream.name.clone(),
                    type_name: stream.type_name.clone(),
                })
                .collect(),
            input: node
                .inputs
                .iter()
                .map(|pin| PinRef {
                    name: pin.name.clone(),
                    type_name: pin.type_name.clone(),
                    connection: pin.connection.clone(),
                })
                .collect(),
        }
    }

    /// Routes one request path the way the graph server does.
    pub fn respond(&self, path: &str, callback: Option<&str>) -> DemoReply {
        self.updates.fetch_add(1, Ordering::Relaxed);

        let segments = path.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();
        let payload = match segments.as_slice() {
            [] => return DemoReply::not_found("Not found.\r\n"),
            ["nodeList"] => {
                json!(self.nodes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>()).to_string()
            }
            ["props", ..] => properties_body(&self.root_properties()),
            ["node"] => return DemoReply::not_found("Node not specified\r\n"),
            ["node", name, rest @ ..] => {
                let Some(node) = self.node(name) else {
                    return DemoReply::not_found("Node not found.\r\n");
                };
                match rest {
                    [] => detail_body(&self.detail(node)),
                    ["props", ..] => properties_body(&self.node_properties(node)),
                    ["stream"] => return DemoReply::not_found("No stream name given\r\n"),
                    ["stream", stream, ..] => {
                        match node.outputs.iter().find(|s| s.name == *stream) {
                            Some(stream) => properties_body(&self.stream_properties(stream)),
                            None => return DemoReply::not_found(""),
                        }
                    }
                    ["pin"] => return DemoReply::not_found("No pin name given\r\n"),
                    ["pin", pin, ..] => match node.inputs.iter().find(|p| p.name == *pin) {
                        Some(pin) => properties_body(&self.pin_properties(pin)),
                        None => return DemoReply::not_found(""),
                    },
                    _ => return DemoReply::not_found(""),
                }
            }
            _ => return DemoReply::not_found(""),
        };

        DemoReply::ok(payload, callback)
    }
}

fn quoted(text: &str) -> String {
    Value::from(text).to_string()
}

fn properties_body(properties: &[PropertyEntry]) -> String {
    let mut out = String::from("[");
    for (index, entry) in properties.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        let _ = write!(out, "{{name:{},type:{}", quoted(&entry.name), quoted(&entry.type_name));
        if let Some(value) = &entry.value {
            let _ = write!(out, ",value:{value}");
        }
        out.push('}');
    }
    out.push(']');
    out
}

fn detail_body(detail: &NodeDetail) -> String {
    let mut out = String::new();
    let _ = write!(out, "{{name:{},output:[", quoted(&detail.name));
    for (index, stream) in detail.output.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        let _ = write!(out, "{{name:{},type:{}}}", quoted(&stream.name), quoted(&stream.type_name));
    }
    out.push_str("],input:[");
    for (index, pin) in detail.input.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        let _ = write!(out, "{{name:{},type:{}", quoted(&pin.name), quoted(&pin.type_name));
        if let Some(connection) = &pin.connection {
            let _ = write!(
                out,
                ",connection:{{node:{},stream:{}}}",
                quoted(&connection.node),
                quoted(&connection.stream)
            );
        }
        out.push('}');
    }
    out.push_str("]}");
    out
}

async fn handle(
    State(graph): State<Arc<DemoGraph>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> DemoReply {
    let reply = graph.respond(uri.path(), params.get("callback").map(String::as_str));
    tracing::debug!(path = uri.path(), status = reply.status.as_u16(), "demo backend");
    reply
}

pub fn router(graph: Arc<DemoGraph>) -> Router {
    Router::new().fallback(handle).with_state(graph)
}

/// Serves the demo graph on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    graph: Arc<DemoGraph>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(graph)).with_graceful_shutdown(shutdown).await
}
