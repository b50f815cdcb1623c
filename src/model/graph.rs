// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of a property listing (`/props`, `/node/<n>/props`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// `None` when the reply omitted the key; an explicit `null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl PropertyEntry {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value: Some(value),
        }
    }

    pub fn display_value(&self) -> String {
        match &self.value {
            Some(value) => display_value(value),
            None => "undefined".to_owned(),
        }
    }
}

/// An output stream as listed in a node detail reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// The output a pin reads from. Only ever displayed, never followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinConnection {
    pub node: String,
    pub stream: String,
}

/// An input pin as listed in a node detail reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<PinConnection>,
}

/// Reply of `/node/<node>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDetail {
    pub name: String,
    #[serde(default)]
    pub output: Vec<StreamRef>,
    #[serde(default)]
    pub input: Vec<PinRef>,
}

/// Renders a property value the way a browser's `String(value)` would.
///
/// Numbers print in shortest form (`3`, not `3.0`, `1e+21` past the fixed-notation range),
/// arrays are joined with `,` (with `null` members rendered empty), and objects collapse to
/// `[object Object]`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                number.as_f64().map(display_float).unwrap_or_default()
            }
        }
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn display_float(float: f64) -> String {
    let magnitude = float.abs();
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let exponential = format!("{float:e}");
        match exponential.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => exponential,
        }
    } else {
        float.to_string()
    }
}
