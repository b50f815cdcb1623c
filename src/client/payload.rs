// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reply body decoding.
//!
//! Graph servers answer with one of:
//! - plain JSON,
//! - JSONP (`cb([...])`) when the request carried a `callback` parameter,
//! - script object literals with bare keys (`{name:"out",type:"int"}`), wrapped or not.
//!
//! An empty body, `undefined`, `null`, or an empty JSONP call means "no payload".

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

fn jsonp_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^([A-Za-z_$][A-Za-z0-9_$.]*)\s*\((.*)\)\s*;?$").expect("valid regex")
    })
}

/// Decodes a reply body into `T`, or `None` if the reply carries no payload.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<Option<T>, serde_json::Error> {
    let payload = strip_jsonp(body.trim()).trim();
    if payload.is_empty() || payload == "undefined" {
        return Ok(None);
    }

    let normalized = quote_bare_keys(payload);
    serde_json::from_str::<Option<T>>(&normalized)
}

/// Returns the argument of a JSONP call, or the input unchanged if it isn't one.
pub fn strip_jsonp(body: &str) -> &str {
    match jsonp_call_re().captures(body) {
        Some(caps) => caps.get(2).map_or("", |m| m.as_str()),
        None => body,
    }
}

/// Rewrites `{name:"x"}` into `{"name":"x"}`.
///
/// An identifier directly after `{` or `,` (outside string literals) that is followed by `:`
/// is an object key. Bare `true`/`false`/`null` in arrays are never followed by `:` and pass
/// through.
pub fn quote_bare_keys(input: &str) -> String {
    let chars = input.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(input.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut after_key_opener = false;
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];

        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            idx += 1;
            continue;
        }

        if after_key_opener && is_ident_start(ch) {
            let start = idx;
            while idx < chars.len() && is_ident_continue(chars[idx]) {
                idx += 1;
            }
            let ident = chars[start..idx].iter().collect::<String>();
            let mut lookahead = idx;
            while lookahead < chars.len() && chars[lookahead].is_whitespace() {
                lookahead += 1;
            }
            if chars.get(lookahead) == Some(&':') {
                out.push('"');
                out.push_str(&ident);
                out.push('"');
            } else {
                out.push_str(&ident);
            }
            after_key_opener = false;
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                after_key_opener = false;
            }
            '{' | ',' => after_key_opener = true,
            c if c.is_whitespace() => {}
            _ => after_key_opener = false,
        }
        out.push(ch);
        idx += 1;
    }

    out
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}
