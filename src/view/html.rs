// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTML rendering of a [`GraphView`], using the element ids and class names of the graph
//! server's bundled web page (`#nodeList`, `#props`, `#node`, `#motd`) so its stylesheet
//! applies unchanged.

use std::fmt::Write as _;

use super::text::escape_html;
use super::GraphView;

pub fn render_html(view: &GraphView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_page(&mut out, view);
    out
}

fn write_page(out: &mut String, view: &GraphView) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head><meta charset=\"utf-8\"><title>media graph</title></head>")?;
    writeln!(out, "<body>")?;

    write!(out, "<div id=\"motd\">")?;
    if let Some(status) = &view.status {
        write!(out, "{}", escape_html(status))?;
    }
    writeln!(out, "</div>")?;

    writeln!(out, "<div id=\"nodeList\">")?;
    for entry in &view.node_list {
        let class = if entry.marked {
            "node-entry node-entry-selected"
        } else {
            "node-entry"
        };
        writeln!(out, "<span class=\"{class}\">{}</span>", escape_html(&entry.label))?;
    }
    writeln!(out, "</div>")?;

    writeln!(
        out,
        "<div id=\"props\" data-path=\"{}\">",
        escape_html(&view.properties_target)
    )?;
    for row in &view.properties {
        writeln!(
            out,
            "<div class=\"property-row\"><span class=\"property-name\">{}</span><span class=\"property-type\">{}</span><span class=\"property-value\">{}</span></div>",
            escape_html(&row.name),
            escape_html(&row.type_name),
            escape_html(&row.value),
        )?;
    }
    writeln!(out, "</div>")?;

    writeln!(out, "<div id=\"node\">")?;
    if let Some(detail) = &view.detail {
        writeln!(out, "<div class=\"node-header\">{}</div>", escape_html(&detail.header))?;
        for stream in &detail.outputs {
            writeln!(
                out,
                "<div class=\"output-stream-row{}\"><span class=\"output-stream-name\">{}</span><span class=\"output-stream-type\">{}</span></div>",
                if stream.selected { " row-selected" } else { "" },
                escape_html(&stream.name),
                escape_html(&stream.type_name),
            )?;
        }
        for pin in &detail.inputs {
            write!(
                out,
                "<div class=\"input-pin-row{}\"><span class=\"input-pin-name\">{}</span><span class=\"input-pin-type\">{}</span>",
                if pin.selected { " row-selected" } else { "" },
                escape_html(&pin.name),
                escape_html(&pin.type_name),
            )?;
            if let Some(connection) = &pin.connection {
                write!(
                    out,
                    "<span class=\"input-pin-connection-node\">{}</span><span class=\"input-pin-connection-stream\">{}</span>",
                    escape_html(&connection.node),
                    escape_html(&connection.stream),
                )?;
            }
            writeln!(out, "</div>")?;
        }
    }
    writeln!(out, "</div>")?;

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}
