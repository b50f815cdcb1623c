// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Layout, title, footer, help, and style helpers for the TUI. Pulled into `tui` with
// `include!`, so everything here shares that module's scope.

/// Panel that receives cursor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Nodes,
    Detail,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Nodes => Self::Detail,
            Self::Detail => Self::Nodes,
        }
    }

    fn cycle_back(self) -> Self {
        // Two panels: backwards and forwards coincide.
        self.cycle()
    }
}

fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

fn panel_border_style_for_focus(active: Focus, panel: Focus) -> Style {
    if active != panel {
        return Style::default();
    }

    Style::default().fg(FOCUS_COLOR)
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn node_entry_style(marked: bool, any_marked: bool) -> Style {
    if marked {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else if any_marked {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White)
    }
}

fn detail_row_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn cursor_highlight_style(focus: Focus, panel: Focus) -> Style {
    if focus == panel {
        Style::default().fg(Color::Black).bg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn footer_help_line(app: &App, toast_suffix: &str, compact: bool) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    if let Some(status) = app.state.status() {
        spans.push(Span::styled(
            sanitize_terminal(status).into_owned(),
            Style::default().fg(STATUS_ERROR_COLOR).add_modifier(Modifier::BOLD),
        ));
    }

    if compact {
        push_footer_entry_with_separator(&mut spans, "FOCUS", "⇥", " | ");
        push_footer_entry_with_separator(&mut spans, "HELP", "?", " | ");
        push_footer_entry_with_separator(&mut spans, "QUIT", "q", " | ");
    } else {
        match app.focus {
            Focus::Nodes => {
                push_footer_entry(&mut spans, "TOGGLE", "⏎");
                push_footer_entry(&mut spans, "MOVE", "jk");
            }
            Focus::Detail => {
                let enabled = app.view.detail.as_ref().is_some_and(|d| d.row_count() > 0);
                push_footer_entry_maybe_disabled(&mut spans, "SELECT", "⏎", !enabled);
                push_footer_entry_maybe_disabled(&mut spans, "MOVE", "jk", !enabled);
            }
        }
        push_footer_entry(&mut spans, "FOCUS", "⇥");
        push_footer_entry(&mut spans, "RELOAD", "r");
        push_footer_entry(&mut spans, "YANK", "y");
        push_footer_entry(&mut spans, "HELP", "?");
        push_footer_entry(&mut spans, "QUIT", "q");
    }

    if !toast_suffix.is_empty() {
        spans.push(Span::styled(toast_suffix.to_owned(), Style::default().fg(Color::White)));
    }

    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let area = centered_rect(70, 70, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let dim_style = Style::default().fg(Color::DarkGray);

    let keys: [(&str, &str); 7] = [
        ("?", "Help (toggle)"),
        ("q/Esc", "Quit"),
        ("Tab/Shift-Tab", "Focus next/previous panel"),
        ("j/k, ↑/↓", "Move cursor"),
        ("Enter/Space", "Toggle node, select stream or pin"),
        ("r", "Reload node list, properties and node"),
        ("y", "Yank properties URL (OSC 52)"),
    ];
    let key_col_width = keys.iter().map(|(key, _)| key.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled("--- Keys ---", header_style)));
    for (key, desc) in keys {
        lines.push(help_kv(key, desc, key_col_width, key_style));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("--- Backend ---", header_style)));
    lines.push(Line::from(vec![
        Span::styled("url   ", dim_style),
        Span::raw(sanitize_terminal(&app.base_url).into_owned()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("props ", dim_style),
        Span::raw(sanitize_terminal(&app.state.selection().properties_path()).into_owned()),
    ]));
    if let Some(interval) = app.refresh {
        lines.push(Line::from(vec![
            Span::styled("poll  ", dim_style),
            Span::raw(format!("every {} ms", interval.as_millis())),
        ]));
    }

    let help = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Help", '?', None))
                .border_style(Style::default().fg(FOCUS_COLOR)),
        );
    frame.render_widget(help, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, " | ", disabled);
}

fn push_footer_entry_with_separator(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, separator, false);
}

fn push_footer_entry_with_separator_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            separator.to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled {
        Color::DarkGray
    } else {
        FOOTER_KEY_COLOR
    };
    vec![Span::styled(
        value.to_owned(),
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD),
    )]
}
