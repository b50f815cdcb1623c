// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The UI thread owns all state. Fetches run as tasks on the tokio runtime and report back
//! over a channel; replies are applied on the UI thread between frames, and only if they
//! answer the most recent request of their kind.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::client::{FetchResult, GraphClient, RequestKind, RequestSeq, RequestTracker};
use crate::model::{NodeDetail, NodeLabel, PinLabel, PropertyEntry, StreamLabel};
use crate::selection::{Effect, SelectionAction};
use crate::ui::GraphState;
use crate::view::text::{sanitize_terminal, truncate_with_ellipsis};
use crate::view::{DetailRow, GraphView};

const FOCUS_COLOR: Color = Color::LightGreen;
const STATUS_ERROR_COLOR: Color = Color::LightRed;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "mgnav ";
const TOAST_TTL: Duration = Duration::from_secs(3);
const EVENT_POLL: Duration = Duration::from_millis(100);

/// Startup parameters for [`run`].
#[derive(Debug, Clone, Default)]
pub struct TuiOptions {
    /// Backend base URL, used for `y` (yank) and the help overlay.
    pub base_url: String,
    /// Re-fetch the properties on this interval.
    pub refresh: Option<Duration>,
    /// Replayed through the reducer before the first fetch.
    pub initial_actions: Vec<SelectionAction>,
}

/// Runs the interactive terminal UI until the user quits.
///
/// Blocks the calling thread; fetch tasks are spawned onto `runtime`, so call this from a
/// blocking context (e.g. `spawn_blocking`) while the runtime keeps running.
pub fn run(
    client: GraphClient,
    options: TuiOptions,
    runtime: Handle,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResponse>();
    let mut app = App::new(options);
    app.start();

    while !app.should_quit {
        for request in app.take_requests() {
            spawn_fetch(&runtime, client.clone(), request, tx.clone());
        }
        while let Ok(response) = rx.try_recv() {
            app.apply_response(response);
        }
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(EVENT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn spawn_fetch(
    runtime: &Handle,
    client: GraphClient,
    request: FetchRequest,
    tx: UnboundedSender<FetchResponse>,
) {
    runtime.spawn(async move {
        let response = perform(&client, request).await;
        // The UI may already be gone; nothing to deliver to then.
        let _ = tx.send(response);
    });
}

/// What a queued request asks the backend for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FetchTarget {
    NodeList,
    Properties { path: String },
    Node { node: NodeLabel },
}

impl FetchTarget {
    fn kind(&self) -> RequestKind {
        match self {
            Self::NodeList => RequestKind::NodeList,
            Self::Properties { .. } => RequestKind::Properties,
            Self::Node { .. } => RequestKind::Node,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchRequest {
    pub(crate) seq: RequestSeq,
    pub(crate) target: FetchTarget,
}

#[derive(Debug)]
pub(crate) enum FetchOutcome {
    NodeList(FetchResult<Vec<String>>),
    Properties {
        path: String,
        result: FetchResult<Vec<PropertyEntry>>,
    },
    Node {
        node: NodeLabel,
        result: FetchResult<NodeDetail>,
    },
}

impl FetchOutcome {
    fn kind(&self) -> RequestKind {
        match self {
            Self::NodeList(_) => RequestKind::NodeList,
            Self::Properties { .. } => RequestKind::Properties,
            Self::Node { .. } => RequestKind::Node,
        }
    }
}

#[derive(Debug)]
pub(crate) struct FetchResponse {
    pub(crate) seq: RequestSeq,
    pub(crate) outcome: FetchOutcome,
}

pub(crate) async fn perform(client: &GraphClient, request: FetchRequest) -> FetchResponse {
    let FetchRequest { seq, target } = request;
    let outcome = match target {
        FetchTarget::NodeList => FetchOutcome::NodeList(client.fetch_node_list().await),
        FetchTarget::Properties { path } => {
            let result = client.fetch_properties(&path).await;
            FetchOutcome::Properties { path, result }
        }
        FetchTarget::Node { node } => {
            let result = client.fetch_node(&node).await;
            FetchOutcome::Node { node, result }
        }
    };
    FetchResponse { seq, outcome }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    app.sync_view();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let compact = stack_panes_vertically(main_area);
    let panes = Layout::default()
        .direction(if compact { Direction::Vertical } else { Direction::Horizontal })
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_area);
    let nodes_area = panes[0];
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(panes[1]);
    let detail_area = right[0];
    let props_area = right[1];

    draw_nodes(frame, app, nodes_area);
    draw_detail(frame, app, detail_area);
    draw_properties(frame, app, props_area);

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    let status = Paragraph::new(footer_help_line(app, &toast_suffix, compact));
    frame.render_widget(status, status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn draw_nodes(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let label_width = usize::from(area.width.saturating_sub(4));
    let any_marked = app.view.marked_node().is_some();
    let marker_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let items = app
        .view
        .node_list
        .iter()
        .map(|entry| {
            let marker = if entry.marked { "◼" } else { "◻" };
            let label = truncate_with_ellipsis(&sanitize_terminal(&entry.label), label_width);
            ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::raw(" "),
                Span::styled(label, node_entry_style(entry.marked, any_marked)),
            ]))
        })
        .collect::<Vec<_>>();

    let count = format!("({})", app.view.node_list.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Nodes", '1', Some(&count)))
                .border_style(panel_border_style_for_focus(app.focus, Focus::Nodes)),
        )
        .highlight_style(cursor_highlight_style(app.focus, Focus::Nodes));
    frame.render_stateful_widget(list, area, &mut app.nodes_state);
}

fn draw_detail(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let header = app
        .view
        .detail
        .as_ref()
        .map(|detail| format!("— {}", sanitize_terminal(&detail.header)));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Node", '2', header.as_deref()))
        .border_style(panel_border_style_for_focus(app.focus, Focus::Detail));

    let Some(detail) = app.view.detail.as_ref() else {
        let hint = if app.state.selection().node().is_some() {
            "Loading…"
        } else {
            "No node selected"
        };
        let empty = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)).block(block);
        frame.render_widget(empty, area);
        return;
    };

    let text_width = usize::from(area.width.saturating_sub(4));
    let items = detail
        .rows()
        .map(|row| {
            let (direction, name, type_name, selected, connection) = match row {
                DetailRow::Stream(stream) => {
                    ("out", &stream.name, &stream.type_name, stream.selected, None)
                }
                DetailRow::Pin(pin) => (
                    "in ",
                    &pin.name,
                    &pin.type_name,
                    pin.selected,
                    pin.connection.as_ref(),
                ),
            };
            let mut text = format!(
                "{direction} {} : {}",
                sanitize_terminal(name),
                sanitize_terminal(type_name)
            );
            if let Some(connection) = connection {
                text.push_str(&format!(
                    " ← {}.{}",
                    sanitize_terminal(&connection.node),
                    sanitize_terminal(&connection.stream)
                ));
            }
            let marker = if selected { "◼ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(truncate_with_ellipsis(&text, text_width.saturating_sub(2))),
            ]))
            .style(detail_row_style(selected))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(block)
        .highlight_style(cursor_highlight_style(app.focus, Focus::Detail));
    frame.render_stateful_widget(list, area, &mut app.detail_state);
}

fn draw_properties(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let target = if app.view.properties_target.is_empty() {
        "— graph".to_owned()
    } else {
        format!("— {}", sanitize_terminal(&app.view.properties_target))
    };
    let rows = app
        .view
        .properties
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(sanitize_terminal(&row.name).into_owned()),
                Cell::from(sanitize_terminal(&row.type_name).into_owned())
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(sanitize_terminal(&row.value).into_owned()),
            ])
        })
        .collect::<Vec<_>>();
    let table = Table::new(
        rows,
        [Constraint::Percentage(35), Constraint::Length(8), Constraint::Min(0)],
    )
    .header(
        Row::new(vec!["name", "type", "value"]).style(Style::default().fg(FOOTER_LABEL_COLOR)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(view_title("Properties", '3', Some(&target))),
    );
    frame.render_widget(table, area);
}

// Extracted panel/header/footer/help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    state: GraphState,
    view: GraphView,
    view_rev: Option<u64>,
    base_url: String,
    focus: Focus,
    nodes_state: ListState,
    detail_state: ListState,
    tracker: RequestTracker,
    pending: Vec<FetchRequest>,
    refresh: Option<Duration>,
    next_refresh: Option<Instant>,
    initial_actions: Vec<SelectionAction>,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(options: TuiOptions) -> Self {
        let state = GraphState::default();
        let view = GraphView::build(&state);
        Self {
            state,
            view,
            view_rev: None,
            base_url: options.base_url,
            focus: Focus::Nodes,
            nodes_state: ListState::default(),
            detail_state: ListState::default(),
            tracker: RequestTracker::default(),
            pending: Vec::new(),
            refresh: options.refresh,
            next_refresh: None,
            initial_actions: options.initial_actions,
            show_help: false,
            toast: None,
            should_quit: false,
        }
    }

    /// Applies the initial selection and queues the startup fetches.
    fn start(&mut self) {
        let mut wants_node = false;
        for action in std::mem::take(&mut self.initial_actions) {
            wants_node |= self.state.dispatch(action).contains(&Effect::FetchNode);
        }

        self.fetch_node_list();
        self.fetch_properties();
        if wants_node {
            self.fetch_node();
        }
        self.next_refresh = self.refresh.map(|interval| Instant::now() + interval);
    }

    fn queue(&mut self, target: FetchTarget) {
        let seq = self.tracker.issue(target.kind());
        tracing::debug!(seq = seq.get(), ?target, "request queued");
        self.pending.push(FetchRequest { seq, target });
    }

    fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending)
    }

    fn fetch_node_list(&mut self) {
        self.queue(FetchTarget::NodeList);
    }

    fn fetch_properties(&mut self) {
        let path = self.state.selection().properties_path();
        self.queue(FetchTarget::Properties { path });
    }

    /// With no node selected the detail is cleared locally and nothing is requested; any
    /// in-flight node reply is invalidated so it cannot bring the old detail back.
    fn fetch_node(&mut self) {
        match self.state.selection().node().cloned() {
            Some(node) => self.queue(FetchTarget::Node { node }),
            None => {
                self.tracker.supersede(RequestKind::Node);
                self.state.clear_node();
            }
        }
    }

    fn dispatch(&mut self, action: SelectionAction) {
        for effect in self.state.dispatch(action) {
            match effect {
                Effect::FetchProperties => self.fetch_properties(),
                Effect::FetchNode => self.fetch_node(),
            }
        }
    }

    fn reload(&mut self) {
        self.fetch_node_list();
        self.fetch_properties();
        self.fetch_node();
        self.set_toast("Reloading");
    }

    fn apply_response(&mut self, response: FetchResponse) {
        let kind = response.outcome.kind();
        if !self.tracker.is_current(kind, response.seq) {
            tracing::debug!(seq = response.seq.get(), ?kind, "stale reply dropped");
            return;
        }

        match response.outcome {
            FetchOutcome::NodeList(Ok(Some(labels))) => self.state.apply_node_list(labels),
            FetchOutcome::NodeList(Ok(None)) => {}
            FetchOutcome::NodeList(Err(err)) => {
                tracing::warn!(error = %err, "node list fetch failed");
                self.state.node_list_failed(&err);
            }
            FetchOutcome::Properties { result: Ok(Some(properties)), .. } => {
                self.state.apply_properties(properties);
            }
            FetchOutcome::Properties { result: Ok(None), .. } => {}
            FetchOutcome::Properties { path, result: Err(err) } => {
                tracing::warn!(error = %err, "properties fetch failed");
                self.state.properties_failed(&path, &err);
            }
            FetchOutcome::Node { result: Ok(Some(detail)), .. } => self.state.apply_node(detail),
            FetchOutcome::Node { result: Ok(None), .. } => {}
            FetchOutcome::Node { node, result: Err(err) } => {
                tracing::warn!(error = %err, "node fetch failed");
                self.state.node_failed(node.as_str(), &err);
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }

        let (Some(interval), Some(due)) = (self.refresh, self.next_refresh) else {
            return;
        };
        if now >= due {
            self.fetch_properties();
            self.next_refresh = Some(now + interval);
        }
    }

    /// Rebuilds the view tree when the state changed and keeps the cursors in range.
    fn sync_view(&mut self) {
        if self.view_rev != Some(self.state.rev()) {
            self.view = GraphView::build(&self.state);
            self.view_rev = Some(self.state.rev());
        }

        clamp_cursor(&mut self.nodes_state, self.view.node_list.len());
        let rows = self.view.detail.as_ref().map_or(0, |detail| detail.row_count());
        clamp_cursor(&mut self.detail_state, rows);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        self.sync_view();

        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Home => self.cursor_state().select(Some(0)),
            KeyCode::End => self.cursor_state().select(Some(usize::MAX)),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('y') => self.yank_properties_url(),
            _ => {}
        }

        self.sync_view();
        false
    }

    fn cursor_state(&mut self) -> &mut ListState {
        match self.focus {
            Focus::Nodes => &mut self.nodes_state,
            Focus::Detail => &mut self.detail_state,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = match self.focus {
            Focus::Nodes => self.view.node_list.len(),
            Focus::Detail => self.view.detail.as_ref().map_or(0, |detail| detail.row_count()),
        };
        if len == 0 {
            return;
        }
        let state = self.cursor_state();
        let current = state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        state.select(Some(next));
    }

    fn activate(&mut self) {
        let action = match self.focus {
            Focus::Nodes => {
                let Some(entry) = self
                    .nodes_state
                    .selected()
                    .and_then(|idx| self.view.node_list.get(idx))
                else {
                    return;
                };
                match NodeLabel::new(entry.label.clone()) {
                    Ok(node) => SelectionAction::ToggleNode(node),
                    Err(err) => {
                        let message = format!("Cannot select node: {err}");
                        self.set_toast(message);
                        return;
                    }
                }
            }
            Focus::Detail => {
                let Some(row) = self
                    .view
                    .detail
                    .as_ref()
                    .zip(self.detail_state.selected())
                    .and_then(|(detail, idx)| detail.row(idx))
                else {
                    return;
                };
                let action = match row {
                    DetailRow::Stream(stream) => {
                        StreamLabel::new(stream.name.clone()).map(SelectionAction::SelectStream)
                    }
                    DetailRow::Pin(pin) => {
                        PinLabel::new(pin.name.clone()).map(SelectionAction::SelectPin)
                    }
                };
                match action {
                    Ok(action) => action,
                    Err(err) => {
                        self.set_toast(format!("Cannot select row: {err}"));
                        return;
                    }
                }
            }
        };
        self.dispatch(action);
    }

    fn properties_url(&self) -> String {
        format!("{}{}", self.base_url, self.state.selection().properties_path())
    }

    fn yank_properties_url(&mut self) {
        let url = self.properties_url();
        match copy_to_clipboard(&url) {
            Ok(backend) => self.set_toast(format!("Yanked properties URL ({backend})")),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

fn clamp_cursor(state: &mut ListState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(idx), len) if idx >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
