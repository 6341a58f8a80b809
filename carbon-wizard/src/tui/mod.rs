//! Terminal UI for the carbon footprint wizard.
//!
//! - Centered window titled with the form title
//! - Left panel listing the sections, current one marked
//! - Main panel with the current section's fields and inline errors
//! - Progress gauge on top, notification line and `[ Back ] [ Next ] [ Cancel ]` at the bottom
//! - Cancel confirmation and message modals
//!
//! The controller pushes its state into a [`MemorySurface`]; this module only draws from it.
//! Logging is file-only while the TUI owns the terminal.

use crate::api::results::{HttpResultsClient, ResultsTransport, SubmitError};
use crate::config::WizardConfig;
use crate::models::form::FieldKind;
use crate::models::responses::ResultsResponse;
use crate::wizard::surface::{MemorySurface, NoticeLevel};
use crate::wizard::{
    Step, SubmissionState, SubmitOutcome, WizardController, MSG_SUBMIT_FAILED,
};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{info, warn};
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const SMOKE_WIDTH: u16 = 100;
const SMOKE_HEIGHT: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Form,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Back,
    Next,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Modal {
    ConfirmCancel,
    Message { title: String, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Field(usize),
    Button(ButtonFocus),
}

/// Single-line editor. The cursor counts chars, not bytes.
#[derive(Debug, Clone, Default)]
struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            cursor: value.chars().count(),
            value,
        }
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug)]
enum UiMsg {
    SubmitFinished(Result<ResultsResponse, SubmitError>),
}

struct WizardState {
    page: Page,
    wizard: WizardController,
    surface: MemorySurface,
    config: WizardConfig,
    transport: Arc<dyn ResultsTransport>,
    modal: Option<Modal>,
    focus: FocusTarget,
    /// Focus to restore when the cancel dialog is dismissed.
    focus_before_modal: FocusTarget,
    editor: TextInput,
    /// Resolved redirect shown on the completion page.
    results_url: Option<String>,
    quit: bool,
}

impl WizardState {
    fn new(
        wizard: WizardController,
        config: WizardConfig,
        transport: Arc<dyn ResultsTransport>,
    ) -> Self {
        let mut state = Self {
            page: Page::Form,
            wizard,
            surface: MemorySurface::new(),
            config,
            transport,
            modal: None,
            focus: FocusTarget::Button(ButtonFocus::Next),
            focus_before_modal: FocusTarget::Button(ButtonFocus::Next),
            editor: TextInput::default(),
            results_url: None,
            quit: false,
        };
        state.wizard.render(&mut state.surface);
        reset_focus(&mut state);
        state
    }
}

fn section_field_count(state: &WizardState) -> usize {
    state.wizard.section().fields.len()
}

fn focused_field_name(state: &WizardState) -> Option<String> {
    let FocusTarget::Field(idx) = state.focus else {
        return None;
    };
    state
        .wizard
        .section()
        .fields
        .get(idx)
        .map(|f| f.name().to_string())
}

fn focused_field_kind(state: &WizardState) -> Option<FieldKind> {
    let FocusTarget::Field(idx) = state.focus else {
        return None;
    };
    state.wizard.section().fields.get(idx).map(|f| f.kind())
}

/// Load the focused field's value into the editor.
fn sync_editor(state: &mut WizardState) {
    let value = focused_field_name(state)
        .and_then(|name| state.wizard.value(&name).map(str::to_string))
        .unwrap_or_default();
    state.editor = TextInput::new(value);
}

fn set_focus(state: &mut WizardState, focus: FocusTarget) {
    state.focus = focus;
    sync_editor(state);
}

fn reset_focus(state: &mut WizardState) {
    if section_field_count(state) > 0 {
        set_focus(state, FocusTarget::Field(0));
    } else {
        set_focus(state, FocusTarget::Button(ButtonFocus::Next));
    }
}

fn focus_first_invalid(state: &mut WizardState) {
    let idx = state
        .wizard
        .section()
        .fields
        .iter()
        .position(|f| state.surface.is_invalid(f.name()));
    match idx {
        Some(i) => set_focus(state, FocusTarget::Field(i)),
        None => reset_focus(state),
    }
}

/// Tab order: fields, then the visible buttons.
fn focus_order(state: &WizardState) -> Vec<FocusTarget> {
    let mut order: Vec<FocusTarget> = (0..section_field_count(state))
        .map(FocusTarget::Field)
        .collect();
    if state.surface.back_visible {
        order.push(FocusTarget::Button(ButtonFocus::Back));
    }
    order.push(FocusTarget::Button(ButtonFocus::Next));
    order.push(FocusTarget::Button(ButtonFocus::Cancel));
    order
}

fn move_focus(state: &mut WizardState, forward: bool) {
    let order = focus_order(state);
    let len = order.len();
    let current = order.iter().position(|f| *f == state.focus).unwrap_or(0);
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    set_focus(state, order[next]);
}

fn focused_button(state: &WizardState) -> ButtonFocus {
    match state.focus {
        FocusTarget::Button(b) => b,
        _ => ButtonFocus::Next,
    }
}

fn open_cancel_modal(state: &mut WizardState) {
    state.focus_before_modal = state.focus;
    state.modal = Some(Modal::ConfirmCancel);
    state.focus = FocusTarget::Button(ButtonFocus::Next); // "No"
}

fn dismiss_cancel_modal(state: &mut WizardState) {
    state.modal = None;
    let previous = state.focus_before_modal;
    set_focus(state, previous);
}

fn go_back(state: &mut WizardState) {
    if let Step::Moved(_) = state.wizard.retreat(&mut state.surface) {
        reset_focus(state);
    }
}

fn go_next(state: &mut WizardState, tx: &mpsc::Sender<UiMsg>) {
    match state.wizard.advance(&mut state.surface) {
        Step::Moved(_) => reset_focus(state),
        Step::Blocked => focus_first_invalid(state),
        Step::ReadyToSubmit => start_submission(state, tx),
        Step::AtStart => {}
    }
}

fn start_submission(state: &mut WizardState, tx: &mpsc::Sender<UiMsg>) {
    let payload = match state.wizard.begin_submission(&mut state.surface) {
        Ok(p) => p,
        Err(SubmitOutcome::Invalid { .. }) => {
            focus_first_invalid(state);
            return;
        }
        Err(_) => return,
    };

    let transport = Arc::clone(&state.transport);
    let tx = tx.clone();
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build();
        let result = match rt {
            Ok(rt) => rt.block_on(transport.post_results(&payload)),
            Err(e) => Err(SubmitError::Network(format!(
                "failed to start async runtime: {}",
                e
            ))),
        };
        let _ = tx.send(UiMsg::SubmitFinished(result));
    });
}

fn drain_messages(state: &mut WizardState, rx: &mpsc::Receiver<UiMsg>) {
    while let Ok(msg) = rx.try_recv() {
        apply_message(state, msg);
    }
}

fn apply_message(state: &mut WizardState, msg: UiMsg) {
    match msg {
        UiMsg::SubmitFinished(result) => {
            match state.wizard.finish_submission(result, &mut state.surface) {
                SubmitOutcome::Redirected(target) => {
                    let url = state.config.resolve_redirect(&target);
                    info!("[PHASE: tui] [STEP: complete] Results available at {}", url);
                    state.results_url = Some(url);
                    state.page = Page::Complete;
                }
                SubmitOutcome::Accepted => {
                    // No redirect: stay on the form with the accepted notice showing.
                    state.results_url = None;
                    set_focus(state, FocusTarget::Button(ButtonFocus::Next));
                }
                SubmitOutcome::Failed(e) => {
                    state.modal = Some(Modal::Message {
                        title: "Submission failed".to_string(),
                        body: format!("{}\n\n{}", MSG_SUBMIT_FAILED, e),
                    });
                    set_focus(state, FocusTarget::Button(ButtonFocus::Next));
                }
                SubmitOutcome::Invalid { .. } | SubmitOutcome::AlreadySubmitting => {}
            }
        }
    }
}

fn handle_key(state: &mut WizardState, code: KeyCode, tx: &mpsc::Sender<UiMsg>) {
    if let Some(modal) = state.modal.clone() {
        match modal {
            Modal::ConfirmCancel => match code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    let next = match focused_button(state) {
                        ButtonFocus::Cancel => ButtonFocus::Next,
                        _ => ButtonFocus::Cancel,
                    };
                    state.focus = FocusTarget::Button(next);
                }
                KeyCode::Enter => {
                    if focused_button(state) == ButtonFocus::Cancel {
                        info!("[PHASE: tui] [STEP: cancel] User left the wizard");
                        state.modal = None;
                        state.quit = true;
                    } else {
                        dismiss_cancel_modal(state);
                    }
                }
                KeyCode::Esc => dismiss_cancel_modal(state),
                _ => {}
            },
            Modal::Message { .. } => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                    state.modal = None;
                }
            }
        }
        return;
    }

    if state.page == Page::Complete {
        if matches!(code, KeyCode::Enter | KeyCode::Esc) {
            state.quit = true;
        }
        return;
    }

    if code == KeyCode::Esc {
        open_cancel_modal(state);
        return;
    }

    match focused_field_kind(state) {
        Some(FieldKind::Select) => {
            let step = match code {
                KeyCode::Left => Some(-1),
                KeyCode::Right | KeyCode::Char(' ') => Some(1),
                _ => None,
            };
            if let (Some(step), Some(name)) = (step, focused_field_name(state)) {
                if let Err(e) = state.wizard.cycle_option(&name, step) {
                    warn!("[PHASE: tui] [STEP: edit] {}", e);
                }
                return;
            }
        }
        Some(_) => {
            if state.editor.handle_key(code) {
                if let Some(name) = focused_field_name(state) {
                    if let Err(e) = state.wizard.set_value(&name, state.editor.value.clone()) {
                        warn!("[PHASE: tui] [STEP: edit] {}", e);
                    }
                }
                return;
            }
        }
        None => {}
    }

    match code {
        KeyCode::Tab | KeyCode::Down => move_focus(state, true),
        KeyCode::BackTab | KeyCode::Up => move_focus(state, false),
        KeyCode::Left | KeyCode::Right if matches!(state.focus, FocusTarget::Button(_)) => {
            move_focus(state, code == KeyCode::Right)
        }
        KeyCode::Enter => match state.focus {
            FocusTarget::Field(_) => move_focus(state, true),
            FocusTarget::Button(ButtonFocus::Back) => go_back(state),
            FocusTarget::Button(ButtonFocus::Next) => go_next(state, tx),
            FocusTarget::Button(ButtonFocus::Cancel) => open_cancel_modal(state),
        },
        _ => {}
    }
}

pub fn run(config: WizardConfig) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting TUI wizard");

    let definition = config.load_form()?;
    let wizard = WizardController::from_definition(definition)?;
    let transport: Arc<dyn ResultsTransport> = Arc::new(HttpResultsClient::from_config(&config)?);
    let mut state = WizardState::new(wizard, config, transport);

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut state);
    restore_terminal(&mut terminal)?;

    if let Some(url) = state.results_url.as_deref() {
        println!("Your results: {}", url);
    }
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut WizardState,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let (tx, rx) = mpsc::channel::<UiMsg>();

    while !state.quit {
        drain_messages(state, &rx);
        terminal.draw(|f| draw(f.size(), f, state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(state, key.code, &tx);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Fill every empty text or numeric field with a plausible answer.
fn seed_sample_answers(wizard: &mut WizardController) -> Result<()> {
    let empty: Vec<(String, FieldKind)> = wizard
        .form()
        .sections
        .iter()
        .flat_map(|s| s.fields.iter())
        .filter(|f| f.kind() != FieldKind::Select && f.value.trim().is_empty())
        .map(|f| (f.name().to_string(), f.kind()))
        .collect();
    for (name, kind) in empty {
        let value = match kind {
            FieldKind::Number => "2",
            FieldKind::Float => "12.5",
            _ => "Sample",
        };
        wizard.set_value(&name, value)?;
    }
    Ok(())
}

fn new_smoke_wizard_state(config: WizardConfig, target: &str) -> Result<WizardState> {
    let definition = config.load_form()?;
    let mut wizard = WizardController::from_definition(definition)?;
    let total = wizard.total_sections();
    let transport: Arc<dyn ResultsTransport> = Arc::new(HttpResultsClient::from_config(&config)?);

    match target {
        "" => Ok(WizardState::new(wizard, config, transport)),
        "complete" => {
            let mut state = WizardState::new(wizard, config, transport);
            state.results_url = Some(state.config.resolve_redirect("/results"));
            state.page = Page::Complete;
            Ok(state)
        }
        "errors" => {
            let mut state = WizardState::new(wizard, config, transport);
            go_next(&mut state, &mpsc::channel().0);
            Ok(state)
        }
        other => {
            let idx: usize = other
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown smoke target '{}'", other))?;
            if idx >= total {
                anyhow::bail!("section {} out of range (form has {})", idx, total);
            }
            seed_sample_answers(&mut wizard)?;
            let mut state = WizardState::new(wizard, config, transport);
            while state.wizard.current_section() < idx {
                if !matches!(state.wizard.advance(&mut state.surface), Step::Moved(_)) {
                    anyhow::bail!(
                        "section {} does not validate with sample answers",
                        state.wizard.current_section()
                    );
                }
            }
            reset_focus(&mut state);
            Ok(state)
        }
    }
}

fn render_frame(state: &WizardState, width: u16, height: u16) -> Result<Buffer> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f.size(), f, state))?;
    Ok(terminal.backend().buffer().clone())
}

/// Non-interactive smoke mode: render a single frame and exit.
/// Targets: a section index, `errors` or `complete`. Empty means the first section.
pub fn smoke(config: WizardConfig, target: &str) -> Result<()> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame TUI smoke target={}",
        target
    );

    let t = target.trim().to_ascii_lowercase();
    let state = new_smoke_wizard_state(config, t.as_str())?;
    render_frame(&state, SMOKE_WIDTH, SMOKE_HEIGHT)?;
    Ok(())
}

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &WizardState) {
    let window_area = centered_window(area, SMOKE_WIDTH, SMOKE_HEIGHT);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(state.wizard.form().title.as_str());
    f.render_widget(outer_block, window_area);

    let inner = window_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    match state.page {
        Page::Form => {
            draw_progress(f, rows[0], state);
            draw_form_body(f, rows[1], state);
            draw_notice(f, rows[2], state);
        }
        Page::Complete => draw_complete(f, rows[1], state),
    }
    draw_buttons(f, rows[3], state);

    if let Some(modal) = state.modal.as_ref() {
        match modal {
            Modal::ConfirmCancel => draw_cancel_modal(f, window_area, state),
            Modal::Message { title, body } => draw_message_modal(f, window_area, title, body),
        }
    }
}

fn draw_progress(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState) {
    let percent = state.surface.progress;
    let title = format!(
        "Section {} of {}",
        state.wizard.current_section() + 1,
        state.wizard.total_sections()
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", percent));
    f.render_widget(gauge, area);
}

fn draw_form_body(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)].as_ref())
        .split(area);

    let current = state.wizard.current_section();
    let section_lines: Vec<Line> = state
        .wizard
        .form()
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i == current {
                Line::from(Span::styled(
                    format!("> {}", s.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", s.title))
            }
        })
        .collect();
    let list = Paragraph::new(Text::from(section_lines))
        .block(Block::default().borders(Borders::ALL).title("Sections"))
        .wrap(Wrap { trim: false });
    f.render_widget(list, cols[0]);

    let section = state.wizard.section();
    let mut lines = Vec::new();
    for (i, field) in section.fields.iter().enumerate() {
        let focused = state.focus == FocusTarget::Field(i);
        let prefix = if focused { ">" } else { " " };
        let value = match field.kind() {
            FieldKind::Select => format!("< {} >", field.display_value()),
            _ if focused => format!("{}_", field.value),
            _ => field.value.clone(),
        };
        let style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {}: ", prefix, field.label()), style),
            Span::raw(value),
        ]));
        for message in state.surface.errors_for(field.name()) {
            lines.push(Line::from(Span::styled(
                format!("    {}", message),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(
        "Tab/Up/Down move. Left/Right change a choice. Enter activates.",
    ));

    let content = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(section.title.as_str()),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    f.render_widget(content, cols[1]);
}

fn draw_notice(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState) {
    let line = if state.wizard.submission_state() == SubmissionState::Submitting {
        Line::from(Span::styled(
            "Submitting your answers...",
            Style::default().fg(Color::Cyan),
        ))
    } else if let Some(notice) = state.surface.last_notice() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        Line::from(Span::styled(
            notice.message.clone(),
            Style::default().fg(color),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_complete(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState) {
    let mut lines = vec![
        Line::from("Thank you. Your answers were submitted."),
        Line::from(""),
    ];
    if let Some(url) = state.results_url.as_deref() {
        lines.push(Line::from(format!("Your results: {}", url)));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("Select Finish to exit."));

    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Completed"))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2)).max(60).min(area.width);
    let h = height.min(area.height.saturating_sub(2)).max(20).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState) {
    let line = if state.page == Page::Complete {
        Line::from(vec![button_text("Finish", true)])
    } else {
        let mut spans = Vec::new();
        if state.surface.back_visible {
            spans.push(button_text(
                "Back",
                state.focus == FocusTarget::Button(ButtonFocus::Back),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(button_text(
            state.surface.next_button.label(),
            state.focus == FocusTarget::Button(ButtonFocus::Next),
        ));
        spans.push(Span::raw(" "));
        spans.push(button_text(
            "Cancel",
            state.focus == FocusTarget::Button(ButtonFocus::Cancel),
        ));
        Line::from(spans)
    };

    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn button_text(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    Span::styled(format!("[ {} ]", label), style)
}

fn modal_area(window_area: Rect, width: u16, height: u16) -> Rect {
    let w = width
        .min(window_area.width.saturating_sub(4))
        .max(40)
        .min(window_area.width);
    let h = height
        .min(window_area.height.saturating_sub(4))
        .max(7)
        .min(window_area.height);
    Rect {
        x: window_area.x + (window_area.width.saturating_sub(w)) / 2,
        y: window_area.y + (window_area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

fn modal_buttons_row(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(2),
        height: 1,
    }
}

fn draw_cancel_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, state: &WizardState) {
    let area = modal_area(window_area, 56, 7);
    f.render_widget(Clear, area);

    let body = Paragraph::new(Text::from(vec![
        Line::from("Your answers will be lost if you quit now."),
        Line::from(""),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Quit?"))
    .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    let yes = button_text("Yes, quit", focused_button(state) == ButtonFocus::Cancel);
    let no = button_text("No", focused_button(state) == ButtonFocus::Next);
    let line = Line::from(vec![yes, Span::raw(" "), no]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, modal_buttons_row(area));
}

fn draw_message_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, title: &str, body: &str) {
    let area = modal_area(window_area, 70, 10);
    f.render_widget(Clear, area);

    let p = Paragraph::new(Text::from(body.to_string()))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);

    let line = Line::from(vec![button_text("OK", true)]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, modal_buttons_row(area));
}
