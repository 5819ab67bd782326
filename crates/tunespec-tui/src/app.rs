//! Core TUI application state and event handling.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{error, info};
use tunespec_config::AppConfig;
use tunespec_core::{Control, LogReader, SpecError, TunableSpec, Value, document};

use crate::keymap::{Action, KeyMapper};
use crate::panels::{ControlsPanel, DocumentPanel, LogsPanel, Nudge, PanelState, nudged_value};
use crate::readout::LiveReadout;

/// The panels available in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Controls,
    Document,
    Logs,
}

impl Panel {
    pub fn title(self) -> &'static str {
        match self {
            Panel::Controls => "Controls",
            Panel::Document => "Document",
            Panel::Logs => "Logs",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Panel::Controls => 0,
            Panel::Document => 1,
            Panel::Logs => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Panel::Controls => Panel::Document,
            Panel::Document => Panel::Logs,
            Panel::Logs => Panel::Controls,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Panel::Controls => Panel::Logs,
            Panel::Document => Panel::Controls,
            Panel::Logs => Panel::Document,
        }
    }
}

const ALL_PANELS: [Panel; 3] = [Panel::Controls, Panel::Document, Panel::Logs];

/// TUI application state.
pub struct App {
    pub should_quit: bool,

    pub active_panel: Panel,

    pub keymap: KeyMapper,

    /// The spec being tuned.
    pub spec: TunableSpec,

    /// Owner of the surface's own bindings; dropping it unbinds them.
    pub readout: Rc<LiveReadout>,

    pub controls: ControlsPanel,

    pub document: DocumentPanel,

    pub logs: LogsPanel,

    /// Result of the last edit or export.
    pub status: String,

    config: AppConfig,
}

impl App {
    /// Wrap a loaded spec, binding the live readout to every entry.
    pub fn new(
        mut spec: TunableSpec,
        config: AppConfig,
        log_reader: LogReader,
    ) -> Result<Self, SpecError> {
        spec.set_controls_visible(config.controls.visible_on_start);
        let readout = LiveReadout::attach(&mut spec)?;
        let preview = preview_text(&spec);

        Ok(Self {
            should_quit: false,
            active_panel: Panel::Controls,
            keymap: KeyMapper::new(),
            controls: ControlsPanel::new(spec.len()),
            document: DocumentPanel::new(&preview),
            logs: LogsPanel::new(log_reader),
            status: format!("Tuning '{}'", spec.name()),
            readout,
            spec,
            config,
        })
    }

    /// Process a resolved action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPanel => self.active_panel = self.active_panel.next(),
            Action::PrevPanel => self.active_panel = self.active_panel.prev(),
            Action::GoToPanel(n) => {
                if let Some(&panel) = ALL_PANELS.get(n) {
                    self.active_panel = panel;
                }
            }
            Action::Down => self.active_panel_state_mut().scroll_down(1),
            Action::Up => self.active_panel_state_mut().scroll_up(1),
            Action::HalfPageDown => self.active_panel_state_mut().scroll_down(10),
            Action::HalfPageUp => self.active_panel_state_mut().scroll_up(10),
            Action::ToTop => self.active_panel_state_mut().scroll_to_top(),
            Action::ToBottom => self.active_panel_state_mut().scroll_to_bottom(),
            Action::Decrease => self.nudge(Nudge::Decrease, self.config.controls.fine_steps),
            Action::Increase => self.nudge(Nudge::Increase, self.config.controls.fine_steps),
            Action::DecreaseCoarse => {
                self.nudge(Nudge::Decrease, self.config.controls.coarse_steps)
            }
            Action::IncreaseCoarse => {
                self.nudge(Nudge::Increase, self.config.controls.coarse_steps)
            }
            Action::Toggle => self.toggle_selected(),
            Action::ToggleControls => {
                let visible = self.spec.toggle_controls();
                self.status = if visible {
                    "Controls shown".to_string()
                } else {
                    "Controls hidden".to_string()
                };
            }
            Action::Export => {
                self.status = match self.export() {
                    Ok(path) => format!("Exported to {}", path.display()),
                    Err(err) => {
                        error!(error = %err, "Export failed");
                        format!("Export failed: {err:#}")
                    }
                };
            }
            Action::ToggleLogFilter => {
                self.status = if self.logs.toggle_tuning_only() {
                    "Logs: tuning events only".to_string()
                } else {
                    "Logs: all events".to_string()
                };
            }
            Action::None => {}
        }
    }

    /// Tick: refresh data from live sources.
    pub fn tick(&mut self) {
        self.logs.refresh();
    }

    /// Write the current document to `<export.dir>/<name>.json`.
    pub fn export(&self) -> Result<PathBuf> {
        let path = self.config.export_path(self.spec.name());
        let document = if self.config.export.pretty {
            self.spec.export()?
        } else {
            document::serialize_compact(self.spec.entries())?
        };

        std::fs::create_dir_all(&self.config.export.dir)
            .with_context(|| format!("creating {}", self.config.export.dir.display()))?;
        std::fs::write(&path, format!("{document}\n"))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(spec = %self.spec.name(), path = %path.display(), "Exported spec");
        Ok(path)
    }

    fn editable(&mut self) -> bool {
        if self.active_panel != Panel::Controls {
            return false;
        }
        if !self.spec.controls_visible() {
            self.status = "Controls hidden (press t to show)".to_string();
            return false;
        }
        true
    }

    fn nudge(&mut self, nudge: Nudge, steps: u32) {
        if !self.editable() {
            return;
        }
        let Some(entry) = self.spec.entries().get(self.controls.selected()) else {
            return;
        };
        let key = entry.key().to_string();
        if let Some(value) = nudged_value(entry, nudge, steps) {
            self.apply(&key, value);
        }
    }

    fn toggle_selected(&mut self) {
        if !self.editable() {
            return;
        }
        let Some(entry) = self.spec.entries().get(self.controls.selected()) else {
            return;
        };
        if let Control::Switch { value } = *entry.control() {
            let key = entry.key().to_string();
            self.apply(&key, Value::Bool(!value));
        }
    }

    fn apply(&mut self, key: &str, value: Value) {
        self.status = match self.spec.set(key, value) {
            Ok(stored) => format!("{key} = {stored}"),
            Err(err) => format!("{err}"),
        };
        self.document.set_document(&preview_text(&self.spec));
    }

    fn active_panel_state_mut(&mut self) -> &mut dyn PanelState {
        match self.active_panel {
            Panel::Controls => &mut self.controls,
            Panel::Document => &mut self.document,
            Panel::Logs => &mut self.logs,
        }
    }

    /// Get the status line text.
    pub fn status_line(&self) -> String {
        format!(
            " {status}  |  q:quit  j/k:select  h/l H/L:adjust  space:toggle  t:controls  f:log filter  e:export  [{panel}]",
            status = self.status,
            panel = self.active_panel.title()
        )
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Min(1),    // active panel
                Constraint::Length(2), // status bar
            ])
            .split(frame.area());

        let mut header = vec![Span::styled(
            format!(" tunespec: {} ", self.spec.name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        for panel in ALL_PANELS {
            let style = if panel == self.active_panel {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            header.push(Span::raw(" "));
            header.push(Span::styled(
                format!(" {}:{} ", panel.index() + 1, panel.title()),
                style,
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(header)).block(Block::default().borders(Borders::BOTTOM)),
            chunks[0],
        );

        match self.active_panel {
            Panel::Controls => self
                .controls
                .render(frame, chunks[1], &self.spec, &self.readout),
            Panel::Document => self.document.render(frame, chunks[1]),
            Panel::Logs => self.logs.render(frame, chunks[1]),
        }

        let status = Paragraph::new(self.status_line())
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status, chunks[2]);
    }
}

fn preview_text(spec: &TunableSpec) -> String {
    spec.export()
        .unwrap_or_else(|err| format!("(cannot serialize document: {err})"))
}
