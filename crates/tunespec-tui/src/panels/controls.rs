//! Controls panel: one slider or switch per spec entry.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tunespec_core::{Control, Entry, TunableSpec, Value};

use super::PanelState;
use crate::readout::LiveReadout;

const BAR_WIDTH: usize = 24;

/// Direction of a slider adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Decrease,
    Increase,
}

impl Nudge {
    fn sign(self) -> f64 {
        match self {
            Nudge::Decrease => -1.0,
            Nudge::Increase => 1.0,
        }
    }
}

/// Selection state over the spec's entries.
pub struct ControlsPanel {
    len: usize,
    selected: usize,
}

impl ControlsPanel {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spec: &TunableSpec, readout: &LiveReadout) {
        let title = format!(" Controls ({}) ", spec.len());

        if !spec.controls_visible() {
            let hidden = Paragraph::new("  Controls hidden (press t to show)")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(hidden, area);
            return;
        }

        if spec.is_empty() {
            let empty = Paragraph::new("  (spec has no entries)")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let label_width = spec
            .entries()
            .iter()
            .map(|e| e.label().chars().count())
            .max()
            .unwrap_or(0);
        let visible_height = area.height.saturating_sub(2) as usize;
        let skip = (self.selected + 1).saturating_sub(visible_height);

        let items: Vec<ListItem> = spec
            .entries()
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible_height)
            .map(|(i, entry)| {
                let selected = i == self.selected;
                let marker = if selected { "> " } else { "  " };
                let label_style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{:label_width$}  ", entry.label()), label_style),
                ];
                spans.extend(control_spans(entry));
                if let Some(delivered) = readout.get(entry.key()) {
                    spans.push(Span::styled(
                        format!("  bound: {} ({}x)", delivered.value, delivered.deliveries),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(list, area);
    }
}

impl PanelState for ControlsPanel {
    fn scroll_down(&mut self, n: usize) {
        self.selected = (self.selected + n).min(self.len.saturating_sub(1));
    }

    fn scroll_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn scroll_to_top(&mut self) {
        self.selected = 0;
    }

    fn scroll_to_bottom(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }
}

/// The value a slider moves to after one step of `range / steps`.
///
/// Returns `None` for switches. The result may lie outside the slider's
/// bounds; storing it clamps.
pub fn nudged_value(entry: &Entry, nudge: Nudge, steps: u32) -> Option<Value> {
    match *entry.control() {
        Control::Slider { value, min, max } => {
            let step = (max - min) / f64::from(steps.max(1));
            Some(Value::Number(value + nudge.sign() * step))
        }
        Control::Switch { .. } => None,
    }
}

fn control_spans(entry: &Entry) -> Vec<Span<'static>> {
    match *entry.control() {
        Control::Slider { value, min, max } => vec![
            Span::styled(slider_bar(value, min, max, BAR_WIDTH), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {value:.3} ")),
            Span::styled(format!("[{min}, {max}]"), Style::default().fg(Color::DarkGray)),
        ],
        Control::Switch { value: true } => {
            vec![Span::styled("[ on  ]", Style::default().fg(Color::Green))]
        }
        Control::Switch { value: false } => {
            vec![Span::styled("[ off ]", Style::default().fg(Color::Red))]
        }
    }
}

/// Text gauge for a slider position.
fn slider_bar(value: f64, min: f64, max: f64, width: usize) -> String {
    let fraction = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.0, 0.0, 1.0, 4), "[░░░░]");
        assert_eq!(slider_bar(0.5, 0.0, 1.0, 4), "[██░░]");
        assert_eq!(slider_bar(300.0, 10.0, 300.0, 4), "[████]");
        assert_eq!(slider_bar(5.0, 5.0, 5.0, 2), "[██]");
    }

    #[test]
    fn test_nudged_value() {
        let slider = Entry::slider("Spacing", 175.0, 100.0, 300.0).unwrap();
        assert_eq!(
            nudged_value(&slider, Nudge::Increase, 100),
            Some(Value::Number(177.0))
        );
        assert_eq!(
            nudged_value(&slider, Nudge::Decrease, 10),
            Some(Value::Number(155.0))
        );
        assert_eq!(nudged_value(&Entry::switch("On", true), Nudge::Increase, 10), None);
    }

    #[test]
    fn test_selection_is_bounded() {
        let mut panel = ControlsPanel::new(3);
        panel.scroll_up(1);
        assert_eq!(panel.selected(), 0);
        panel.scroll_down(10);
        assert_eq!(panel.selected(), 2);
        panel.scroll_to_top();
        assert_eq!(panel.selected(), 0);
        panel.scroll_to_bottom();
        assert_eq!(panel.selected(), 2);
    }

    #[test]
    fn test_selection_on_empty_spec() {
        let mut panel = ControlsPanel::new(0);
        panel.scroll_down(1);
        panel.scroll_to_bottom();
        assert_eq!(panel.selected(), 0);
    }
}
