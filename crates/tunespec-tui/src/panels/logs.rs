//! Logs panel: captured events, with tuning activity called out.
//!
//! Events carrying a `key=` field concern a single tunable entry. They are
//! shown with the key in its own column, and `f` narrows the view to them.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tracing::Level;
use tunespec_core::{LogEntry, LogReader};

use super::PanelState;

/// Log viewer with auto-follow and a tuning-only filter.
pub struct LogsPanel {
    reader: LogReader,
    lines: Vec<LogLine>,
    tuning_only: bool,
    /// Lines above the newest visible one (0 = following).
    scroll_offset: usize,
    auto_follow: bool,
}

struct LogLine {
    elapsed_secs: f64,
    level: Level,
    message: String,
    /// Entry key for tuning events.
    key: Option<String>,
    /// Remaining fields, without `key=`.
    rest: String,
}

impl LogLine {
    fn from_entry(entry: LogEntry) -> Self {
        let mut key = None;
        let mut rest = Vec::new();
        for field in entry.fields.split_whitespace() {
            match field.strip_prefix("key=") {
                Some(k) if key.is_none() => key = Some(k.to_string()),
                _ => rest.push(field),
            }
        }
        Self {
            elapsed_secs: entry.elapsed_secs,
            level: entry.level,
            message: entry.message,
            key,
            rest: rest.join(" "),
        }
    }

    fn to_list_item(&self, key_width: usize) -> ListItem<'_> {
        let level_color = match self.level {
            Level::ERROR => Color::Red,
            Level::WARN => Color::Yellow,
            Level::INFO => Color::Green,
            Level::DEBUG => Color::Blue,
            Level::TRACE => Color::DarkGray,
        };
        let dim = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::styled(format!("{:>8.2}s ", self.elapsed_secs), dim),
            Span::styled(format!("{:>5} ", self.level), Style::default().fg(level_color)),
        ];
        if key_width > 0 {
            let key = self.key.as_deref().unwrap_or("");
            spans.push(Span::styled(
                format!("{key:key_width$} "),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::raw(self.message.as_str()));
        if !self.rest.is_empty() {
            spans.push(Span::styled(format!("  {}", self.rest), dim));
        }
        ListItem::new(Line::from(spans))
    }
}

impl LogsPanel {
    pub fn new(reader: LogReader) -> Self {
        Self {
            reader,
            lines: Vec::new(),
            tuning_only: false,
            scroll_offset: 0,
            auto_follow: true,
        }
    }

    /// Re-read the collector's buffer.
    pub fn refresh(&mut self) {
        self.lines = self
            .reader
            .entries()
            .into_iter()
            .map(LogLine::from_entry)
            .collect();
        if self.auto_follow {
            self.scroll_offset = 0;
        }
        self.clamp_scroll();
    }

    /// Show only events about a tunable entry, or everything.
    pub fn toggle_tuning_only(&mut self) -> bool {
        self.tuning_only = !self.tuning_only;
        self.clamp_scroll();
        self.tuning_only
    }

    fn visible(&self) -> impl Iterator<Item = &LogLine> {
        let tuning_only = self.tuning_only;
        self.lines
            .iter()
            .filter(move |line| !tuning_only || line.key.is_some())
    }

    fn visible_len(&self) -> usize {
        self.visible().count()
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.visible_len().saturating_sub(1));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = area.height.saturating_sub(2) as usize;
        let total = self.visible_len();
        let tuning = self.lines.iter().filter(|l| l.key.is_some()).count();

        let mut title = format!(" Logs ({total}, {tuning} tuning)");
        if self.tuning_only {
            title.push_str(" [tuning only]");
        }
        if self.auto_follow {
            title.push_str(" [follow]");
        }
        title.push(' ');
        let block = Block::default().title(title).borders(Borders::ALL);

        if total == 0 {
            let empty = Paragraph::new("  (no log entries yet)")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let key_width = self
            .visible()
            .filter_map(|l| l.key.as_deref())
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        let skip = total.saturating_sub(height + self.scroll_offset);
        let items: Vec<ListItem> = self
            .visible()
            .skip(skip)
            .take(height)
            .map(|line| line.to_list_item(key_width))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

impl PanelState for LogsPanel {
    fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
        if self.scroll_offset == 0 {
            self.auto_follow = true;
        }
    }

    fn scroll_up(&mut self, n: usize) {
        self.auto_follow = false;
        self.scroll_offset = self.scroll_offset.saturating_add(n);
        self.clamp_scroll();
    }

    fn scroll_to_top(&mut self) {
        self.auto_follow = false;
        self.scroll_offset = self.visible_len().saturating_sub(1);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.auto_follow = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt;
    use tunespec_core::LogCollector;

    /// `tuned` tuning events interleaved with `other` plain ones.
    fn panel_with(tuned: usize, other: usize) -> LogsPanel {
        let collector = LogCollector::new(1000);
        let reader = collector.reader();

        let subscriber = tracing_subscriber::registry().with(collector);
        let _guard = tracing::subscriber::set_default(subscriber);
        for i in 0..tuned.max(other) {
            if i < tuned {
                tracing::debug!(spec = "MainSpec", key = "Spacing", value = i, "Tuned value changed");
            }
            if i < other {
                tracing::info!(path = "out.json", "Exported spec");
            }
        }

        let mut panel = LogsPanel::new(reader);
        panel.refresh();
        panel
    }

    #[test]
    fn test_key_field_is_split_out() {
        let panel = panel_with(1, 1);
        let tuned = &panel.lines[0];
        assert_eq!(tuned.key.as_deref(), Some("Spacing"));
        assert_eq!(tuned.rest, "spec=MainSpec value=0");

        let plain = &panel.lines[1];
        assert_eq!(plain.key, None);
        assert_eq!(plain.rest, "path=out.json");
    }

    #[test]
    fn test_tuning_only_filter() {
        let mut panel = panel_with(3, 5);
        assert_eq!(panel.visible_len(), 8);
        assert!(panel.toggle_tuning_only());
        assert_eq!(panel.visible_len(), 3);
        assert!(panel.visible().all(|l| l.key.as_deref() == Some("Spacing")));
        assert!(!panel.toggle_tuning_only());
        assert_eq!(panel.visible_len(), 8);
    }

    #[test]
    fn test_filter_clamps_scroll() {
        let mut panel = panel_with(2, 20);
        panel.scroll_to_top();
        assert_eq!(panel.scroll_offset, 21);
        panel.toggle_tuning_only();
        assert_eq!(panel.scroll_offset, 1);
    }

    #[test]
    fn test_scroll_follow_state() {
        let mut panel = panel_with(10, 10);
        panel.scroll_up(5);
        assert!(!panel.auto_follow);
        assert_eq!(panel.scroll_offset, 5);

        panel.scroll_down(10);
        assert!(panel.auto_follow);
        assert_eq!(panel.scroll_offset, 0);

        panel.scroll_up(100);
        assert_eq!(panel.scroll_offset, 19);
    }

    #[test]
    fn test_scroll_on_empty_panel() {
        let mut panel = LogsPanel::new(LogCollector::new(100).reader());
        panel.toggle_tuning_only();
        panel.scroll_up(5);
        panel.scroll_to_top();
        assert_eq!(panel.scroll_offset, 0);
        panel.scroll_to_bottom();
        assert!(panel.auto_follow);
    }
}
