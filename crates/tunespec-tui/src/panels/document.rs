//! Document panel: live preview of the document an export would write.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::PanelState;

/// Scrollable, highlighted view of the current spec document.
pub struct DocumentPanel {
    lines: Vec<String>,
    scroll_offset: usize,
}

impl DocumentPanel {
    pub fn new(document: &str) -> Self {
        let mut panel = Self {
            lines: Vec::new(),
            scroll_offset: 0,
        };
        panel.set_document(document);
        panel
    }

    /// Replace the previewed text, keeping the scroll position in range.
    pub fn set_document(&mut self, document: &str) {
        self.lines = document.lines().map(String::from).collect();
        self.scroll_offset = self.scroll_offset.min(self.lines.len().saturating_sub(1));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let visible_height = area.height.saturating_sub(2) as usize;

        let visible: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(visible_height)
            .map(|line| highlight(line))
            .collect();

        let title = format!(" Document ({} lines) ", self.lines.len());
        let paragraph =
            Paragraph::new(visible).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }
}

/// Colour `"field": value` lines; structural lines pass through.
fn highlight(line: &str) -> Line<'_> {
    let Some((field, value)) = line.split_once(": ") else {
        return Line::from(Span::styled(line, Style::default().fg(Color::DarkGray)));
    };
    let value_style = match value.trim_end_matches(',') {
        "true" => Style::default().fg(Color::Green),
        "false" => Style::default().fg(Color::Red),
        v if v.starts_with('"') => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::Cyan),
    };
    Line::from(vec![
        Span::styled(field, Style::default().fg(Color::Yellow)),
        Span::raw(": "),
        Span::styled(value, value_style),
    ])
}

impl PanelState for DocumentPanel {
    fn scroll_down(&mut self, n: usize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max);
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.lines.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lines() {
        let panel = DocumentPanel::new("[\n  {\n    \"key\": \"Enabled\",\n    \"switchValue\": false\n  }\n]");
        assert_eq!(panel.lines.len(), 6);
    }

    #[test]
    fn test_document_scroll() {
        let text = (0..20)
            .map(|i| format!("line{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut panel = DocumentPanel::new(&text);

        panel.scroll_down(5);
        assert_eq!(panel.scroll_offset, 5);
        panel.scroll_up(3);
        assert_eq!(panel.scroll_offset, 2);
        panel.scroll_to_bottom();
        assert_eq!(panel.scroll_offset, 19);
    }

    #[test]
    fn test_set_document_clamps_scroll() {
        let text = (0..20).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        let mut panel = DocumentPanel::new(&text);
        panel.scroll_to_bottom();
        panel.set_document("[]");
        assert_eq!(panel.scroll_offset, 0);
    }

    #[test]
    fn test_highlight_splits_fields() {
        let line = highlight("    \"sliderValue\": 300.0,");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "    \"sliderValue\"");
        assert_eq!(line.spans[2].content, "300.0,");
        assert_eq!(highlight("  {").spans.len(), 1);
    }

    #[test]
    fn test_highlight_label_containing_separator() {
        let line = highlight("    \"label\": \"Spacing: outer\",");
        assert_eq!(line.spans[0].content, "    \"label\"");
        assert_eq!(line.spans[2].content, "\"Spacing: outer\",");
        assert_eq!(line.spans[2].style.fg, Some(Color::White));
    }
}
