//! Control surface panels.

mod controls;
mod document;
mod logs;

pub use controls::{ControlsPanel, Nudge, nudged_value};
pub use document::DocumentPanel;
pub use logs::LogsPanel;

/// Trait for panels that support scrolling or selection.
pub trait PanelState {
    /// Move down by `n` lines.
    fn scroll_down(&mut self, n: usize);

    /// Move up by `n` lines.
    fn scroll_up(&mut self, n: usize);

    /// Jump to the very top.
    fn scroll_to_top(&mut self);

    /// Jump to the very bottom.
    fn scroll_to_bottom(&mut self);
}
