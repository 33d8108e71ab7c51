use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

pub const CHECKED: &str = "[x]";
pub const UNCHECKED: &str = "[ ]";
pub const DESTROY: &str = "×";

/// Completion checkbox for a single item.
#[derive(Debug, Clone, Copy)]
pub struct Checkbox {
    checked: bool,
}

impl Checkbox {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn symbol(&self) -> &'static str {
        if self.checked {
            CHECKED
        } else {
            UNCHECKED
        }
    }

    pub fn style(&self) -> Style {
        if self.checked {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        }
    }
}

impl Widget for Checkbox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_stringn(area.x, area.y, self.symbol(), area.width as usize, self.style());
    }
}

/// "Mark all as complete" checkbox shown in the header while the list has
/// items.
#[derive(Debug, Clone, Copy)]
pub struct ToggleAll {
    checked: bool,
    visible: bool,
}

impl ToggleAll {
    pub fn new(checked: bool, visible: bool) -> Self {
        Self { checked, visible }
    }
}

impl Widget for ToggleAll {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.visible {
            Checkbox::new(self.checked).render(area, buf);
        }
    }
}

/// Destroy marker on the selected item.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestroyButton;

impl Widget for DestroyButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_stringn(
            area.x,
            area.y,
            DESTROY,
            area.width as usize,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );
    }
}

/// "Clear completed" button; renders nothing when there is nothing to clear.
#[derive(Debug, Clone, Copy)]
pub struct ClearCompleted {
    count: usize,
}

impl ClearCompleted {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn label(&self) -> Option<String> {
        (self.count > 0).then(|| format!("Clear completed ({})", self.count))
    }
}

impl Widget for ClearCompleted {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if let Some(label) = self.label() {
            buf.set_stringn(
                area.x,
                area.y,
                &label,
                area.width as usize,
                Style::default().fg(Color::Gray),
            );
        }
    }
}
