use super::{Color, Style};

/// Colors used when painting tree rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeTheme {
    pub background: Color,
    pub foreground: Color,
    /// Row of the focused item.
    pub focused: Style,
    /// Containers on the path to the focused item.
    pub focus_path: Style,
    /// Disclosure glyph and label of expandable items.
    pub expandable: Style,
}

impl TreeTheme {
    pub const fn new() -> Self {
        Self {
            background: Color::Oklch { l: 0.0, c: 0.0, h: 0.0 },  // black
            foreground: Color::Oklch { l: 0.9, c: 0.0, h: 0.0 },  // light gray
            focused: Style::new()
                .background(Color::Oklch { l: 0.45, c: 0.12, h: 250.0 })
                .foreground(Color::Oklch { l: 1.0, c: 0.0, h: 0.0 })
                .bold(),
            focus_path: Style::new().foreground(Color::Oklch { l: 0.8, c: 0.1, h: 250.0 }),
            expandable: Style::new().bold(),
        }
    }
}

impl Default for TreeTheme {
    fn default() -> Self {
        Self::new()
    }
}
