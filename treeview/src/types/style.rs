use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dim: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            dim: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub text_style: TextStyle,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            background: None,
            foreground: None,
            text_style: TextStyle::new(),
        }
    }

    pub const fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub const fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.text_style.bold = true;
        self
    }

    /// Overlay `other` on top of this style. Set colors in `other` win,
    /// text attributes accumulate.
    pub fn patch(mut self, other: Style) -> Self {
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.foreground.is_some() {
            self.foreground = other.foreground;
        }
        self.text_style.bold |= other.text_style.bold;
        self.text_style.italic |= other.text_style.italic;
        self.text_style.underline |= other.text_style.underline;
        self.text_style.dim |= other.text_style.dim;
        self
    }
}
