use super::Rgb;

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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub background: Option<Rgb>,
    pub foreground: Option<Rgb>,
    pub text_style: TextStyle,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    pub fn foreground(mut self, color: Rgb) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.text_style.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.text_style.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.text_style.underline = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.text_style.dim = true;
        self
    }
}
