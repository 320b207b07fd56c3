use crate::color;

/// How colors are encoded on the wire: 24-bit RGB codes, or indexes into
/// the fixed 256-color palette for reduced-color terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    TrueColor,
    Indexed,
}

/// A bundle of terminal attributes plus the logic to render it as entering
/// and exiting control codes. Colors are stored as resolved "#rrggbb"
/// strings; named values like "#ansired" are resolved at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EscapeSequence {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub underline: bool,
    pub italic: bool,
    pub mode: ColorMode,
}

impl EscapeSequence {
    pub fn plain(mode: ColorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_fg(color: &str, mode: ColorMode) -> Self {
        Self {
            fg: Some(color::resolve_named(color)),
            mode,
            ..Self::default()
        }
    }

    pub fn with_bg(color: &str, mode: ColorMode) -> Self {
        Self {
            bg: Some(color::resolve_named(color)),
            mode,
            ..Self::default()
        }
    }

    pub fn set_fg(&mut self, color: &str) {
        self.fg = Some(color::resolve_named(color));
    }

    pub fn set_bg(&mut self, color: &str) {
        self.bg = Some(color::resolve_named(color));
    }

    fn escape(attrs: &[String]) -> String {
        if attrs.is_empty() {
            return String::new();
        }
        format!("\x1b[{}m", attrs.join(";"))
    }

    /// The codes that apply this attribute set, composed in a fixed order:
    /// foreground, background, bold, underline, italic. Omitted attributes
    /// contribute nothing, so a fully empty set renders as an empty string.
    pub fn color_string(&self) -> String {
        let mut attrs: Vec<String> = Vec::new();

        match self.mode {
            ColorMode::TrueColor => {
                if let Some(fg) = &self.fg {
                    let (r, g, b) = color::to_rgb(fg);
                    attrs.extend(["38".into(), "2".into(), r.to_string(), g.to_string(), b.to_string()]);
                }
                if let Some(bg) = &self.bg {
                    let (r, g, b) = color::to_rgb(bg);
                    attrs.extend(["48".into(), "2".into(), r.to_string(), g.to_string(), b.to_string()]);
                }
            }
            ColorMode::Indexed => {
                if let Some(fg) = &self.fg {
                    let index = color::color_index(fg);
                    attrs.extend(["38".into(), "5".into(), index.to_string()]);
                }
                if let Some(bg) = &self.bg {
                    let index = color::color_index(bg);
                    attrs.extend(["48".into(), "5".into(), index.to_string()]);
                }
            }
        }

        if self.bold {
            attrs.push("01".into());
        }
        if self.underline {
            attrs.push("04".into());
        }
        if self.italic {
            attrs.push("03".into());
        }

        Self::escape(&attrs)
    }

    /// The minimal codes that clear exactly the attributes this sequence
    /// applied: a foreground reset only if a foreground was set, likewise
    /// for background, and a single attribute reset if any of
    /// bold/underline/italic was set. Never a blanket reset.
    pub fn reset_string(&self) -> String {
        let mut attrs: Vec<String> = Vec::new();

        if self.fg.is_some() {
            attrs.push("39".into());
        }
        if self.bg.is_some() {
            attrs.push("49".into());
        }
        if self.bold || self.underline || self.italic {
            attrs.push("00".into());
        }

        Self::escape(&attrs)
    }

    /// Wrap `text` inline: entering codes, text, minimal reset.
    pub fn stylize(&self, text: &str) -> String {
        format!("{}{}{}", self.color_string(), text, self.reset_string())
    }

    /// The full reset used for terminal hand-off at process boundaries.
    pub fn full_reset_string() -> String {
        "\x1b[39;49;00m".to_string()
    }
}
