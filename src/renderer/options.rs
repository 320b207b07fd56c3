use std::path::PathBuf;

use tracing::warn;

pub use crate::escape::ColorMode;

/// Output widths below this are overridden (with a warning) rather than
/// honored.
pub const MIN_WIDTH: usize = 20;

/// Configuration for one render invocation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Rewrap paragraphs to this width before parsing; `None` leaves the
    /// source line structure alone.
    pub output_width: Option<usize>,
    /// Render soft line breaks as newlines (true) or single spaces.
    pub soft_wrap: bool,
    pub theme_name: String,
    /// Optional JSON theme file overriding `theme_name`.
    pub theme_file: Option<PathBuf>,
    pub color_mode: ColorMode,
}

impl RenderOptions {
    /// Enforce the width floor; smaller values are overridden with a
    /// warning instead of failing.
    pub fn normalize(mut self) -> Self {
        if let Some(width) = self.output_width {
            if width < MIN_WIDTH {
                warn!("overriding width to {}", MIN_WIDTH);
                self.output_width = Some(MIN_WIDTH);
            }
        }
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_width: None,
            soft_wrap: true,
            theme_name: crate::theme::DEFAULT_THEME.to_string(),
            theme_file: None,
            color_mode: ColorMode::TrueColor,
        }
    }
}
