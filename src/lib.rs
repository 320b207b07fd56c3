//! mdterm renders markdown to the terminal as styled text instead of raw
//! markup: headings, lists, quotes, emphasis and links come out as readable
//! ANSI-decorated output on a single forward-only stream.
//!
//! The pipeline is one-way: raw text, optionally rewrapped to a width, is
//! parsed into a document tree, then a single depth-first walk drives the
//! style stack, list counters and footnote collector while writing escape
//! sequences and content to the output sink.

use std::borrow::Cow;
use std::io::Write;

use anyhow::Result;

pub mod color;
pub mod escape;
pub mod highlight;
pub mod parser;
pub mod renderer;
pub mod theme;
pub mod wrap;

#[cfg(test)]
mod tests;

pub use escape::{ColorMode, EscapeSequence};
pub use parser::{parse, Node, NodeKind};
pub use renderer::{RenderOptions, Renderer};
pub use theme::Theme;

/// Render markdown text to `out`. Each call starts from fresh state;
/// nothing carries over between documents.
pub fn render<W: Write>(markdown: &str, options: &RenderOptions, out: &mut W) -> Result<()> {
    let options = options.clone().normalize();

    let theme = match &options.theme_file {
        Some(path) => Theme::from_file(path)?,
        None => Theme::load(&options.theme_name),
    };

    let source = match options.output_width {
        Some(width) => Cow::Owned(wrap::rewrap(markdown, width)),
        None => Cow::Borrowed(markdown),
    };

    let tree = parser::parse(&source);
    Renderer::new(&options, theme).render_tree(&tree, out)
}
