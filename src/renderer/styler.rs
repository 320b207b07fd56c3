use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use tracing::error;

use crate::color::reshade;
use crate::escape::{ColorMode, EscapeSequence};
use crate::parser::{Node, NodeKind};
use crate::theme::{parse_spec, Theme, TOKEN_CLASSES};

/// Per-level heading darkening step.
const HEADING_SHADE_STEP: f32 = 0.10;

/// A theme resolved into ready-to-emit escape sequences, one per token
/// class. Kinds with no defined style resolve to the plain (no-op)
/// sequence so push/pop stays balanced.
pub struct Style {
    styles: HashMap<&'static str, EscapeSequence>,
    plain: EscapeSequence,
}

impl Style {
    pub fn new(theme: &Theme, mode: ColorMode) -> Self {
        let styles = TOKEN_CLASSES
            .iter()
            .map(|class| (*class, parse_spec(theme.spec(class), mode)))
            .collect();

        Self {
            styles,
            plain: EscapeSequence::plain(mode),
        }
    }

    pub fn entering(&self, class: &str) -> &EscapeSequence {
        self.styles.get(class).unwrap_or(&self.plain)
    }

    /// Exiting resolves to the same sequence; its minimal reset undoes
    /// exactly what entering applied.
    pub fn exiting(&self, class: &str) -> &EscapeSequence {
        self.entering(class)
    }

    pub fn plain(&self) -> &EscapeSequence {
        &self.plain
    }
}

/// Maintains the stack of active escape sequences across the walk. Every
/// entering visit pushes (a no-op sequence when the kind has no style);
/// the matching exit pops, writes the minimal reset, and re-emits the new
/// top so sibling content resumes the parent's style.
pub struct Styler {
    pub style: Style,
    stack: Vec<EscapeSequence>,
}

impl Styler {
    pub fn new(theme: &Theme, mode: ColorMode) -> Self {
        Self {
            style: Style::new(theme, mode),
            stack: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn enter<W: Write>(&mut self, node: &Node, out: &mut W) -> Result<()> {
        let eseq = self.sequence_for(node);
        out.write_all(eseq.color_string().as_bytes())?;
        self.stack.push(eseq);
        Ok(())
    }

    /// Pop the style pushed for `node`. Underflow, or a non-empty stack at
    /// document close, is a programming defect: asserted in debug builds,
    /// logged and self-healed (treated as empty) in release builds.
    pub fn exit<W: Write>(&mut self, node: &Node, out: &mut W) -> Result<()> {
        let Some(eseq) = self.stack.pop() else {
            debug_assert!(false, "style stack underflow on {}", node.kind.tag());
            error!("style stack underflow on {}", node.kind.tag());
            return Ok(());
        };
        out.write_all(eseq.reset_string().as_bytes())?;

        if matches!(node.kind, NodeKind::Document) {
            debug_assert!(
                self.stack.is_empty(),
                "style stack not empty at document close"
            );
            if !self.stack.is_empty() {
                error!("style stack not empty at document close");
                self.stack.clear();
            }
        } else if let Some(top) = self.stack.last() {
            out.write_all(top.color_string().as_bytes())?;
        }

        Ok(())
    }

    fn sequence_for(&self, node: &Node) -> EscapeSequence {
        match &node.kind {
            NodeKind::Heading(level) => self.shaded_heading(*level),
            kind => match style_class(kind) {
                Some(class) => self.style.entering(class).clone(),
                None => self.style.plain().clone(),
            },
        }
    }

    /// Each heading level renders a bit darker than the last. Operates on
    /// a private copy; the base style is never mutated.
    fn shaded_heading(&self, level: Option<u8>) -> EscapeSequence {
        let mut eseq = self.style.entering("heading").clone();
        let level = level.unwrap_or(1).max(1);
        let percent = 1.0 - HEADING_SHADE_STEP * f32::from(level - 1);

        if let Some(fg) = &eseq.fg {
            eseq.fg = Some(reshade(fg, percent));
        }

        eseq
    }
}

/// The token class styling a node kind, if any.
fn style_class(kind: &NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Heading(_) => Some("heading"),
        NodeKind::Emph => Some("emph"),
        NodeKind::Strong => Some("strong"),
        NodeKind::BlockQuote => Some("block_quote"),
        NodeKind::Code(_) => Some("code"),
        NodeKind::Link { .. } => Some("link"),
        NodeKind::Image { .. } => Some("image"),
        _ => None,
    }
}
