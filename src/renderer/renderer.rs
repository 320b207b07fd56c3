use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use tracing::{error, warn};

use crate::escape::EscapeSequence;
use crate::highlight;
use crate::parser::{ListMarker, Node, NodeKind};
use crate::renderer::options::RenderOptions;
use crate::renderer::styler::Styler;
use crate::theme::Theme;

const ENDL: &str = "\n";

/// Background tint framing highlighted code blocks.
const CODE_BLOCK_BG: &str = "#202020";

/// Walks a document tree depth-first and writes styled output. All
/// mutable state (style stack, list counters, nesting depth, footnotes)
/// is owned by one renderer instance; a new render starts fresh.
pub struct Renderer<'a> {
    options: &'a RenderOptions,
    theme: Theme,
    styler: Styler,
    counters: HashMap<usize, i64>,
    footnotes: Vec<String>,
    pending_refs: Vec<usize>,
    list_depth: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions, theme: Theme) -> Self {
        let styler = Styler::new(&theme, options.color_mode);
        Self {
            options,
            theme,
            styler,
            counters: HashMap::new(),
            footnotes: Vec::new(),
            pending_refs: Vec::new(),
            list_depth: 0,
        }
    }

    /// Render a whole document tree to `out`. The tree is read-only; the
    /// style stack must return to depth zero by the time the walk returns
    /// to the root.
    pub fn render_tree<W: Write>(&mut self, root: &Node, out: &mut W) -> Result<()> {
        self.counters.clear();
        self.footnotes.clear();
        self.pending_refs.clear();
        self.list_depth = 0;

        self.walk(root, None, true, out)?;

        debug_assert_eq!(self.styler.depth(), 0, "style stack unbalanced after render");
        Ok(())
    }

    /// Visit `node` entering, descend, then visit it exiting. Atomic
    /// kinds collapse both visits into one. The stream is flushed after
    /// every visit so piped consumers see output promptly.
    fn walk<W: Write>(
        &mut self,
        node: &Node,
        parent: Option<&Node>,
        first: bool,
        out: &mut W,
    ) -> Result<()> {
        out.write_all(self.prefix(parent, first).as_bytes())?;
        self.styler.enter(node, out)?;
        let content = self.dispatch(node, parent, true);
        out.write_all(content.as_bytes())?;
        out.flush()?;

        if node.kind.is_atomic() {
            self.styler.exit(node, out)?;
            out.flush()?;
            return Ok(());
        }

        for (i, child) in node.children.iter().enumerate() {
            self.walk(child, Some(node), i == 0, out)?;
        }

        let content = self.dispatch(node, parent, false);
        out.write_all(content.as_bytes())?;
        self.styler.exit(node, out)?;
        out.flush()?;

        Ok(())
    }

    /// Entering a node whose parent is the document root inserts one
    /// newline, except for the root's very first child. This separates
    /// top-level blocks without leading blank output.
    fn prefix(&self, parent: Option<&Node>, first: bool) -> &'static str {
        match parent {
            Some(parent) if matches!(parent.kind, NodeKind::Document) && !first => ENDL,
            _ => "",
        }
    }

    /// Map a node kind to its content for this visit. Unrecognized kinds
    /// log an error and contribute nothing; the walk never halts.
    fn dispatch(&mut self, node: &Node, parent: Option<&Node>, entering: bool) -> String {
        match &node.kind {
            NodeKind::Document => self.document(entering),
            NodeKind::Paragraph => {
                if entering {
                    String::new()
                } else {
                    ENDL.to_string()
                }
            }
            NodeKind::Text(literal) => literal.clone(),
            NodeKind::Heading(level) => Self::heading(*level, entering),
            NodeKind::Emph | NodeKind::Strong | NodeKind::BlockQuote => String::new(),
            NodeKind::Code(literal) => literal.clone(),
            NodeKind::CodeBlock { info, literal } => self.code_block(info, literal),
            NodeKind::List(data) => self.list(node, data.marker, entering),
            NodeKind::Item => self.item(parent, entering),
            NodeKind::Link { destination } => self.link(destination, entering),
            NodeKind::Image { destination } => self.image(destination, entering),
            NodeKind::ThematicBreak => "-".repeat(75),
            NodeKind::LineBreak => ENDL.to_string(),
            NodeKind::SoftBreak => {
                if self.options.soft_wrap {
                    ENDL.to_string()
                } else {
                    " ".to_string()
                }
            }
            NodeKind::HtmlInline(html) => Self::html_inline(html),
            NodeKind::HtmlBlock(_) => {
                warn!("ignoring html_block");
                String::new()
            }
            NodeKind::Unknown(tag) => {
                error!("unhandled ast type: {}", tag);
                String::new()
            }
        }
    }

    fn document(&mut self, entering: bool) -> String {
        if entering {
            return String::new();
        }

        if self.footnotes.is_empty() {
            return String::new();
        }

        let mut out = String::from(ENDL);
        for (i, footnote) in self.footnotes.iter().enumerate() {
            out.push_str(&format!("[{}] - {}{}", i + 1, footnote, ENDL));
        }
        out
    }

    fn heading(level: Option<u8>, entering: bool) -> String {
        if entering {
            let level = level.unwrap_or(1).max(1) as usize;
            format!("{} ", "#".repeat(level))
        } else {
            ENDL.to_string()
        }
    }

    /// Lists contribute no content of their own; entering an ordered list
    /// seeds its counter at start - 1 (items increment it), exiting
    /// discards it. Nesting depth is shared across all lists.
    fn list(&mut self, node: &Node, marker: ListMarker, entering: bool) -> String {
        if entering {
            self.list_depth += 1;
            if let ListMarker::Ordered { start } = marker {
                self.counters.insert(node.origin, start - 1);
            }
        } else {
            self.list_depth = self.list_depth.saturating_sub(1);
            if matches!(marker, ListMarker::Ordered { .. }) {
                self.counters.remove(&node.origin);
            }
        }

        String::new()
    }

    fn item(&mut self, parent: Option<&Node>, entering: bool) -> String {
        if !entering {
            return String::new();
        }

        let Some(parent) = parent else {
            error!("item node without a parent list");
            return String::new();
        };
        let NodeKind::List(data) = &parent.kind else {
            error!("item node whose parent is not a list");
            return String::new();
        };

        let marker = match data.marker {
            ListMarker::Ordered { .. } => {
                let counter = self.counters.entry(parent.origin).or_insert(0);
                *counter += 1;
                format!("{}.", counter)
            }
            ListMarker::Bullet { glyph } => glyph.unwrap_or('*').to_string(),
        };

        let indent = " ".repeat(2 * self.list_depth.saturating_sub(1));
        let text = format!("{}{} ", indent, marker);

        // the marker is styled inline, independent of the surrounding text
        self.styler.style.entering("bullet").stylize(&text)
    }

    fn code_block(&mut self, info: &str, literal: &str) -> String {
        let highlighted = highlight::highlight(
            literal,
            info,
            &self.theme.highlight,
            self.options.color_mode,
        );
        let framed = format!(
            "{}{}{}",
            highlighted,
            EscapeSequence::full_reset_string(),
            ENDL
        );

        EscapeSequence::with_bg(CODE_BLOCK_BG, self.options.color_mode).stylize(&framed)
    }

    /// The reference number is assigned on enter and remembered until the
    /// matching exit; a link wrapping an image must not pick up the
    /// image's later number.
    fn link(&mut self, destination: &str, entering: bool) -> String {
        if entering {
            self.footnotes.push(destination.to_string());
            self.pending_refs.push(self.footnotes.len());
            String::new()
        } else {
            let index = self.pending_refs.pop().unwrap_or(self.footnotes.len());
            format!("[{}]", index)
        }
    }

    fn image(&mut self, destination: &str, entering: bool) -> String {
        if entering {
            self.footnotes.push(destination.to_string());
            self.pending_refs.push(self.footnotes.len());
            "<image:".to_string()
        } else {
            let index = self.pending_refs.pop().unwrap_or(self.footnotes.len());
            format!(">[{}]", index)
        }
    }

    /// Narrow substitution table for inline raw markup: a couple of fixed
    /// line-break spellings, matched case-insensitively. Everything else
    /// passes through literally.
    fn html_inline(html: &str) -> String {
        let lowered = html.trim().to_lowercase();
        if lowered == "<br>" || lowered == "<br/>" {
            ENDL.to_string()
        } else {
            html.to_string()
        }
    }
}
