/// Ordering mode for a list: ordered with a start value, or bulleted with
/// an optional glyph (`*` when unspecified).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Ordered { start: i64 },
    Bullet { glyph: Option<char> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListData {
    pub marker: ListMarker,
}

/// The closed set of semantic node kinds the renderer understands. The
/// `Unknown` arm carries the source tag name so dispatch can log it and
/// degrade gracefully instead of halting the walk.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Text(String),
    Heading(Option<u8>),
    Emph,
    Strong,
    BlockQuote,
    Code(String),
    CodeBlock { info: String, literal: String },
    List(ListData),
    Item,
    Link { destination: String },
    Image { destination: String },
    ThematicBreak,
    LineBreak,
    SoftBreak,
    HtmlInline(String),
    HtmlBlock(String),
    Unknown(String),
}

impl NodeKind {
    /// Atomic kinds get a single combined enter+exit visit; everything
    /// else is visited once entering and once exiting.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            NodeKind::Text(_)
                | NodeKind::Code(_)
                | NodeKind::CodeBlock { .. }
                | NodeKind::ThematicBreak
                | NodeKind::LineBreak
                | NodeKind::SoftBreak
                | NodeKind::HtmlInline(_)
                | NodeKind::HtmlBlock(_)
        )
    }

    /// Inline kinds, used when normalizing tight list items.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::Text(_)
                | NodeKind::Code(_)
                | NodeKind::Emph
                | NodeKind::Strong
                | NodeKind::Link { .. }
                | NodeKind::Image { .. }
                | NodeKind::LineBreak
                | NodeKind::SoftBreak
                | NodeKind::HtmlInline(_)
        )
    }

    /// A short tag name for diagnostics.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text(_) => "text",
            NodeKind::Heading(_) => "heading",
            NodeKind::Emph => "emph",
            NodeKind::Strong => "strong",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::Code(_) => "code",
            NodeKind::CodeBlock { .. } => "code_block",
            NodeKind::List(_) => "list",
            NodeKind::Item => "item",
            NodeKind::Link { .. } => "link",
            NodeKind::Image { .. } => "image",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::LineBreak => "linebreak",
            NodeKind::SoftBreak => "softbreak",
            NodeKind::HtmlInline(_) => "html_inline",
            NodeKind::HtmlBlock(_) => "html_block",
            NodeKind::Unknown(tag) => tag,
        }
    }
}

/// An element of the document tree. The renderer treats nodes as
/// read-only. `origin` is a stable per-construct id assigned in source
/// order, unique across the whole tree; ordered lists use it as their
/// counter key.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub origin: usize,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, origin: usize) -> Self {
        Self {
            kind,
            origin,
            children: Vec::new(),
        }
    }
}
