use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::parser::types::{ListData, ListMarker, Node, NodeKind};

/// Adapts the external CommonMark parser's event stream into the document
/// tree the renderer walks. Start/End events open and close containers;
/// everything else becomes a leaf under the innermost open container.
pub struct TreeBuilder {
    next_origin: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { next_origin: 0 }
    }

    pub fn parse(mut self, markdown: &str) -> Node {
        let mut stack: Vec<Node> = vec![self.node(NodeKind::Document)];

        for event in Parser::new_ext(markdown, Options::empty()) {
            match event {
                Event::Start(tag) => {
                    let node = self.node(Self::kind_for(&tag));
                    stack.push(node);
                }
                Event::End(_) => {
                    // the builder opened one node per Start, so the stack
                    // cannot underflow here
                    if let Some(mut node) = stack.pop() {
                        if node.kind == NodeKind::Item {
                            self.normalize_item(&mut node);
                        }
                        Self::attach(&mut stack, node);
                    }
                }
                Event::Text(text) => {
                    // code blocks gather their literal instead of growing
                    // text children
                    if let Some(Node {
                        kind: NodeKind::CodeBlock { literal, .. },
                        ..
                    }) = stack.last_mut()
                    {
                        literal.push_str(&text);
                    } else {
                        let leaf = self.node(NodeKind::Text(text.to_string()));
                        Self::attach(&mut stack, leaf);
                    }
                }
                Event::Code(text) => {
                    let leaf = self.node(NodeKind::Code(text.to_string()));
                    Self::attach(&mut stack, leaf);
                }
                Event::Html(html) => {
                    // pulldown-cmark emits one Html event for both flavors;
                    // classify by the innermost inline-bearing container
                    let kind = if Self::in_inline_context(&stack) {
                        NodeKind::HtmlInline(html.to_string())
                    } else {
                        NodeKind::HtmlBlock(html.to_string())
                    };
                    let leaf = self.node(kind);
                    Self::attach(&mut stack, leaf);
                }
                Event::SoftBreak => {
                    let leaf = self.node(NodeKind::SoftBreak);
                    Self::attach(&mut stack, leaf);
                }
                Event::HardBreak => {
                    let leaf = self.node(NodeKind::LineBreak);
                    Self::attach(&mut stack, leaf);
                }
                Event::Rule => {
                    let leaf = self.node(NodeKind::ThematicBreak);
                    Self::attach(&mut stack, leaf);
                }
                Event::FootnoteReference(_) => {
                    let leaf = self.node(NodeKind::Unknown("footnote_reference".into()));
                    Self::attach(&mut stack, leaf);
                }
                Event::TaskListMarker(_) => {
                    let leaf = self.node(NodeKind::Unknown("task_list_marker".into()));
                    Self::attach(&mut stack, leaf);
                }
            }
        }

        // unterminated containers collapse into the document
        while stack.len() > 1 {
            if let Some(node) = stack.pop() {
                Self::attach(&mut stack, node);
            }
        }

        stack.pop().unwrap_or_else(|| Node::new(NodeKind::Document, 0))
    }

    fn node(&mut self, kind: NodeKind) -> Node {
        let origin = self.next_origin;
        self.next_origin += 1;
        Node::new(kind, origin)
    }

    fn attach(stack: &mut Vec<Node>, node: Node) {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn kind_for(tag: &Tag) -> NodeKind {
        match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading(level, _, _) => NodeKind::Heading(Some(*level as u8)),
            Tag::BlockQuote => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .unwrap_or("")
                        .to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                NodeKind::CodeBlock {
                    info,
                    literal: String::new(),
                }
            }
            Tag::List(Some(start)) => NodeKind::List(ListData {
                marker: ListMarker::Ordered {
                    start: *start as i64,
                },
            }),
            Tag::List(None) => NodeKind::List(ListData {
                marker: ListMarker::Bullet { glyph: None },
            }),
            Tag::Item => NodeKind::Item,
            Tag::Emphasis => NodeKind::Emph,
            Tag::Strong => NodeKind::Strong,
            Tag::Link(_, destination, _) => NodeKind::Link {
                destination: destination.to_string(),
            },
            Tag::Image(_, destination, _) => NodeKind::Image {
                destination: destination.to_string(),
            },
            Tag::FootnoteDefinition(_) => NodeKind::Unknown("footnote_definition".into()),
            Tag::Table(_) => NodeKind::Unknown("table".into()),
            Tag::TableHead => NodeKind::Unknown("table_head".into()),
            Tag::TableRow => NodeKind::Unknown("table_row".into()),
            Tag::TableCell => NodeKind::Unknown("table_cell".into()),
            Tag::Strikethrough => NodeKind::Unknown("strikethrough".into()),
        }
    }

    fn in_inline_context(stack: &[Node]) -> bool {
        for node in stack.iter().rev() {
            match node.kind {
                NodeKind::Paragraph | NodeKind::Heading(_) | NodeKind::Item => return true,
                NodeKind::Document | NodeKind::BlockQuote | NodeKind::List(_) => return false,
                _ => {}
            }
        }
        false
    }

    /// Tight list items carry inline content directly; wrap the leading
    /// inline run in a synthetic paragraph so both list flavors produce
    /// the same tree shape (and the same one-item-per-line output).
    fn normalize_item(&mut self, item: &mut Node) {
        let leading = item
            .children
            .iter()
            .take_while(|child| child.kind.is_inline())
            .count();
        if leading == 0 {
            return;
        }

        let rest = item.children.split_off(leading);
        let inline = std::mem::take(&mut item.children);

        let mut paragraph = self.node(NodeKind::Paragraph);
        paragraph.children = inline;

        item.children.push(paragraph);
        item.children.extend(rest);
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse markdown text into a document tree.
pub fn parse(markdown: &str) -> Node {
    TreeBuilder::new().parse(markdown)
}
