//! Tagged node types handed to the renderer.
//!
//! The external parser's tree is converted once into these types (see
//! [`crate::source`]). Each node carries its variant as the enum case and a
//! variant-specific kind; kinds the renderer has no rule for are kept as
//! `Other(name)` so they can be reported instead of rejected.
//!
//! By the time a node is built its `content` is final text: children are
//! always rendered before their parent.

use std::collections::BTreeMap;

/// String attributes attached to a node (`role`, `toc`, ...).
pub type Attributes = BTreeMap<String, String>;

/// A node ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document(Document),
    Section(Section),
    List(List),
    Block(Block),
    Inline(Inline),
}

impl Node {
    /// Name of the variant, used in verbose traces.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Node::Document(_) => "document",
            Node::Section(_) => "section",
            Node::List(_) => "list",
            Node::Block(_) => "block",
            Node::Inline(_) => "inline",
        }
    }
}

/// The document root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Document title (header title)
    pub title: Option<String>,
    /// Author line
    pub author: Option<String>,
    /// Revision date
    pub date: Option<String>,
    pub attributes: Attributes,
    /// Rendered body
    pub content: String,
}

impl Document {
    /// Whether a table of contents was requested with the `toc` attribute.
    pub fn has_toc(&self) -> bool {
        self.attributes.contains_key("toc")
    }
}

/// A section heading with its rendered body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    /// Nesting depth; 1 through 5 have a sectioning command
    pub level: u32,
    pub title: String,
    pub content: String,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

/// List flavours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
    Other(String),
}

impl ListKind {
    /// Parse a list kind from its name (`olist`, `ordered`, `ulist`, ...).
    pub fn from_name(name: &str) -> Self {
        match strip_symbol(name) {
            "olist" | "ordered" => Self::Ordered,
            "ulist" | "unordered" => Self::Unordered,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Ordered => "ordered",
            Self::Unordered => "unordered",
            Self::Other(name) => name,
        }
    }
}

/// One list entry: its own text plus any rendered nested content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub text: String,
    /// Rendered nested blocks (empty when the item has none)
    pub content: String,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            content: String::new(),
        }
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Block style, e.g. the admonition label (`NOTE`, `TIP`, ...)
    pub style: Option<String>,
    pub content: String,
    /// Raw source lines, only consulted for diagnostics
    pub lines: Vec<String>,
}

impl Block {
    /// Create a block with the given kind and rendered content.
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            style: None,
            content: content.into(),
            lines: Vec::new(),
        }
    }
}

/// Block kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Display math
    Stem,
    Admonition,
    PageBreak,
    /// Verbatim text
    Literal,
    /// Raw LaTeX passthrough
    Pass,
    Other(String),
}

impl BlockKind {
    /// Parse a block kind from its name. A leading `:` is ignored.
    pub fn from_name(name: &str) -> Self {
        match strip_symbol(name) {
            "paragraph" => Self::Paragraph,
            "stem" => Self::Stem,
            "admonition" => Self::Admonition,
            "page_break" => Self::PageBreak,
            "literal" | "listing" => Self::Literal,
            "pass" => Self::Pass,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Stem => "stem",
            Self::Admonition => "admonition",
            Self::PageBreak => "page_break",
            Self::Literal => "literal",
            Self::Pass => "pass",
            Self::Other(name) => name,
        }
    }
}

/// An inline span.
#[derive(Debug, Clone, PartialEq)]
pub struct Inline {
    pub kind: InlineKind,
    pub text: String,
    /// Link or reference target (anchors only)
    pub target: Option<String>,
    pub attributes: Attributes,
}

impl Inline {
    pub fn new(kind: InlineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            target: None,
            attributes: Attributes::new(),
        }
    }

    /// Set the anchor target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the styling role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.attributes.insert("role".to_string(), role.into());
        self
    }

    /// The styling role, if any.
    pub fn role(&self) -> Option<&str> {
        self.attributes.get("role").map(String::as_str)
    }
}

/// Inline kinds, two levels deep for quoted text and anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineKind {
    Quoted(QuotedKind),
    Anchor(AnchorKind),
    LineBreak,
    /// An inline node name with no rule, e.g. `inline_footnote`
    Other(String),
}

impl InlineKind {
    pub fn name(&self) -> String {
        match self {
            Self::Quoted(kind) => format!("quoted:{}", kind.name()),
            Self::Anchor(kind) => format!("anchor:{}", kind.name()),
            Self::LineBreak => "line_break".to_string(),
            Self::Other(name) => name.clone(),
        }
    }
}

/// Quoted text kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotedKind {
    Strong,
    Emphasis,
    Math,
    Monospace,
    /// Unformatted text styled only through its role
    Plain,
    Other(String),
}

impl QuotedKind {
    pub fn from_name(name: &str) -> Self {
        match strip_symbol(name) {
            "strong" => Self::Strong,
            "emphasis" => Self::Emphasis,
            "math" | "asciimath" | "latexmath" => Self::Math,
            "monospaced" | "monospace" => Self::Monospace,
            "unquoted" | "plain" => Self::Plain,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Math => "math",
            Self::Monospace => "monospace",
            Self::Plain => "plain",
            Self::Other(name) => name,
        }
    }
}

/// Anchor kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorKind {
    Link,
    /// A location marker, e.g. `[[fig1]]`
    Label,
    /// A reference to a marker, e.g. `<<fig1>>`
    CrossReference,
    Other(String),
}

impl AnchorKind {
    pub fn from_name(name: &str) -> Self {
        match strip_symbol(name) {
            "link" => Self::Link,
            "ref" | "label" => Self::Label,
            "xref" | "cross_reference" => Self::CrossReference,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Link => "link",
            Self::Label => "label",
            Self::CrossReference => "cross_reference",
            Self::Other(name) => name,
        }
    }
}

/// Kinds may arrive in Ruby symbol spelling (`:paragraph`).
fn strip_symbol(name: &str) -> &str {
    name.strip_prefix(':').unwrap_or(name)
}
