//! The external parser's node tree and the walk that renders it.
//!
//! The tree arrives as JSON using Asciidoctor node names (`section`,
//! `ulist`, `paragraph`, `inline_quoted`, ...). [`convert`] walks it bottom
//! up: every node's children are rendered first, then the node is turned into
//! a tagged [`Node`] carrying that rendered text and handed to the renderer.

use crate::ast::{
    AnchorKind, Attributes, Block, BlockKind, Document, Inline, InlineKind, List, ListItem,
    ListKind, Node, QuotedKind, Section,
};
use crate::config::RenderConfig;
use crate::error::{Result, SourceError};
use crate::fragments::Fragments;
use crate::render::{Rendered, TexRenderer};
use serde::Deserialize;
use std::path::Path;

/// A node as produced by the parser.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceNode {
    /// Node name, e.g. `section` or `inline_anchor`
    pub name: String,
    /// Sub-kind for generic and inline nodes (`strong`, `xref`, `:custom`)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub level: Option<u32>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub target: Option<String>,
    pub style: Option<String>,
    /// Raw block text, used instead of rendered children when present
    pub source: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub attributes: Attributes,
    pub lines: Vec<String>,
    pub children: Vec<SourceNode>,
    pub items: Vec<SourceItem>,
}

/// A list entry as produced by the parser.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceItem {
    pub text: String,
    pub children: Vec<SourceNode>,
}

impl SourceNode {
    /// Parse a node tree from JSON.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input).map_err(SourceError::Json)?)
    }

    /// Read a node tree from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&text)
    }

    /// An empty node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A plain text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            name: "text".to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    fn is_inline(&self) -> bool {
        self.name == "text" || self.name.starts_with("inline_")
    }
}

/// Which tagged variant a source node becomes. `text` leaves become none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Document,
    Section,
    List,
    Block,
    Inline,
}

fn classify(name: &str) -> Option<Class> {
    match name {
        "document" => Some(Class::Document),
        "section" => Some(Class::Section),
        "ulist" | "olist" | "list" => Some(Class::List),
        "paragraph" | "stem" | "admonition" | "page_break" | "literal" | "listing" | "pass"
        | "block" => Some(Class::Block),
        name if name.starts_with("inline_") => Some(Class::Inline),
        _ => None,
    }
}

/// Render a whole source tree.
///
/// A `document` root yields a complete LaTeX file; any other root yields the
/// rendered fragment only.
pub fn convert(root: &SourceNode, fragments: &Fragments, config: &RenderConfig) -> Rendered {
    let mut walker = Walker {
        renderer: TexRenderer::new(config, fragments),
    };
    let output = walker.walk(root);
    Rendered {
        output,
        diagnostics: walker.renderer.into_diagnostics(),
    }
}

struct Walker<'a> {
    renderer: TexRenderer<'a>,
}

impl Walker<'_> {
    fn walk(&mut self, node: &SourceNode) -> String {
        if node.name == "text" {
            return node.text.clone().unwrap_or_default();
        }

        let tagged = match classify(&node.name) {
            Some(class) => self.build(class, node),
            None => {
                self.renderer.report_unknown_node(&node.name);
                return String::new();
            }
        };
        self.renderer.render(&tagged)
    }

    /// Render children in order. Block siblings are separated by a newline,
    /// inline siblings run together.
    fn walk_children(&mut self, children: &[SourceNode]) -> String {
        let separator = if children.iter().all(SourceNode::is_inline) {
            ""
        } else {
            "\n"
        };
        children
            .iter()
            .map(|child| self.walk(child))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn build(&mut self, class: Class, node: &SourceNode) -> Node {
        match class {
            Class::Document => Node::Document(Document {
                title: node.title.clone(),
                author: node.author.clone(),
                date: node.date.clone(),
                attributes: node.attributes.clone(),
                content: self.walk_children(&node.children),
            }),
            Class::Section => Node::Section(Section {
                level: node.level.unwrap_or_default(),
                title: node.title.clone().unwrap_or_default(),
                content: self.walk_children(&node.children),
            }),
            Class::List => {
                let kind = match node.name.as_str() {
                    "list" => ListKind::from_name(node.kind.as_deref().unwrap_or_default()),
                    name => ListKind::from_name(name),
                };
                let items = node
                    .items
                    .iter()
                    .map(|item| ListItem {
                        text: item.text.clone(),
                        content: self.walk_children(&item.children),
                    })
                    .collect();
                Node::List(List { kind, items })
            }
            Class::Block => {
                let kind = match node.name.as_str() {
                    "block" => BlockKind::from_name(node.kind.as_deref().unwrap_or_default()),
                    name => BlockKind::from_name(name),
                };
                let content = match (&node.source, &node.text) {
                    (Some(source), _) => source.clone(),
                    (None, Some(text)) if node.children.is_empty() => text.clone(),
                    _ => self.walk_children(&node.children),
                };
                Node::Block(Block {
                    kind,
                    style: node.style.clone(),
                    content,
                    lines: node.lines.clone(),
                })
            }
            Class::Inline => {
                let sub = node.kind.as_deref().unwrap_or_default();
                let kind = match node.name.as_str() {
                    "inline_quoted" => InlineKind::Quoted(QuotedKind::from_name(sub)),
                    "inline_anchor" => InlineKind::Anchor(AnchorKind::from_name(sub)),
                    "inline_break" => InlineKind::LineBreak,
                    other => InlineKind::Other(other.to_string()),
                };
                let text = match &node.text {
                    Some(text) => text.clone(),
                    None => self.walk_children(&node.children),
                };
                Node::Inline(Inline {
                    kind,
                    text,
                    target: node.target.clone(),
                    attributes: node.attributes.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use pretty_assertions::assert_eq;

    fn run(root: &SourceNode) -> Rendered {
        let config = RenderConfig {
            quiet: true,
            ..Default::default()
        };
        convert(root, &Fragments::default(), &config)
    }

    fn inline(name: &str, kind: &str, text: &str) -> SourceNode {
        SourceNode {
            kind: Some(kind.to_string()),
            text: Some(text.to_string()),
            ..SourceNode::new(name)
        }
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "name": "section",
            "level": 2,
            "title": "Methods",
            "children": [{ "name": "paragraph", "children": [{ "name": "text", "text": "Hi" }] }]
        }"#;
        let node = SourceNode::from_json(json).unwrap();
        assert_eq!(node.level, Some(2));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].children[0], SourceNode::text("Hi"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(SourceNode::from_json("{ \"name\": ").is_err());
    }

    #[test]
    fn test_paragraph_with_inlines() {
        let paragraph = SourceNode {
            children: vec![
                SourceNode::text("Some "),
                inline("inline_quoted", "strong", "bold"),
                SourceNode::text(" and "),
                inline("inline_quoted", ":emphasis", "italic"),
                SourceNode::text(" text."),
            ],
            ..SourceNode::new("paragraph")
        };
        assert_eq!(
            run(&paragraph).output,
            "Some \\textbf{bold} and \\emph{italic} text.\n\n"
        );
    }

    #[test]
    fn test_nested_inline_text() {
        let strong = SourceNode {
            kind: Some("strong".to_string()),
            children: vec![
                SourceNode::text("very "),
                inline("inline_quoted", "emphasis", "much"),
            ],
            ..SourceNode::new("inline_quoted")
        };
        assert_eq!(run(&strong).output, "\\textbf{very \\emph{much}}");
    }

    #[test]
    fn test_section_children_are_rendered_first() {
        let section = SourceNode {
            level: Some(1),
            title: Some("Intro".to_string()),
            children: vec![
                SourceNode {
                    children: vec![SourceNode::text("One")],
                    ..SourceNode::new("paragraph")
                },
                SourceNode {
                    children: vec![SourceNode::text("Two")],
                    ..SourceNode::new("paragraph")
                },
            ],
            ..SourceNode::new("section")
        };
        assert_eq!(
            run(&section).output,
            "\\section{Intro}\n\nOne\n\n\nTwo\n\n\n\n"
        );
    }

    #[test]
    fn test_list_items_in_order() {
        let list = SourceNode {
            items: vec![
                SourceItem {
                    text: "a".to_string(),
                    children: vec![],
                },
                SourceItem {
                    text: "b".to_string(),
                    children: vec![SourceNode {
                        items: vec![SourceItem {
                            text: "b1".to_string(),
                            children: vec![],
                        }],
                        ..SourceNode::new("olist")
                    }],
                },
            ],
            ..SourceNode::new("ulist")
        };
        let output = run(&list).output;
        assert_eq!(
            output,
            "\\begin{itemize}\n\n\\item a\n\n\\item b\n\n\
             \\begin{enumerate}\n\n\\item b1\n\n\\end{enumerate}\n\n\
             \\end{itemize}\n\n"
        );
    }

    #[test]
    fn test_stem_uses_source() {
        let stem = SourceNode {
            source: Some("x^2+y^2=z^2".to_string()),
            ..SourceNode::new("stem")
        };
        assert_eq!(run(&stem).output, "x^2+y^2=z^2");
    }

    #[test]
    fn test_generic_block_kind() {
        let custom = SourceNode {
            kind: Some(":custom".to_string()),
            source: Some("whatever".to_string()),
            ..SourceNode::new("block")
        };
        let rendered = run(&custom);
        assert_eq!(rendered.output, "");
        assert!(matches!(
            &rendered.diagnostics[..],
            [Diagnostic::UnrecognizedKind { variant: "block", kind, .. }] if kind == "custom"
        ));
    }

    #[test]
    fn test_unknown_node_is_skipped() {
        let section = SourceNode {
            level: Some(1),
            title: Some("T".to_string()),
            children: vec![
                SourceNode::new("table"),
                SourceNode {
                    children: vec![SourceNode::text("kept")],
                    ..SourceNode::new("paragraph")
                },
            ],
            ..SourceNode::new("section")
        };
        let rendered = run(&section);
        assert!(rendered.output.contains("kept\n\n"));
        assert_eq!(
            rendered.diagnostics,
            vec![Diagnostic::UnrecognizedVariant {
                name: "table".to_string()
            }]
        );
    }

    #[test]
    fn test_anchor_nodes() {
        let xref = SourceNode {
            target: Some("#fig1".to_string()),
            ..inline("inline_anchor", "xref", "Figure 1")
        };
        assert_eq!(run(&xref).output, "\\ref{fig1}");

        let link = SourceNode {
            target: Some("http://foo.com".to_string()),
            ..inline("inline_anchor", "link", "Nerdy Stuff")
        };
        assert_eq!(run(&link).output, "\\href{http://foo.com}{Nerdy Stuff}");
    }

    #[test]
    fn test_unknown_inline_node() {
        let footnote = inline("inline_footnote", "", "note");
        let rendered = run(&footnote);
        assert_eq!(rendered.output, "");
        assert_eq!(rendered.diagnostics.len(), 1);
    }
}
