//! LaTeX renderer for tagged nodes.

use crate::ast::{
    AnchorKind, Block, BlockKind, Document, Inline, InlineKind, List, ListKind, Node, QuotedKind,
    Section,
};
use crate::config::RenderConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::fragments::Fragments;
use crate::render::environments::{environment_type, is_self_delimiting, process_environments};

/// Sectioning commands for levels 1 through 5.
const SECTION_COMMANDS: [&str; 5] = [
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// Renders one node at a time. Holds no state between nodes besides the
/// diagnostics raised so far.
pub struct TexRenderer<'a> {
    config: &'a RenderConfig,
    fragments: &'a Fragments,
    diagnostics: Diagnostics,
}

impl<'a> TexRenderer<'a> {
    pub fn new(config: &'a RenderConfig, fragments: &'a Fragments) -> Self {
        Self {
            config,
            fragments,
            diagnostics: Diagnostics::new(config.quiet),
        }
    }

    /// Render a node whose content is already rendered.
    ///
    /// Never fails: a node with no rule reports a diagnostic and renders empty.
    pub fn render(&mut self, node: &Node) -> String {
        if self.config.verbose {
            tracing::trace!(variant = node.variant_name(), "Rendering node");
        }

        match node {
            Node::Document(doc) => self.render_document(doc),
            Node::Section(section) => self.render_section(section),
            Node::List(list) => self.render_list(list),
            Node::Block(block) => self.render_block(block),
            Node::Inline(inline) => self.render_inline(inline),
        }
    }

    /// Record a node the caller could not classify into a variant.
    pub fn report_unknown_node(&mut self, name: &str) {
        self.diagnostics.report(Diagnostic::UnrecognizedVariant {
            name: name.to_string(),
        });
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_vec()
    }

    fn render_document(&mut self, doc: &Document) -> String {
        if self.config.verbose {
            tracing::debug!(title = ?doc.title, toc = doc.has_toc(), "Node: document");
        }

        let mut output = self.fragments.concat();

        // Front matter
        output.push_str(&format!(
            "\n\n\\title{{{}}}\n",
            doc.title.as_deref().unwrap_or_default()
        ));
        output.push_str(&format!(
            "\\author{{{}}}\n",
            doc.author.as_deref().unwrap_or_default()
        ));
        output.push_str(&format!(
            "\\date{{{}}}\n\n\n",
            doc.date.as_deref().unwrap_or_default()
        ));
        output.push_str("\n\n\\begin{document}\n");
        output.push_str("\\maketitle\n\n\n");

        if doc.has_toc() {
            output.push_str("\\tableofcontents\n\n\n");
        }

        output.push_str(&process_environments(&doc.content));
        output.push_str("\n\n\\end{document}\n\n");

        output
    }

    fn render_section(&mut self, section: &Section) -> String {
        if self.config.verbose {
            tracing::debug!(level = section.level, title = %section.title, "Node: section");
        }

        let command = (section.level as usize)
            .checked_sub(1)
            .and_then(|i| SECTION_COMMANDS.get(i));

        match command {
            Some(command) => format!(
                "\\{}{{{}}}\n\n{}\n\n",
                command, section.title, section.content
            ),
            None => {
                self.diagnostics.report(Diagnostic::UnsupportedSectionLevel {
                    level: section.level,
                    title: section.title.clone(),
                });
                String::new()
            }
        }
    }

    fn render_list(&mut self, list: &List) -> String {
        if self.config.verbose {
            tracing::debug!(kind = list.kind.name(), items = list.items.len(), "Node: list");
        }

        let env = match list.kind {
            ListKind::Unordered => "itemize",
            ListKind::Ordered => "enumerate",
            ListKind::Other(ref kind) => {
                self.diagnostics.report(Diagnostic::UnrecognizedKind {
                    variant: "list",
                    kind: kind.clone(),
                    excerpt: None,
                });
                return String::new();
            }
        };

        let mut output = format!("\\begin{{{}}}\n\n", env);
        for item in &list.items {
            if self.config.verbose {
                tracing::debug!(text = %item.text, "  item");
            }
            output.push_str(&format!("\\item {}\n\n", item.text));
            output.push_str(&item.content);
        }
        output.push_str(&format!("\\end{{{}}}\n\n", env));

        output
    }

    fn render_block(&mut self, block: &Block) -> String {
        if self.config.verbose {
            tracing::debug!(kind = block.kind.name(), "Node: block");
        }

        match block.kind {
            BlockKind::Paragraph => format!("{}\n\n", block.content),
            BlockKind::Stem => {
                if is_self_delimiting(environment_type(&block.content)) {
                    block.content.clone()
                } else {
                    format!("\\[\n{}\n\\]\n", block.content)
                }
            }
            BlockKind::Admonition => {
                let style = block.style.as_deref().unwrap_or("note").to_uppercase();
                format!("\\admonition{{{}}}{{{}}}\n\n", style, block.content)
            }
            BlockKind::PageBreak => "\\newpage\n\n".to_string(),
            BlockKind::Literal => {
                format!("\\begin{{verbatim}}\n{}\n\\end{{verbatim}}\n\n", block.content)
            }
            BlockKind::Pass => block.content.clone(),
            BlockKind::Other(ref kind) => {
                self.diagnostics.report(Diagnostic::UnrecognizedKind {
                    variant: "block",
                    kind: kind.clone(),
                    excerpt: block.lines.first().cloned(),
                });
                String::new()
            }
        }
    }

    fn render_inline(&mut self, inline: &Inline) -> String {
        if self.config.verbose {
            tracing::debug!(
                kind = %inline.kind.name(),
                text = %inline.text,
                target = ?inline.target,
                "Node: inline"
            );
        }

        match inline.kind {
            InlineKind::Quoted(ref kind) => self.render_quoted(kind, inline),
            InlineKind::Anchor(ref kind) => self.render_anchor(kind, inline),
            InlineKind::LineBreak => format!("{} \\\\\n", inline.text),
            InlineKind::Other(ref kind) => self.unknown_inline(kind),
        }
    }

    fn render_quoted(&mut self, kind: &QuotedKind, inline: &Inline) -> String {
        let text = &inline.text;
        match kind {
            QuotedKind::Strong => format!("\\textbf{{{}}}", text),
            QuotedKind::Emphasis => format!("\\emph{{{}}}", text),
            QuotedKind::Math => format!("${}$", text),
            QuotedKind::Monospace => format!("\\texttt{{{}}}", text),
            QuotedKind::Plain => match inline.role() {
                None => text.clone(),
                Some(role) => match self.config.apply_role(role, text) {
                    Some(styled) => styled,
                    None => {
                        self.diagnostics.report(Diagnostic::UnrecognizedRole {
                            role: role.to_string(),
                            text: text.clone(),
                        });
                        String::new()
                    }
                },
            },
            QuotedKind::Other(kind) => self.unknown_inline(&format!("quoted:{}", kind)),
        }
    }

    fn render_anchor(&mut self, kind: &AnchorKind, inline: &Inline) -> String {
        let target = inline.target.as_deref().unwrap_or_default();
        match kind {
            AnchorKind::Link => {
                let text = if inline.text.is_empty() {
                    target
                } else {
                    inline.text.as_str()
                };
                format!("\\href{{{}}}{{{}}}", target, text)
            }
            AnchorKind::Label => {
                let id = if inline.text.is_empty() {
                    target
                } else {
                    inline.text.as_str()
                };
                format!("\\label{{{}}}", id.trim_matches(|c| c == '[' || c == ']'))
            }
            AnchorKind::CrossReference => {
                let id = if target.is_empty() {
                    inline.text.as_str()
                } else {
                    target
                };
                format!("\\ref{{{}}}", id.strip_prefix('#').unwrap_or(id))
            }
            AnchorKind::Other(kind) => self.unknown_inline(&format!("anchor:{}", kind)),
        }
    }

    fn unknown_inline(&mut self, kind: &str) -> String {
        self.diagnostics.report(Diagnostic::UnrecognizedKind {
            variant: "inline",
            kind: kind.to_string(),
            excerpt: None,
        });
        String::new()
    }
}
