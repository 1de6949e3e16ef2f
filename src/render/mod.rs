//! Rendering layer: node templates and the display-math environment pass.

pub mod environments;
mod tex;

pub use environments::{environment_type, find_regions, process_environments, Region};
pub use tex::TexRenderer;

use crate::ast::Node;
use crate::config::RenderConfig;
use crate::diagnostics::Diagnostic;
use crate::fragments::Fragments;

/// Rendered output together with the diagnostics raised producing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render a single node.
pub fn render(node: &Node, fragments: &Fragments, config: &RenderConfig) -> Rendered {
    let mut renderer = TexRenderer::new(config, fragments);
    let output = renderer.render(node);
    Rendered {
        output,
        diagnostics: renderer.into_diagnostics(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, BlockKind, Section};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_single_node() {
        let config = RenderConfig::default();
        let node = Node::Block(Block::new(BlockKind::Paragraph, "Hello"));
        let rendered = render(&node, &Fragments::default(), &config);
        assert_eq!(rendered.output, "Hello\n\n");
        assert!(rendered.diagnostics.is_empty());
    }

    #[test]
    fn test_render_collects_diagnostics() {
        let config = RenderConfig {
            quiet: true,
            ..Default::default()
        };
        let node = Node::Section(Section {
            level: 7,
            title: "Deep".to_string(),
            content: String::new(),
        });
        let rendered = render(&node, &Fragments::default(), &config);
        assert_eq!(rendered.output, "");
        assert_eq!(
            rendered.diagnostics,
            vec![Diagnostic::UnsupportedSectionLevel {
                level: 7,
                title: "Deep".to_string(),
            }]
        );
    }
}
