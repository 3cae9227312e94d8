use crate::{
    error::{Error, Result},
    parser::{declarations::DeclarationCollector, utils::node_to_position},
    syntax::GoFile,
};
use std::path::Path;
use tree_sitter::{Node, Parser};

pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::TreeSitterError("Failed to parse source code".to_string()))
    }

    /// Parses one compilation unit into its declaration model.
    ///
    /// Unlike tree-sitter itself, this rejects any source containing syntax
    /// errors: a recovered tree could silently drop methods or imports.
    pub fn parse_file(&mut self, path: &Path, source: &str) -> Result<GoFile> {
        let tree = self.parse(source)?;
        let root = tree.root_node();

        if root.has_error() {
            let reason = match first_error(root) {
                Some(node) => {
                    let pos = node_to_position(&node, true);
                    format!(
                        "{}:{}:{}: syntax error",
                        path.display(),
                        pos.line + 1,
                        pos.character + 1
                    )
                }
                None => format!("{}: syntax error", path.display()),
            };
            return Err(Error::ParseFailure {
                location: path.display().to_string(),
                reason,
            });
        }

        Ok(DeclarationCollector::new(source).collect(path, &root))
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}
