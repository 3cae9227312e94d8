use tree_sitter::Node;

/// Zero-based line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

pub fn node_to_position(node: &Node, start: bool) -> Position {
    let point = if start {
        node.start_position()
    } else {
        node.end_position()
    };
    Position {
        line: point.row as u32,
        character: point.column as u32,
    }
}

pub fn node_text<'src>(node: &Node, source: &'src str) -> &'src str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Named children of `node`, skipping comments (which tree-sitter attaches
/// anywhere as extras).
pub fn named_children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}
