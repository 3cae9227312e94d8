//! Conversion of a tree-sitter-go syntax tree into the declaration model.

use super::utils::{named_children, node_text};
use crate::syntax::{
    ChanDir, Field, GoFile, ImportSpec, InterfaceElem, Signature, TypeExpr, TypeSpec,
};
use std::path::Path;
use tree_sitter::Node;

pub struct DeclarationCollector<'src> {
    source: &'src str,
}

impl<'src> DeclarationCollector<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source }
    }

    /// Walks the top-level declarations of a file. Type declarations nested in
    /// function bodies are not visible to other packages and are skipped.
    pub fn collect(&self, path: &Path, root: &Node) -> GoFile {
        let mut file = GoFile {
            path: path.to_path_buf(),
            package: String::new(),
            imports: Vec::new(),
            types: Vec::new(),
        };

        for node in named_children(root) {
            match node.kind() {
                "package_clause" => {
                    if let Some(name) = named_children(&node).first() {
                        file.package = self.text(name).to_string();
                    }
                }
                "import_declaration" => self.collect_imports(&node, &mut file.imports),
                "type_declaration" => self.collect_types(&node, &mut file.types),
                _ => {}
            }
        }

        file
    }

    fn text(&self, node: &Node) -> &'src str {
        node_text(node, self.source)
    }

    fn collect_imports(&self, node: &Node, imports: &mut Vec<ImportSpec>) {
        for child in named_children(node) {
            match child.kind() {
                "import_spec" => {
                    if let Some(spec) = self.import_spec(&child) {
                        imports.push(spec);
                    }
                }
                "import_spec_list" => self.collect_imports(&child, imports),
                _ => {}
            }
        }
    }

    fn import_spec(&self, node: &Node) -> Option<ImportSpec> {
        let path = node.child_by_field_name("path")?;
        let path = self
            .text(&path)
            .trim_matches(|c| c == '"' || c == '`')
            .to_string();
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_string());
        Some(ImportSpec { name, path })
    }

    fn collect_types(&self, node: &Node, types: &mut Vec<TypeSpec>) {
        for child in named_children(node) {
            let is_alias = match child.kind() {
                "type_spec" => false,
                "type_alias" => true,
                _ => continue,
            };
            let Some(name) = child.child_by_field_name("name") else {
                continue;
            };
            let type_params = child
                .child_by_field_name("type_parameters")
                .map(|list| self.type_parameter_names(&list))
                .unwrap_or_default();
            types.push(TypeSpec {
                name: self.text(&name).to_string(),
                type_params,
                is_alias,
                ty: self.required_type(&child, "type"),
            });
        }
    }

    fn type_parameter_names(&self, list: &Node) -> Vec<String> {
        let mut names = Vec::new();
        for decl in named_children(list) {
            let mut cursor = decl.walk();
            names.extend(
                decl.children_by_field_name("name", &mut cursor)
                    .map(|n| self.text(&n).to_string()),
            );
        }
        names
    }

    fn required_type(&self, node: &Node, field: &str) -> TypeExpr {
        match node.child_by_field_name(field) {
            Some(child) => self.type_expr(&child),
            None => TypeExpr::Unsupported {
                kind: format!("missing {field}"),
                text: self.text(node).to_string(),
            },
        }
    }

    pub fn type_expr(&self, node: &Node) -> TypeExpr {
        match node.kind() {
            "type_identifier" | "identifier" | "field_identifier" | "package_identifier" => {
                TypeExpr::Ident(self.text(node).to_string())
            }
            "qualified_type" => match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(package), Some(name)) => {
                    TypeExpr::qualified(self.text(&package), self.text(&name))
                }
                _ => self.unsupported(node),
            },
            "pointer_type" => match named_children(node).first() {
                Some(elem) => TypeExpr::Pointer(Box::new(self.type_expr(elem))),
                None => self.unsupported(node),
            },
            "slice_type" => TypeExpr::Slice(Box::new(self.required_type(node, "element"))),
            "array_type" => TypeExpr::Array {
                len: node
                    .child_by_field_name("length")
                    .map(|n| self.text(&n).to_string())
                    .unwrap_or_default(),
                elem: Box::new(self.required_type(node, "element")),
            },
            "map_type" => TypeExpr::Map {
                key: Box::new(self.required_type(node, "key")),
                value: Box::new(self.required_type(node, "value")),
            },
            "channel_type" => TypeExpr::Chan {
                dir: self.chan_dir(node),
                elem: Box::new(self.required_type(node, "value")),
            },
            "function_type" => TypeExpr::Func(self.signature(node)),
            "struct_type" => TypeExpr::Struct(self.struct_fields(node)),
            "interface_type" => TypeExpr::Interface(self.interface_elems(node)),
            "generic_type" => {
                let args = node
                    .child_by_field_name("type_arguments")
                    .map(|list| {
                        named_children(&list)
                            .iter()
                            .map(|arg| self.type_expr(arg))
                            .collect()
                    })
                    .unwrap_or_default();
                TypeExpr::Generic {
                    base: Box::new(self.required_type(node, "type")),
                    args,
                }
            }
            "parenthesized_type" => match named_children(node).first() {
                Some(inner) => self.type_expr(inner),
                None => self.unsupported(node),
            },
            // A type argument or embedding wraps its type in a `type_elem`;
            // only a single non-union term is a plain type.
            "type_elem" | "constraint_elem" => match named_children(node).as_slice() {
                [single] => self.type_expr(single),
                _ => self.unsupported(node),
            },
            _ => self.unsupported(node),
        }
    }

    fn unsupported(&self, node: &Node) -> TypeExpr {
        TypeExpr::Unsupported {
            kind: node.kind().to_string(),
            text: self.text(node).to_string(),
        }
    }

    fn chan_dir(&self, node: &Node) -> ChanDir {
        let mut cursor = node.walk();
        let tokens: Vec<&str> = node
            .children(&mut cursor)
            .filter(|c| !c.is_named())
            .map(|c| c.kind())
            .collect();
        match tokens.as_slice() {
            ["<-", "chan", ..] => ChanDir::Recv,
            ["chan", "<-", ..] => ChanDir::Send,
            _ => ChanDir::Both,
        }
    }

    /// Reads the `parameters` and `result` fields shared by function types
    /// and interface methods.
    fn signature(&self, node: &Node) -> Signature {
        let params = node
            .child_by_field_name("parameters")
            .map(|list| self.parameter_list(&list))
            .unwrap_or_default();
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.parameter_list(&result),
            Some(result) => vec![Field::anonymous(self.type_expr(&result))],
            None => Vec::new(),
        };
        Signature { params, results }
    }

    fn parameter_list(&self, list: &Node) -> Vec<Field> {
        let mut fields = Vec::new();
        for decl in named_children(list) {
            match decl.kind() {
                "parameter_declaration" => {
                    let mut cursor = decl.walk();
                    let names = decl
                        .children_by_field_name("name", &mut cursor)
                        .map(|n| self.text(&n).to_string())
                        .collect();
                    fields.push(Field::new(names, self.required_type(&decl, "type")));
                }
                "variadic_parameter_declaration" => {
                    let names = decl
                        .child_by_field_name("name")
                        .map(|n| vec![self.text(&n).to_string()])
                        .unwrap_or_default();
                    let elem = self.required_type(&decl, "type");
                    fields.push(Field::new(names, TypeExpr::Ellipsis(Box::new(elem))));
                }
                _ => {}
            }
        }
        fields
    }

    fn struct_fields(&self, node: &Node) -> Vec<Field> {
        let Some(list) = named_children(node)
            .into_iter()
            .find(|c| c.kind() == "field_declaration_list")
        else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        for decl in named_children(&list) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let mut cursor = decl.walk();
            let names: Vec<String> = decl
                .children_by_field_name("name", &mut cursor)
                .map(|n| self.text(&n).to_string())
                .collect();
            let mut ty = self.required_type(&decl, "type");
            if names.is_empty() && self.has_token(&decl, "*") {
                ty = TypeExpr::Pointer(Box::new(ty));
            }
            let tag = decl
                .child_by_field_name("tag")
                .map(|t| self.text(&t).to_string());
            fields.push(Field { names, ty, tag });
        }
        fields
    }

    fn has_token(&self, node: &Node, token: &str) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|c| !c.is_named() && c.kind() == token);
        found
    }

    fn interface_elems(&self, node: &Node) -> Vec<InterfaceElem> {
        let mut elems = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "method_elem" | "method_spec" => {
                    let Some(name) = child.child_by_field_name("name") else {
                        continue;
                    };
                    elems.push(InterfaceElem::Method {
                        name: self.text(&name).to_string(),
                        signature: self.signature(&child),
                    });
                }
                "type_elem" | "constraint_elem" => match named_children(&child).as_slice() {
                    [single] if is_embeddable(single.kind()) => {
                        elems.push(InterfaceElem::Embedded(self.type_expr(single)));
                    }
                    _ => elems.push(InterfaceElem::Constraint(self.text(&child).to_string())),
                },
                kind if is_embeddable(kind) => {
                    elems.push(InterfaceElem::Embedded(self.type_expr(&child)));
                }
                _ => elems.push(InterfaceElem::Constraint(self.text(&child).to_string())),
            }
        }
        elems
    }
}

fn is_embeddable(kind: &str) -> bool {
    matches!(kind, "type_identifier" | "qualified_type" | "generic_type")
}
