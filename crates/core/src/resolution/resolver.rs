use super::{context::LocatorContext, locator::Locator};
use crate::{
    error::{Error, Result},
    interfaces::Importer,
    syntax::{Field, InterfaceElem, Signature, TypeExpr},
};
use tracing::trace;

const BUILTIN_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Whether `name` is a predeclared type that needs no import.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Array lengths are carried over verbatim, so only integer literals are
/// accepted; a named constant would not exist in the generated package.
fn is_literal_length(len: &str) -> bool {
    len.starts_with(|c: char| c.is_ascii_digit())
        && len.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Rewrites type expressions so every named type is reachable through an
/// import registered with the consuming model.
pub struct Resolver<'a, I: Importer + ?Sized> {
    locator: &'a mut Locator,
    importer: &'a mut I,
}

impl<'a, I: Importer + ?Sized> Resolver<'a, I> {
    pub fn new(locator: &'a mut Locator, importer: &'a mut I) -> Self {
        Self { locator, importer }
    }

    /// Returns `ty` with every non-builtin name rewritten to `alias.Name`.
    ///
    /// Any reference that cannot be placed aborts resolution.
    pub fn resolve(&mut self, context: &LocatorContext, ty: &TypeExpr) -> Result<TypeExpr> {
        match ty {
            TypeExpr::Ident(name) => self.resolve_ident(context, name),
            TypeExpr::Qualified { package, name } => self.resolve_qualified(context, package, name),
            TypeExpr::Pointer(elem) => Ok(TypeExpr::Pointer(self.resolve_boxed(context, elem)?)),
            TypeExpr::Slice(elem) => Ok(TypeExpr::Slice(self.resolve_boxed(context, elem)?)),
            TypeExpr::Ellipsis(elem) => Ok(TypeExpr::Ellipsis(self.resolve_boxed(context, elem)?)),
            TypeExpr::Array { len, elem } => {
                if !is_literal_length(len) {
                    return Err(Error::UnresolvableTypeExpression(format!(
                        "array length `{len}` in `{ty}`"
                    )));
                }
                Ok(TypeExpr::Array {
                    len: len.clone(),
                    elem: self.resolve_boxed(context, elem)?,
                })
            }
            TypeExpr::Map { key, value } => Ok(TypeExpr::Map {
                key: self.resolve_boxed(context, key)?,
                value: self.resolve_boxed(context, value)?,
            }),
            TypeExpr::Chan { dir, elem } => Ok(TypeExpr::Chan {
                dir: *dir,
                elem: self.resolve_boxed(context, elem)?,
            }),
            TypeExpr::Func(signature) => Ok(TypeExpr::Func(self.resolve_signature(context, signature)?)),
            TypeExpr::Struct(fields) => Ok(TypeExpr::Struct(self.resolve_fields(context, fields)?)),
            TypeExpr::Interface(elems) => {
                let elems = elems
                    .iter()
                    .map(|elem| self.resolve_interface_elem(context, elem))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeExpr::Interface(elems))
            }
            TypeExpr::Generic { base, args } => {
                let base = self.resolve_boxed(context, base)?;
                let args = args
                    .iter()
                    .map(|arg| self.resolve(context, arg))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeExpr::Generic { base, args })
            }
            TypeExpr::Unsupported { kind, text } => Err(Error::UnresolvableTypeExpression(
                format!("{kind} `{text}`"),
            )),
        }
    }

    pub fn resolve_signature(
        &mut self,
        context: &LocatorContext,
        signature: &Signature,
    ) -> Result<Signature> {
        Ok(Signature {
            params: self.resolve_fields(context, &signature.params)?,
            results: self.resolve_fields(context, &signature.results)?,
        })
    }

    fn resolve_ident(&mut self, context: &LocatorContext, name: &str) -> Result<TypeExpr> {
        if is_builtin(name) {
            return Ok(TypeExpr::ident(name));
        }
        let discovery = self.locator.find_by_identifier(context, name)?;
        let alias = self
            .importer
            .add_import(&discovery.file.package, &discovery.location);
        trace!("Resolved {} to {}.{}", name, discovery.location, name);
        Ok(TypeExpr::qualified(alias, name))
    }

    fn resolve_qualified(
        &mut self,
        context: &LocatorContext,
        package: &str,
        name: &str,
    ) -> Result<TypeExpr> {
        let discovery = self
            .locator
            .find_by_qualified_reference(context, package, name)?;
        let alias = self
            .importer
            .add_import(&discovery.file.package, &discovery.location);
        trace!("Resolved {}.{} to {}.{}", package, name, discovery.location, name);
        Ok(TypeExpr::qualified(alias, name))
    }

    fn resolve_boxed(&mut self, context: &LocatorContext, ty: &TypeExpr) -> Result<Box<TypeExpr>> {
        self.resolve(context, ty).map(Box::new)
    }

    fn resolve_fields(&mut self, context: &LocatorContext, fields: &[Field]) -> Result<Vec<Field>> {
        fields
            .iter()
            .map(|field| {
                Ok(Field {
                    names: field.names.clone(),
                    ty: self.resolve(context, &field.ty)?,
                    tag: field.tag.clone(),
                })
            })
            .collect()
    }

    fn resolve_interface_elem(
        &mut self,
        context: &LocatorContext,
        elem: &InterfaceElem,
    ) -> Result<InterfaceElem> {
        match elem {
            InterfaceElem::Method { name, signature } => Ok(InterfaceElem::Method {
                name: name.clone(),
                signature: self.resolve_signature(context, signature)?,
            }),
            InterfaceElem::Embedded(ty) => Ok(InterfaceElem::Embedded(self.resolve(context, ty)?)),
            InterfaceElem::Constraint(text) => Err(Error::UnresolvableTypeExpression(format!(
                "type constraint `{text}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::context::{ImportAlias, ImportEntry};
    use crate::source::MemoryModuleSource;
    use crate::types::ModuleLocation;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Issues `alias{N}` per new location and records every call.
    #[derive(Default)]
    struct CountingImporter {
        aliases: HashMap<ModuleLocation, String>,
        calls: Vec<(String, String)>,
    }

    impl Importer for CountingImporter {
        fn add_import(&mut self, suggested: &str, location: &ModuleLocation) -> String {
            self.calls.push((suggested.to_string(), location.to_string()));
            let next = self.aliases.len() + 1;
            self.aliases
                .entry(location.clone())
                .or_insert_with(|| format!("alias{next}"))
                .clone()
        }
    }

    fn shop_source() -> Rc<MemoryModuleSource> {
        Rc::new(
            MemoryModuleSource::new()
                .with_file(
                    "example.com/shop",
                    "shop.go",
                    "package shop\n\ntype Key string\n\ntype Item struct{ Name string }\n",
                )
                .with_file(
                    "example.com/kv",
                    "kv.go",
                    "package kv\n\ntype Value []byte\n\ntype List[T any] []T\n",
                ),
        )
    }

    fn shop_context() -> LocatorContext {
        LocatorContext::single_location("example.com/shop")
            .with_entry(ImportEntry::new(ImportAlias::Unaliased, "example.com/kv"))
    }

    fn parse_type(text: &str) -> TypeExpr {
        let source = format!("package p\n\ntype T {text}\n");
        let mut parser = crate::parser::GoParser::new().unwrap();
        let file = parser
            .parse_file(std::path::Path::new("p.go"), &source)
            .unwrap();
        file.types[0].ty.clone()
    }

    fn resolve(text: &str) -> (String, CountingImporter, Rc<MemoryModuleSource>) {
        let source = shop_source();
        let mut locator = Locator::new(Box::new(Rc::clone(&source))).unwrap();
        let mut importer = CountingImporter::default();
        let resolved = Resolver::new(&mut locator, &mut importer)
            .resolve(&shop_context(), &parse_type(text))
            .unwrap();
        (resolved.to_string(), importer, source)
    }

    #[test]
    fn test_builtins_need_no_lookup_or_import() {
        for name in ["bool", "int32", "string", "error", "any", "uintptr", "rune"] {
            let (resolved, importer, source) = resolve(name);
            assert_eq!(resolved, name);
            assert!(importer.calls.is_empty());
            assert_eq!(source.load_count("example.com/shop"), 0);
        }
    }

    #[test]
    fn test_composite_types_are_rewritten() {
        let (resolved, importer, _) = resolve("map[Key][]*kv.Value");
        insta::assert_snapshot!(resolved, @"map[alias1.Key][]*alias2.Value");
        assert_eq!(
            importer.calls,
            vec![
                ("shop".to_string(), "example.com/shop".to_string()),
                ("kv".to_string(), "example.com/kv".to_string()),
            ]
        );
    }

    #[test]
    fn test_function_struct_and_channel_types() {
        let (resolved, _, _) = resolve("func(k Key, opts ...kv.Value) (<-chan Item, error)");
        insta::assert_snapshot!(resolved, @"func(k alias1.Key, opts ...alias2.Value) (<-chan alias1.Item, error)");

        let (resolved, _, _) = resolve("struct{ K Key `json:\"k\"`; n [4]int }");
        insta::assert_snapshot!(resolved, @"struct{ K alias1.Key `json:\"k\"`; n [4]int }");
    }

    #[test]
    fn test_inline_interface_methods_are_resolved() {
        let (resolved, _, _) = resolve("interface{ Get(Key) Item }");
        insta::assert_snapshot!(resolved, @"interface{ Get(alias1.Key) alias1.Item }");
    }

    #[test]
    fn test_generic_base_and_arguments_are_resolved() {
        let (resolved, _, _) = resolve("kv.List[Item]");
        insta::assert_snapshot!(resolved, @"alias1.List[alias2.Item]");
    }

    #[test]
    fn test_same_location_reuses_alias() {
        let (resolved, importer, source) = resolve("map[Key]Item");
        assert_eq!(resolved, "map[alias1.Key]alias1.Item");
        assert_eq!(importer.aliases.len(), 1);
        assert_eq!(source.load_count("example.com/shop"), 1);
    }

    #[test]
    fn test_literal_array_lengths_are_kept() {
        let (resolved, _, _) = resolve("[0x10][1_000]Key");
        assert_eq!(resolved, "[0x10][1_000]alias1.Key");
    }

    #[test]
    fn test_constant_array_lengths_abort() {
        let context = shop_context()
            .with_entry(ImportEntry::new(ImportAlias::Unaliased, "crypto/sha256"));
        for text in ["func(d [sha256.Size]byte)", "func() [N]int", "func(items [2*N]Item)"] {
            let source = shop_source();
            let mut locator = Locator::new(Box::new(Rc::clone(&source))).unwrap();
            let mut importer = CountingImporter::default();

            let err = Resolver::new(&mut locator, &mut importer)
                .resolve(&context, &parse_type(text))
                .unwrap_err();
            assert!(
                matches!(err, Error::UnresolvableTypeExpression(ref msg) if msg.contains("array length")),
                "{text}: {err:?}"
            );
            assert!(importer.calls.is_empty(), "{text}");
        }
    }

    #[test]
    fn test_unknown_reference_aborts() {
        let source = shop_source();
        let mut locator = Locator::new(Box::new(source)).unwrap();
        let mut importer = CountingImporter::default();
        let mut resolver = Resolver::new(&mut locator, &mut importer);

        let err = resolver
            .resolve(&shop_context(), &TypeExpr::ident("Missing"))
            .unwrap_err();
        assert!(matches!(err, Error::TypeNotFound { .. }));

        let unsupported = TypeExpr::Unsupported {
            kind: "union".to_string(),
            text: "int | string".to_string(),
        };
        let err = resolver.resolve(&shop_context(), &unsupported).unwrap_err();
        assert!(matches!(err, Error::UnresolvableTypeExpression(_)));
    }
}
