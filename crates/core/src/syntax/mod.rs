//! Typed model of the Go declarations the engine works with.
//!
//! Only the declaration level is modeled: package clause, imports and type
//! declarations. Function bodies and values are never needed to resolve or
//! rewrite an interface's method set, so the parser does not keep them.

mod display;

use std::path::PathBuf;

/// A parsed Go compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFile {
    pub path: PathBuf,
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub types: Vec<TypeSpec>,
}

impl GoFile {
    /// Iterates the type declarations in source order.
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.types.iter()
    }
}

/// One `import` line. `name` is `"."`, `"_"` or an identifier when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub name: Option<String>,
    pub path: String,
}

/// A top-level `type` declaration, either `type X T` or `type X = T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<String>,
    pub is_alias: bool,
    pub ty: TypeExpr,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A Go type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Unqualified name: `Widget`, `string`.
    Ident(String),
    /// Package-qualified name: `io.Reader`.
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// Fixed-size array; the length expression is kept verbatim.
    Array { len: String, elem: Box<TypeExpr> },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func(Signature),
    Struct(Vec<Field>),
    Interface(Vec<InterfaceElem>),
    /// Variadic parameter type `...T`.
    Ellipsis(Box<TypeExpr>),
    /// Instantiated generic type: `List[int]`, `pkg.Set[K, V]`.
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    /// A shape the engine does not model (type-set unions, `~T`).
    Unsupported { kind: String, text: String },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, TypeExpr::Ellipsis(_))
    }

    /// Returns the slice equivalent of a variadic type (`...T` becomes `[]T`).
    ///
    /// Other types are returned unchanged.
    pub fn without_ellipsis(&self) -> TypeExpr {
        match self {
            TypeExpr::Ellipsis(elem) => TypeExpr::Slice(elem.clone()),
            other => other.clone(),
        }
    }
}

/// A parameter, result or struct field. `names` is empty for anonymous fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

impl Field {
    pub fn new(names: Vec<String>, ty: TypeExpr) -> Self {
        Self {
            names,
            ty,
            tag: None,
        }
    }

    pub fn anonymous(ty: TypeExpr) -> Self {
        Self::new(Vec::new(), ty)
    }

    /// Number of values this field declares once grouped names are expanded.
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// Parameter and result lists of a function type or method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// An entry of an interface's method set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceElem {
    Method { name: String, signature: Signature },
    Embedded(TypeExpr),
    /// Type-set constraint (`int | string`, `~T`), kept verbatim.
    Constraint(String),
}
