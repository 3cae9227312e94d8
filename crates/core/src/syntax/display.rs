//! Rendering of the declaration model back to Go source text.

use super::{ChanDir, Field, InterfaceElem, Signature, TypeExpr};
use std::fmt::{self, Display, Formatter, Write};

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) => f.write_str(name),
            TypeExpr::Qualified { package, name } => write!(f, "{package}.{name}"),
            TypeExpr::Pointer(elem) => write!(f, "*{elem}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Chan { dir, elem } => {
                // `chan <-chan T` would parse as `chan<- chan T`
                let needs_parens = *dir != ChanDir::Recv
                    && matches!(
                        elem.as_ref(),
                        TypeExpr::Chan {
                            dir: ChanDir::Recv,
                            ..
                        }
                    );
                match dir {
                    ChanDir::Both => f.write_str("chan ")?,
                    ChanDir::Send => f.write_str("chan<- ")?,
                    ChanDir::Recv => f.write_str("<-chan ")?,
                }
                if needs_parens {
                    write!(f, "({elem})")
                } else {
                    write!(f, "{elem}")
                }
            }
            TypeExpr::Func(signature) => write!(f, "func{signature}"),
            TypeExpr::Struct(fields) => {
                if fields.is_empty() {
                    return f.write_str("struct{}");
                }
                f.write_str("struct{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{field}")?;
                    if let Some(tag) = &field.tag {
                        write!(f, " {tag}")?;
                    }
                }
                f.write_str(" }")
            }
            TypeExpr::Interface(elems) => {
                if elems.is_empty() {
                    return f.write_str("interface{}");
                }
                f.write_str("interface{ ")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str(" }")
            }
            TypeExpr::Ellipsis(elem) => write!(f, "...{elem}"),
            TypeExpr::Generic { base, args } => {
                write!(f, "{base}[")?;
                write_joined(f, args)?;
                f.write_char(']')
            }
            TypeExpr::Unsupported { text, .. } => f.write_str(text),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return write!(f, "{}", self.ty);
        }
        write!(f, "{} {}", self.names.join(", "), self.ty)
    }
}

impl Display for InterfaceElem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceElem::Method { name, signature } => write!(f, "{name}{signature}"),
            InterfaceElem::Embedded(ty) => write!(f, "{ty}"),
            InterfaceElem::Constraint(text) => f.write_str(text),
        }
    }
}

/// Renders `(params) results` without the leading `func` keyword.
impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        write_joined(f, &self.params)?;
        f.write_char(')')?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => write!(f, " {}", single.ty),
            results => {
                f.write_str(" (")?;
                write_joined(f, results)?;
                f.write_char(')')
            }
        }
    }
}

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
