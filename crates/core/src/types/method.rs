use crate::syntax::{Field, Signature, TypeExpr};
use crate::utils::serde_helpers::serialize_display;
use serde::Serialize;

/// A single parameter or result after normalization: always named, one name
/// per field, type rewritten into the generated file's import namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedField {
    pub name: String,
    #[serde(rename = "type", serialize_with = "serialize_display")]
    pub ty: TypeExpr,
}

impl NormalizedField {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Description of one concrete method handed to an emission model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodConfig {
    pub name: String,
    pub params: Vec<NormalizedField>,
    pub results: Vec<NormalizedField>,
}

impl MethodConfig {
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Whether the last parameter is variadic (`...T`).
    pub fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(|p| p.ty.is_ellipsis())
    }

    /// Whether the last result is the predeclared `error` type.
    pub fn returns_error(&self) -> bool {
        self.results
            .last()
            .is_some_and(|r| r.ty == TypeExpr::ident("error"))
    }

    /// `(a int, b ...string)`
    pub fn params_string(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect();
        format!("({})", params.join(", "))
    }

    /// Argument list forwarding every parameter: `(a, b...)`.
    pub fn invocation_string(&self) -> String {
        let args: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.ty.is_ellipsis() {
                    format!("{}...", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect();
        format!("({})", args.join(", "))
    }

    /// `(result1 int, result2 error)`, or empty when there are no results.
    pub fn named_results_string(&self) -> String {
        if self.results.is_empty() {
            return String::new();
        }
        let results: Vec<String> = self
            .results
            .iter()
            .map(|r| format!("{} {}", r.name, r.ty))
            .collect();
        format!("({})", results.join(", "))
    }

    /// Result types only: empty, `T`, or `(T1, T2)`.
    pub fn results_string(&self) -> String {
        match self.results.as_slice() {
            [] => String::new(),
            [single] => single.ty.to_string(),
            results => {
                let types: Vec<String> = results.iter().map(|r| r.ty.to_string()).collect();
                format!("({})", types.join(", "))
            }
        }
    }

    /// Comma-separated result names, as used on the left of an assignment.
    pub fn result_names(&self) -> String {
        let names: Vec<&str> = self.results.iter().map(|r| r.name.as_str()).collect();
        names.join(", ")
    }

    /// The method's signature with named parameters and results.
    pub fn signature(&self) -> Signature {
        let to_field = |f: &NormalizedField| Field::new(vec![f.name.clone()], f.ty.clone());
        Signature {
            params: self.params.iter().map(to_field).collect(),
            results: self.results.iter().map(to_field).collect(),
        }
    }
}
