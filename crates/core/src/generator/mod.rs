//! Interface Generator: walks an interface's method set and drives an
//! [`EmissionModel`] with one normalized [`MethodConfig`] per method.
//!
//! Elements are processed in declaration order. An embedded interface is
//! flattened at the point where it is embedded, so `interface{ Reader;
//! Close() error }` yields the reader's methods before `Close`.

use crate::{
    error::{Error, Result},
    interfaces::EmissionModel,
    resolution::{Locator, LocatorContext, Resolver, TypeDiscovery, is_builtin},
    syntax::{Field, InterfaceElem, Signature, TypeExpr},
    types::{MethodConfig, ModuleLocation, NormalizedField},
};
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace};

const PARAM_PREFIX: &str = "arg";
const RESULT_PREFIX: &str = "result";

pub struct Generator<'a, M: EmissionModel + ?Sized> {
    locator: &'a mut Locator,
    model: &'a mut M,
    // Interfaces currently being expanded, innermost last.
    visiting: Vec<(ModuleLocation, String)>,
}

impl<'a, M: EmissionModel + ?Sized> Generator<'a, M> {
    pub fn new(locator: &'a mut Locator, model: &'a mut M) -> Self {
        Self {
            locator,
            model,
            visiting: Vec::new(),
        }
    }

    /// Emits every method of the interface declared by `discovery`,
    /// including those of embedded interfaces.
    pub fn process(&mut self, discovery: &TypeDiscovery) -> Result<()> {
        let spec = discovery.spec();
        let context = LocatorContext::from_file(&discovery.file, &discovery.location);

        // `type Alias = Target` stands for the target's method set.
        if spec.is_alias {
            match &spec.ty {
                TypeExpr::Ident(name) if name == "error" || name == "any" => {
                    return self.process_builtin_embed(name);
                }
                ty => {
                    if let Some(target) = self.lookup_named(&context, ty)? {
                        return self.process(&target);
                    }
                }
            }
        }

        let TypeExpr::Interface(elems) = &spec.ty else {
            return Err(Error::NotAnInterface {
                name: spec.name.clone(),
                location: discovery.location.to_string(),
            });
        };
        if !spec.type_params.is_empty() {
            return Err(Error::UnsupportedDeclarationShape(format!(
                "generic interface '{}' in '{}'",
                spec.name, discovery.location
            )));
        }

        let key = (discovery.location.clone(), spec.name.clone());
        if self.visiting.contains(&key) {
            return Err(Error::UnsupportedDeclarationShape(format!(
                "interface '{}' in '{}' embeds itself",
                spec.name, discovery.location
            )));
        }

        debug!("Processing interface {} from {}", spec.name, discovery.location);
        self.visiting.push(key);
        let result = elems
            .iter()
            .try_for_each(|elem| self.process_elem(&context, elem));
        self.visiting.pop();
        result
    }

    fn process_elem(&mut self, context: &LocatorContext, elem: &InterfaceElem) -> Result<()> {
        match elem {
            InterfaceElem::Method { name, signature } => {
                let method = self.normalize_method(context, name, signature)?;
                trace!("Adding method {}{}", method.name, method.signature());
                self.model.add_method(method)
            }
            InterfaceElem::Embedded(TypeExpr::Ident(name)) if is_builtin(name) => {
                self.process_builtin_embed(name)
            }
            InterfaceElem::Embedded(ty) => match self.lookup_named(context, ty)? {
                Some(discovery) => self.process(&discovery),
                None => Err(Error::UnsupportedDeclarationShape(format!(
                    "embedded element `{ty}`"
                ))),
            },
            InterfaceElem::Constraint(text) => Err(Error::UnsupportedDeclarationShape(format!(
                "type constraint `{text}` in method set"
            ))),
        }
    }

    fn process_builtin_embed(&mut self, name: &str) -> Result<()> {
        match name {
            "any" => Ok(()),
            "error" => self.model.add_method(MethodConfig {
                name: "Error".to_string(),
                params: Vec::new(),
                results: vec![NormalizedField::new(
                    format!("{RESULT_PREFIX}1"),
                    TypeExpr::ident("string"),
                )],
            }),
            other => Err(Error::UnsupportedDeclarationShape(format!(
                "embedded predeclared type `{other}`"
            ))),
        }
    }

    /// Looks up a declared type by plain or qualified name; predeclared
    /// names and other shapes yield `None`.
    fn lookup_named(
        &mut self,
        context: &LocatorContext,
        ty: &TypeExpr,
    ) -> Result<Option<Rc<TypeDiscovery>>> {
        match ty {
            TypeExpr::Ident(name) if is_builtin(name) => Ok(None),
            TypeExpr::Ident(name) => self.locator.find_by_identifier(context, name).map(Some),
            TypeExpr::Qualified { package, name } => self
                .locator
                .find_by_qualified_reference(context, package, name)
                .map(Some),
            _ => Ok(None),
        }
    }

    fn normalize_method(
        &mut self,
        context: &LocatorContext,
        name: &str,
        signature: &Signature,
    ) -> Result<MethodConfig> {
        let taken: HashSet<String> = signature
            .params
            .iter()
            .chain(&signature.results)
            .flat_map(|field| field.names.iter())
            .filter(|name| !is_blank(name))
            .cloned()
            .collect();

        Ok(MethodConfig {
            name: name.to_string(),
            params: self.normalize_fields(context, &signature.params, PARAM_PREFIX, &taken)?,
            results: self.normalize_fields(context, &signature.results, RESULT_PREFIX, &taken)?,
        })
    }

    /// Expands grouped names into one field each and names anonymous or blank
    /// fields `{prefix}{N}`, N being the 1-based position after expansion.
    fn normalize_fields(
        &mut self,
        context: &LocatorContext,
        fields: &[Field],
        prefix: &str,
        taken: &HashSet<String>,
    ) -> Result<Vec<NormalizedField>> {
        let mut normalized = Vec::with_capacity(fields.iter().map(Field::arity).sum());
        for field in fields {
            let ty = Resolver::new(&mut *self.locator, &mut *self.model).resolve(context, &field.ty)?;

            let names: Vec<Option<&str>> = if field.names.is_empty() {
                vec![None]
            } else {
                field
                    .names
                    .iter()
                    .map(|name| (!is_blank(name)).then_some(name.as_str()))
                    .collect()
            };

            for name in names {
                let name = match name {
                    Some(name) => name.to_string(),
                    None => synthetic_name(prefix, normalized.len() + 1, taken),
                };
                normalized.push(NormalizedField::new(name, ty.clone()));
            }
        }
        Ok(normalized)
    }
}

fn is_blank(name: &str) -> bool {
    name == "_"
}

fn synthetic_name(prefix: &str, index: usize, taken: &HashSet<String>) -> String {
    let mut name = format!("{prefix}{index}");
    while taken.contains(&name) {
        name.push('_');
    }
    name
}
