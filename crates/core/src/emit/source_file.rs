use crate::{interfaces::Importer, types::ModuleLocation, utils::is_identifier};
use indexmap::IndexMap;
use std::collections::HashMap;

pub const GENERATED_HEADER: &str = "// Code generated by decogen. DO NOT EDIT.";

/// A generated Go file: package clause, import table and declarations.
///
/// Imports are rendered in registration order, each with its alias spelled
/// out, so the output does not depend on how the analysed code named them.
#[derive(Debug, Clone)]
pub struct SourceFile {
    package: String,
    import_to_alias: IndexMap<ModuleLocation, String>,
    alias_to_import: HashMap<String, ModuleLocation>,
    alias_counter: usize,
    declarations: Vec<String>,
}

impl SourceFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            import_to_alias: IndexMap::new(),
            alias_to_import: HashMap::new(),
            alias_counter: 0,
            declarations: Vec::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Registers `location` and returns its alias.
    ///
    /// A known location keeps its first alias. A new one takes `suggested`
    /// when it is a usable identifier not already taken, otherwise the next
    /// free `alias{N}`.
    pub fn add_import(&mut self, suggested: &str, location: &ModuleLocation) -> String {
        if let Some(alias) = self.import_to_alias.get(location) {
            return alias.clone();
        }

        let alias = if is_identifier(suggested)
            && suggested != "_"
            && !self.alias_to_import.contains_key(suggested)
        {
            suggested.to_string()
        } else {
            self.allocate_unique_alias()
        };

        self.import_to_alias.insert(location.clone(), alias.clone());
        self.alias_to_import.insert(alias.clone(), location.clone());
        alias
    }

    fn allocate_unique_alias(&mut self) -> String {
        loop {
            self.alias_counter += 1;
            let alias = format!("alias{}", self.alias_counter);
            if !self.alias_to_import.contains_key(&alias) {
                return alias;
            }
        }
    }

    pub fn alias_for(&self, location: &ModuleLocation) -> Option<&str> {
        self.import_to_alias.get(location).map(String::as_str)
    }

    pub fn location_of(&self, alias: &str) -> Option<&ModuleLocation> {
        self.alias_to_import.get(alias)
    }

    /// Registered imports as `(location, alias)`, in registration order.
    pub fn imports(&self) -> impl Iterator<Item = (&ModuleLocation, &str)> {
        self.import_to_alias
            .iter()
            .map(|(location, alias)| (location, alias.as_str()))
    }

    pub fn append_declaration(&mut self, declaration: impl Into<String>) {
        self.declarations.push(declaration.into());
    }

    /// Go source text of the whole file.
    pub fn render(&self) -> String {
        let mut out = format!("{GENERATED_HEADER}\n\npackage {}\n", self.package);

        if !self.import_to_alias.is_empty() {
            out.push_str("\nimport (\n");
            for (location, alias) in &self.import_to_alias {
                out.push_str(&format!("\t{alias} \"{location}\"\n"));
            }
            out.push_str(")\n");
        }

        for declaration in &self.declarations {
            out.push('\n');
            out.push_str(declaration.trim_end());
            out.push('\n');
        }
        out
    }
}

impl Importer for SourceFile {
    fn add_import(&mut self, suggested: &str, location: &ModuleLocation) -> String {
        SourceFile::add_import(self, suggested, location)
    }
}
