use decogen_core::{EmissionModel, Importer, MethodConfig, ModuleLocation, Result, SourceFile};
use serde::Serialize;

/// Keeps every method and import it is given, without generating code.
#[derive(Debug)]
pub struct RecordingModel {
    file: SourceFile,
    methods: Vec<MethodConfig>,
}

#[derive(Debug, Serialize)]
pub struct InspectReport<'a> {
    pub location: &'a ModuleLocation,
    pub interface: &'a str,
    pub imports: Vec<ImportRecord<'a>>,
    pub methods: &'a [MethodConfig],
}

#[derive(Debug, Serialize)]
pub struct ImportRecord<'a> {
    pub alias: &'a str,
    pub location: &'a ModuleLocation,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self {
            file: SourceFile::new("inspect"),
            methods: Vec::new(),
        }
    }

    pub fn report<'a>(&'a self, location: &'a ModuleLocation, interface: &'a str) -> InspectReport<'a> {
        InspectReport {
            location,
            interface,
            imports: self
                .file
                .imports()
                .map(|(location, alias)| ImportRecord { alias, location })
                .collect(),
            methods: &self.methods,
        }
    }
}

impl Default for RecordingModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for RecordingModel {
    fn add_import(&mut self, suggested: &str, location: &ModuleLocation) -> String {
        self.file.add_import(suggested, location)
    }
}

impl EmissionModel for RecordingModel {
    fn add_method(&mut self, method: MethodConfig) -> Result<()> {
        self.methods.push(method);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decogen_core::NormalizedField;
    use decogen_core::syntax::TypeExpr;

    #[test]
    fn test_report_lists_imports_and_methods() {
        let mut model = RecordingModel::new();
        let alias = model.add_import("kv", &ModuleLocation::from("example.com/kv"));
        model
            .add_method(MethodConfig {
                name: "Get".to_string(),
                params: vec![NormalizedField::new("k", TypeExpr::qualified(&alias, "Key"))],
                results: Vec::new(),
            })
            .unwrap();

        let location = ModuleLocation::from("example.com/svc");
        let json = serde_json::to_value(model.report(&location, "Store")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "location": "example.com/svc",
                "interface": "Store",
                "imports": [{"alias": "kv", "location": "example.com/kv"}],
                "methods": [{
                    "name": "Get",
                    "params": [{"name": "k", "type": "kv.Key"}],
                    "results": [],
                }],
            })
        );
    }
}
