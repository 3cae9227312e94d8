use decogen_core::{
    EmissionModel, Importer, MethodConfig, ModuleLocation, NormalizedField, Result, SourceFile,
    syntax::TypeExpr,
};
use std::collections::HashSet;

const CONTEXT_LOCATION: &str = "context";
const TRACE_LOCATION: &str = "go.opentelemetry.io/otel/trace";
const CODES_LOCATION: &str = "go.opentelemetry.io/otel/codes";

/// Generates an OpenTelemetry tracing decorator.
///
/// Methods taking a `context.Context` get a span named `<Interface>.<Method>`
/// started from that context; a non-nil trailing error is recorded on the
/// span. Methods without a context are delegated untouched.
#[derive(Debug)]
pub struct TracingModel {
    file: SourceFile,
    interface_name: String,
    type_name: String,
    interface_type: String,
    trace_alias: String,
    methods: Vec<MethodConfig>,
}

impl TracingModel {
    pub fn new(
        package: &str,
        source_package: &str,
        source_location: &ModuleLocation,
        interface_name: &str,
    ) -> Self {
        let mut file = SourceFile::new(package);
        let source_alias = file.add_import(source_package, source_location);
        let trace_alias = file.add_import("trace", &ModuleLocation::from(TRACE_LOCATION));

        Self {
            file,
            interface_name: interface_name.to_string(),
            type_name: format!("tracing{interface_name}"),
            interface_type: format!("{source_alias}.{interface_name}"),
            trace_alias,
            methods: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn constructor_name(&self) -> String {
        format!("NewTracing{}", self.interface_name)
    }

    /// The generated Go file.
    pub fn render(&self) -> String {
        let mut file = self.file.clone();
        let (ty, iface) = (&self.type_name, &self.interface_type);

        // The codes alias is used inside method bodies, where any parameter
        // of the same name would shadow it.
        let codes = self.records_errors().then(|| {
            let taken = self.field_names();
            file.add_import(
                &unique_name("codes", &taken),
                &ModuleLocation::from(CODES_LOCATION),
            )
        });

        file.append_declaration(format!(
            "type {ty} struct {{\n\tnext   {iface}\n\ttracer {}.Tracer\n}}\n",
            self.trace_alias
        ));
        file.append_declaration(format!("var _ {iface} = (*{ty})(nil)\n"));
        file.append_declaration(format!(
            "// {ctor} returns a {iface} that records a span around every call\n\
             // made with a context.\n\
             func {ctor}(next {iface}, tracer {}.Tracer) {iface} {{\n\
             \treturn &{ty}{{next: next, tracer: tracer}}\n\
             }}\n",
            self.trace_alias,
            ctor = self.constructor_name(),
        ));
        for method in &self.methods {
            file.append_declaration(self.method_declaration(method, codes.as_deref()));
        }
        file.render()
    }

    fn records_errors(&self) -> bool {
        self.methods
            .iter()
            .any(|method| method.returns_error() && self.context_param(method).is_some())
    }

    fn field_names(&self) -> HashSet<&str> {
        self.methods
            .iter()
            .flat_map(|method| method.params.iter().chain(&method.results))
            .map(|field| field.name.as_str())
            .collect()
    }

    fn context_param<'m>(&self, method: &'m MethodConfig) -> Option<&'m NormalizedField> {
        let alias = self
            .file
            .alias_for(&ModuleLocation::from(CONTEXT_LOCATION))?;
        let context_type = TypeExpr::qualified(alias, "Context");
        method.params.iter().find(|param| param.ty == context_type)
    }

    fn method_declaration(&self, method: &MethodConfig, codes: Option<&str>) -> String {
        let taken: HashSet<&str> = method
            .params
            .iter()
            .chain(&method.results)
            .map(|field| field.name.as_str())
            .collect();
        let recv = unique_name("t", &taken);
        let span = unique_name("span", &taken);
        let call = format!("{recv}.next.{}{}", method.name, method.invocation_string());

        let mut out = format!(
            "func ({recv} *{}) {}{} {{\n",
            self.type_name,
            method.name,
            method.signature()
        );

        let ctx = self.context_param(method).map(|p| p.name.clone());
        if let Some(ctx) = &ctx {
            out.push_str(&format!(
                "\t{ctx}, {span} := {recv}.tracer.Start({ctx}, \"{}.{}\")\n\tdefer {span}.End()\n\n",
                self.interface_name, method.name
            ));
        }

        if !method.has_results() {
            out.push_str(&format!("\t{call}\n}}\n"));
            return out;
        }

        let results = method.result_names();
        out.push_str(&format!("\t{results} = {call}\n"));
        if let (Some(_), true, Some(err), Some(codes)) =
            (&ctx, method.returns_error(), method.results.last(), codes)
        {
            let err = &err.name;
            out.push_str(&format!(
                "\tif {err} != nil {{\n\t\t{span}.RecordError({err})\n\t\t{span}.SetStatus({codes}.Error, {err}.Error())\n\t}}\n"
            ));
        }
        out.push_str(&format!("\treturn {results}\n}}\n"));
        out
    }
}

fn unique_name(base: &str, taken: &HashSet<&str>) -> String {
    let mut name = base.to_string();
    while taken.contains(name.as_str()) {
        name.push('_');
    }
    name
}

impl Importer for TracingModel {
    fn add_import(&mut self, suggested: &str, location: &ModuleLocation) -> String {
        self.file.add_import(suggested, location)
    }
}

impl EmissionModel for TracingModel {
    fn add_method(&mut self, method: MethodConfig) -> Result<()> {
        tracing::trace!("Generating tracing method {}", method.name);
        self.methods.push(method);
        Ok(())
    }
}
