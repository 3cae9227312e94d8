use anyhow::{Context, Result};
use decogen_core::{
    Config, EmissionModel, FsModuleSource, Generator, Locator, LocatorContext, ModuleLocation,
    TypeDiscovery, config::ConfigLoader, source::go_mod,
};
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

/// One interface located in the module tree, ready to drive a model.
pub struct Session {
    pub location: ModuleLocation,
    locator: Locator,
    discovery: Rc<TypeDiscovery>,
}

impl Session {
    /// Resolves `source` (a package directory or an import path) and finds
    /// `interface` in it.
    pub fn open(source: &str, interface: &str, config_path: Option<&Path>) -> Result<Self> {
        let source_path = Path::new(source);
        let source_dir = if source_path.is_dir() {
            Some(
                source_path
                    .canonicalize()
                    .with_context(|| format!("Failed to resolve directory {source}"))?,
            )
        } else {
            None
        };

        let config = load_config(source_dir.as_deref(), config_path)?;

        let location = match &source_dir {
            Some(dir) => go_mod::dir_to_import_path(dir, &config.gopath)
                .with_context(|| format!("Failed to determine import path of {}", dir.display()))?,
            None => ModuleLocation::from(source),
        };
        debug!("Source location: {}", location);

        let module_source = FsModuleSource::from_config(&config)?;
        let mut locator = Locator::new(Box::new(module_source))?;
        let discovery = locator
            .find_by_identifier(&LocatorContext::single_location(location.clone()), interface)
            .with_context(|| format!("Failed to locate {interface} in {location}"))?;

        Ok(Self {
            location,
            locator,
            discovery,
        })
    }

    /// Package name declared by the file holding the interface.
    pub fn package(&self) -> &str {
        &self.discovery.file.package
    }

    pub fn interface(&self) -> &str {
        self.discovery.name()
    }

    /// Runs the generator over the interface, feeding `model`.
    pub fn generate<M: EmissionModel + ?Sized>(&mut self, model: &mut M) -> Result<()> {
        let discovery = Rc::clone(&self.discovery);
        Generator::new(&mut self.locator, model)
            .process(&discovery)
            .with_context(|| format!("Failed to process {}.{}", self.location, discovery.name()))
    }
}

fn load_config(source_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => ConfigLoader::load_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match source_dir {
            Some(dir) => ConfigLoader::load_from_path(dir)?,
            None => ConfigLoader::load()?,
        },
    };
    if let Some(dir) = source_dir {
        config.root = Some(dir.to_path_buf());
    }
    Ok(config)
}
