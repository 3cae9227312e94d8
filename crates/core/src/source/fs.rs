use super::{ModuleSource, SourceUnit, go_mod};
use crate::{
    config::Config,
    error::{Error, Result},
    types::ModuleLocation,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Reads packages from disk, resolving import paths the way the go tool
/// would for a single main module.
///
/// Search order for a location:
/// 1. explicit module mappings from configuration (longest prefix first)
/// 2. the main module declared by the project's go.mod
/// 3. the project's `vendor/` directory
/// 4. `GOROOT/src`
/// 5. every `GOPATH` entry's `src/`
///
/// The first directory holding at least one non-test `.go` file wins.
#[derive(Debug, Clone, Default)]
pub struct FsModuleSource {
    mappings: Vec<(String, PathBuf)>,
    main_module: Option<(String, PathBuf)>,
    vendor_dir: Option<PathBuf>,
    goroot: Option<PathBuf>,
    gopath: Vec<PathBuf>,
}

impl FsModuleSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        let project_root = config.project_root();

        let mut mappings: Vec<(String, PathBuf)> = config
            .modules
            .iter()
            .map(|(prefix, dir)| (prefix.trim_end_matches('/').to_string(), dir.clone()))
            .collect();
        mappings.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let main_module = match go_mod::find_module_root(&project_root) {
            Some(root) => go_mod::read_module_path(&root.join(go_mod::GO_MOD))?
                .map(|module| (module, root)),
            None => None,
        };
        if let Some((module, root)) = &main_module {
            debug!("Main module {} at {:?}", module, root);
        }

        let vendor_dir = if config.vendor {
            let base = main_module
                .as_ref()
                .map(|(_, root)| root.clone())
                .unwrap_or(project_root);
            Some(base.join("vendor"))
        } else {
            None
        };

        Ok(Self {
            mappings,
            main_module,
            vendor_dir,
            goroot: config.goroot.clone(),
            gopath: config.gopath.clone(),
        })
    }

    /// Candidate directories for `location`, in search order.
    fn candidate_dirs(&self, location: &str) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        for (prefix, dir) in &self.mappings {
            if let Some(rest) = strip_import_prefix(location, prefix) {
                dirs.push(join_relative(dir, rest));
            }
        }
        if let Some((module, root)) = &self.main_module {
            if let Some(rest) = strip_import_prefix(location, module) {
                dirs.push(join_relative(root, rest));
            }
        }
        if let Some(vendor) = &self.vendor_dir {
            dirs.push(join_relative(vendor, location));
        }
        if let Some(goroot) = &self.goroot {
            dirs.push(join_relative(&goroot.join("src"), location));
        }
        for entry in &self.gopath {
            dirs.push(join_relative(&entry.join("src"), location));
        }

        dirs
    }

    /// The directory `location` resolves to, if any.
    pub fn resolve_dir(&self, location: &ModuleLocation) -> Result<Option<PathBuf>> {
        for dir in self.candidate_dirs(location.as_str()) {
            trace!("Trying {:?} for {}", dir, location);
            if !dir.is_dir() {
                continue;
            }
            if !go_files_in(&dir)?.is_empty() {
                return Ok(Some(dir));
            }
        }
        Ok(None)
    }
}

impl ModuleSource for FsModuleSource {
    fn load(&self, location: &ModuleLocation) -> Result<Vec<SourceUnit>> {
        let dir = self
            .resolve_dir(location)?
            .ok_or_else(|| Error::LocationNotFound {
                location: location.to_string(),
            })?;
        debug!("Resolved {} to {:?}", location, dir);

        go_files_in(&dir)?
            .into_iter()
            .map(|path| {
                let text = std::fs::read_to_string(&path)?;
                Ok(SourceUnit::new(path, text))
            })
            .collect()
    }
}

/// `location` relative to `prefix`, when `prefix` is the location itself or
/// one of its path ancestors.
fn strip_import_prefix<'a>(location: &'a str, prefix: &str) -> Option<&'a str> {
    if location == prefix {
        return Some("");
    }
    location.strip_prefix(prefix)?.strip_prefix('/')
}

fn join_relative(base: &Path, import_path: &str) -> PathBuf {
    import_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Non-test `.go` files of `dir`, sorted by name.
fn go_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && name.ends_with(".go") && !name.ends_with("_test.go") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
