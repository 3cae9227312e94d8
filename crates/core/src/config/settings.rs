use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".decogen.json";

/// Where the module tree lives on disk.
///
/// ```json
/// { "goroot": "/usr/local/go", "gopath": ["/home/u/go"],
///   "modules": { "example.com/lib": "../lib" }, "vendor": true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goroot: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gopath: Vec<PathBuf>,
    /// Import-path prefix to directory.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modules: BTreeMap<String, PathBuf>,
    #[serde(default = "default_vendor")]
    pub vendor: bool,

    // Directory holding the config file (internal, not exposed in JSON)
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

fn default_vendor() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goroot: None,
            gopath: Vec::new(),
            modules: BTreeMap::new(),
            vendor: default_vendor(),
            root: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or(Path::new("."));
        Self::from_json(&contents, base)
    }

    /// Parses a config and anchors its relative paths at `base`.
    pub fn from_json(contents: &str, base: &Path) -> Result<Self> {
        let mut config: Config = serde_json::from_str(contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.anchor(base);
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Fills `goroot` and `gopath` from the environment when the file left
    /// them unset. GOPATH defaults to `$HOME/go`, as with the go tool.
    pub fn fill_from_env(&mut self) {
        self.fill_from(|key| std::env::var(key).ok());
    }

    pub fn fill_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.goroot.is_none() {
            self.goroot = lookup("GOROOT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }
        if self.gopath.is_empty() {
            self.gopath = match lookup("GOPATH").filter(|v| !v.is_empty()) {
                Some(value) => std::env::split_paths(&value).collect(),
                None => lookup("HOME")
                    .map(|home| vec![PathBuf::from(home).join("go")])
                    .unwrap_or_default(),
            };
        }
    }

    /// Directory used to find the main module's go.mod and `vendor/`.
    pub fn project_root(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn anchor(&mut self, base: &Path) {
        let resolve = |p: &PathBuf| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.clone()
            }
        };
        self.goroot = self.goroot.as_ref().map(resolve);
        self.gopath = self.gopath.iter().map(resolve).collect();
        self.modules = self
            .modules
            .iter()
            .map(|(prefix, dir)| (prefix.clone(), resolve(dir)))
            .collect();
        self.root = Some(base.to_path_buf());
    }
}
