//! `go.mod` discovery and directory/import-path conversion.

use crate::{
    error::{Error, Result},
    types::ModuleLocation,
};
use std::path::{Component, Path, PathBuf};

pub const GO_MOD: &str = "go.mod";

/// Extracts the path from the `module` directive of a go.mod file.
pub fn parse_module_path(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}

pub fn read_module_path(go_mod: &Path) -> Result<Option<String>> {
    let contents = std::fs::read_to_string(go_mod)?;
    Ok(parse_module_path(&contents))
}

/// Walks up from `start` to the nearest directory containing a go.mod.
pub fn find_module_root(start: &Path) -> Option<PathBuf> {
    let abs_path = if start.is_relative() {
        std::env::current_dir().ok()?.join(start)
    } else {
        start.to_path_buf()
    };

    let mut current = Some(abs_path.as_path());
    while let Some(dir) = current {
        if dir.join(GO_MOD).is_file() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Converts a package directory into its import path: first through the
/// enclosing go.mod, then through a `GOPATH/src` prefix.
pub fn dir_to_import_path(dir: &Path, gopath: &[PathBuf]) -> Result<ModuleLocation> {
    let dir = dir.canonicalize()?;

    if let Some(root) = find_module_root(&dir) {
        if let Some(module) = read_module_path(&root.join(GO_MOD))? {
            let relative = dir.strip_prefix(&root).unwrap_or(Path::new(""));
            return Ok(join_import_path(&module, relative));
        }
    }

    for entry in gopath {
        let src = entry.join("src");
        let src = src.canonicalize().unwrap_or(src);
        if let Ok(relative) = dir.strip_prefix(&src) {
            return Ok(join_import_path("", relative));
        }
    }

    Err(Error::LocationNotFound {
        location: dir.display().to_string(),
    })
}

fn join_import_path(prefix: &str, relative: &Path) -> ModuleLocation {
    let mut parts: Vec<&str> = Vec::new();
    if !prefix.is_empty() {
        parts.push(prefix);
    }
    parts.extend(relative.components().filter_map(|c| match c {
        Component::Normal(s) => s.to_str(),
        _ => None,
    }));
    ModuleLocation::new(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_module_path() {
        let contents = "// comment\nmodule example.com/shop // trailing\n\ngo 1.22\n";
        assert_eq!(
            parse_module_path(contents).as_deref(),
            Some("example.com/shop")
        );
        assert_eq!(
            parse_module_path("module \"quoted.io/x\"\n").as_deref(),
            Some("quoted.io/x")
        );
        assert_eq!(parse_module_path("go 1.22\n"), None);
        assert_eq!(parse_module_path("modules are fun\n"), None);
    }

    #[test]
    fn test_dir_to_import_path_through_go_mod() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(GO_MOD), "module example.com/shop\n").unwrap();
        let pkg = root.join("internal").join("store");
        fs::create_dir_all(&pkg).unwrap();

        let location = dir_to_import_path(&pkg, &[]).unwrap();
        assert_eq!(location.as_str(), "example.com/shop/internal/store");

        let location = dir_to_import_path(root, &[]).unwrap();
        assert_eq!(location.as_str(), "example.com/shop");
    }

    #[test]
    fn test_dir_to_import_path_through_gopath() {
        let temp = TempDir::new().unwrap();
        let gopath = temp.path().to_path_buf();
        let pkg = gopath.join("src").join("github.com").join("acme").join("kv");
        fs::create_dir_all(&pkg).unwrap();

        let location = dir_to_import_path(&pkg, &[gopath]).unwrap();
        assert_eq!(location.as_str(), "github.com/acme/kv");
    }
}
