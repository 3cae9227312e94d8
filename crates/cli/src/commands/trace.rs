use anyhow::{Context, Result, bail};
use decogen_core::utils::{is_identifier, to_snake_case};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::Session;
use crate::models::TracingModel;

/// Generates a tracing decorator and writes it to `output` or stdout.
pub fn trace_command(
    source: &str,
    interface: &str,
    output: Option<&Path>,
    package: Option<&str>,
    config: Option<&Path>,
) -> Result<()> {
    debug!("Generating tracing decorator for {} in {}", interface, source);

    let mut session = Session::open(source, interface, config)?;
    let package = match package {
        Some(name) => name.to_string(),
        None => format!("{}mws", session.package()),
    };
    if !is_identifier(&package) {
        bail!("Invalid package name: {package}");
    }

    let mut model = TracingModel::new(
        &package,
        session.package(),
        &session.location,
        session.interface(),
    );
    session.generate(&mut model)?;
    let code = model.render();

    let Some(output) = output else {
        print!("{code}");
        return Ok(());
    };

    let path = output_path(output, interface);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, code).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {:?}", path);

    println!(
        "Wrote tracing implementation of \"{}.{}\" to \"{}\"",
        session.location,
        interface,
        path.display()
    );
    Ok(())
}

/// `output` itself, or `tracing_<interface>.go` inside it when it is a directory.
pub fn output_path(output: &Path, interface: &str) -> PathBuf {
    if output.is_dir() {
        output.join(output_file_name(interface))
    } else {
        output.to_path_buf()
    }
}

pub fn output_file_name(interface: &str) -> String {
    format!("tracing_{}.go", to_snake_case(interface))
}
