use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::Session;
use crate::models::RecordingModel;

/// Prints the resolved method set and import table of an interface as JSON.
pub fn inspect_command(source: &str, interface: &str, config: Option<&Path>) -> Result<()> {
    debug!("Inspecting {} in {}", interface, source);

    let mut session = Session::open(source, interface, config)?;
    let mut model = RecordingModel::new();
    session.generate(&mut model)?;

    let report = model.report(&session.location, session.interface());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
