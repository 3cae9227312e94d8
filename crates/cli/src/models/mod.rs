//! Emission models driven by the CLI commands.

pub mod recording;
pub mod tracing_model;

pub use recording::{InspectReport, RecordingModel};
pub use tracing_model::TracingModel;
