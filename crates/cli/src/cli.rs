use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{inspect_command, trace_command};

#[derive(Parser, Debug)]
#[command(name = "decogen")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging\n    GOROOT, GOPATH    Used when the config file leaves them unset")]
pub struct Cli {
    /// Configuration file (defaults to the nearest .decogen.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved method set of an interface as JSON
    #[command(visible_alias = "i")]
    Inspect {
        /// Package directory or import path declaring the interface
        source: String,

        /// Name of the interface
        interface: String,
    },
    /// Generate an OpenTelemetry tracing decorator for an interface
    #[command(visible_alias = "t")]
    Trace {
        /// Package directory or import path declaring the interface
        source: String,

        /// Name of the interface which will be wrapped
        interface: String,

        /// Output file, or directory to write tracing_<interface>.go into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package name of the generated file (defaults to <source package>mws)
        #[arg(short, long)]
        package: Option<String>,
    },
}

impl Cli {
    /// Execute the selected command
    pub fn execute(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Inspect { source, interface } => inspect_command(&source, &interface, config),
            Commands::Trace {
                source,
                interface,
                output,
                package,
            } => trace_command(
                &source,
                &interface,
                output.as_deref(),
                package.as_deref(),
                config,
            ),
        }
    }
}
