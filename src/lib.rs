// Copyright 2025 the Polyhole Authors
// SPDX-License-Identifier: Apache-2.0

//! Polyhole: interactive polygon editing over a raster image
//!
//! Shapes are drawn, modified, and deleted through tools that a mode
//! controller attaches one mode at a time. The hole tool cuts interior rings
//! into an existing shape live while the hole is being drawn.

use anyhow::{Context, bail};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

pub mod config;
pub mod editing;
pub mod editor;
pub mod error;
pub mod mode;
pub mod model;
pub mod replay;
pub mod settings;
pub mod tools;

pub use config::{Config, HoleTargetRule};
pub use editor::Editor;
pub use error::{Error, Result};
pub use mode::{Mode, ModeController, Trigger};
pub use model::{EntityId, Polygon, Ring, Shape, ShapeSource};

const USAGE: &str = "Usage: polyhole <script.json> [--config <path>]";

/// Entry point for the replay binary
pub fn run() -> anyhow::Result<()> {
    let args = CommandLine::parse(std::env::args().skip(1))?;
    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Controlled via RUST_LOG, on top of the configured default directive
    let directive = config
        .log_filter
        .parse::<Directive>()
        .with_context(|| format!("Invalid log filter {:?}", config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    let script = replay::Script::load(&args.script)
        .with_context(|| format!("Failed to load script {}", args.script.display()))?;
    let editor = script
        .run(config)
        .context("Failed to prepare the replay surface")?;
    let output = replay::Outcome::of(&editor)
        .to_json()
        .context("Failed to serialize shapes")?;
    println!("{output}");
    Ok(())
}

/// Parsed command-line arguments
#[derive(Debug, Clone, PartialEq)]
struct CommandLine {
    script: PathBuf,
    config: Option<PathBuf>,
}

impl CommandLine {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut script = None;
        let mut config = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let Some(path) = args.next() else {
                        bail!("--config needs a path\n{USAGE}");
                    };
                    config = Some(PathBuf::from(path));
                }
                "-h" | "--help" => bail!("{USAGE}"),
                _ if script.is_none() => script = Some(PathBuf::from(&arg)),
                _ => bail!("Unexpected argument {arg:?}\n{USAGE}"),
            }
        }
        let Some(script) = script else {
            bail!("{USAGE}");
        };
        Ok(Self { script, config })
    }
}
