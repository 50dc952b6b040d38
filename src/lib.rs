// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Symbology: transactional point style editing for map layers

use anyhow::{Context, bail};
use std::path::PathBuf;
use std::sync::RwLock;

pub mod config;
pub mod editing;
pub mod error;
pub mod fields;
pub mod fonts;
pub mod model;
pub mod settings;
pub mod snapshot;

pub use config::EditorConfig;
pub use editing::{CloseOutcome, Collaborators, EditSession, SessionOptions, SessionState};
pub use error::{Result, StyleError};
pub use fields::{FieldEdit, FieldName, StyleFields};
pub use model::{LayerHandle, StyleModel};
pub use snapshot::StyleSnapshot;

/// Install the log subscriber (controlled via the RUST_LOG env var)
pub fn init_tracing() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    match "symbology=info".parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Bad log directive: {e}"),
    }
    // A subscriber may already be installed by the host
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Command line for the headless editor
#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    style_path: PathBuf,
    edits: Vec<String>,
    cancel: bool,
    config: Option<PathBuf>,
}

const USAGE: &str = "Usage: symbology <style.json> [field=value ...] [--cancel] [--config path]";

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Invocation> {
    let mut style_path = None;
    let mut edits = Vec::new();
    let mut cancel = false;
    let mut config = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cancel" => cancel = true,
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            _ if arg.contains('=') => edits.push(arg),
            _ if style_path.is_none() => style_path = Some(PathBuf::from(arg)),
            _ => bail!("Unexpected argument {arg:?}\n{USAGE}"),
        }
    }

    let Some(style_path) = style_path else {
        bail!("{USAGE}");
    };
    Ok(Invocation {
        style_path,
        edits,
        cancel,
        config,
    })
}

/// Entry point for the headless style editor.
///
/// Loads a style file, runs one edit session over it with the given field
/// edits, and writes the file back if the session left the style changed.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let invocation = parse_args(std::env::args().skip(1))?;
    let config = match &invocation.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    if !model::file_io::is_style_file(&invocation.style_path) {
        tracing::warn!(
            "{} does not look like a style file (expected .json)",
            invocation.style_path.display()
        );
    }
    tracing::info!("Loading style from: {}", invocation.style_path.display());
    let style = RwLock::new(StyleModel::load(&invocation.style_path)?);
    let before = StyleSnapshot::capture(&model::read_style(&style))?;

    let session = EditSession::open(
        &style,
        LayerHandle(0),
        Collaborators::default(),
        config.session_options(editing::TabMemory::global()),
    )?;

    for assignment in &invocation.edits {
        let edit = fields::parse::parse_assignment(assignment)?;
        session.apply_field_edit(edit)?;
    }
    let outcome = session.close(!invocation.cancel)?;

    let after = StyleSnapshot::capture(&model::read_style(&style))?;
    if after == before {
        tracing::info!("Style unchanged ({:?}); nothing written", outcome);
        return Ok(());
    }
    model::read_style(&style).save(&invocation.style_path)?;
    tracing::info!("Saved style to: {}", invocation.style_path.display());
    Ok(())
}
