//! Config commands

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use leadops_common::LeadOpsConfig;
use serde::Serialize;

use crate::output::{OutputFormat, Render};
use crate::ConfigCommands;

pub(crate) async fn handle(action: ConfigCommands, config: &LeadOpsConfig, format: OutputFormat) -> Result<()> {
    match action {
        ConfigCommands::Show => format.print(&ConfigView(config.clone()))?,
        ConfigCommands::Init { path, force } => {
            let path = match path.or_else(crate::config::default_path) {
                Some(path) => path,
                None => bail!("cannot determine home directory, pass --path"),
            };
            init(&path, force)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(&LeadOpsConfig::default())?;
    fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct ConfigView(pub LeadOpsConfig);

impl Render for ConfigView {
    fn table(&self) -> String {
        toml::to_string_pretty(&self.0).unwrap_or_default()
    }
}
