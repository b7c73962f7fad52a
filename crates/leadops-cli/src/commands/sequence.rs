//! Sequence commands

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use leadops_common::LeadOpsConfig;
use leadops_scheduler::{validate_sequence_timing, OutreachStep, Sequence, TimingWarning};
use serde::Serialize;
use tabled::Tabled;

use super::read_json;
use crate::output::{table, OutputFormat, Render};
use crate::SequenceCommands;

pub(crate) async fn handle(action: SequenceCommands, config: &LeadOpsConfig, format: OutputFormat) -> Result<()> {
    match action {
        SequenceCommands::Validate { file } => format.print(&validate(&file, config)?),
    }
}

/// Timing warnings plus any structural problem. Never fails on warnings.
pub fn validate(file: &Path, config: &LeadOpsConfig) -> Result<ValidationView> {
    let steps: Vec<OutreachStep> = read_json(file)?;
    let structure_error = Sequence::new(steps.clone()).err().map(|e| e.to_string());
    let warnings = validate_sequence_timing(&steps, &config.sequence);
    Ok(ValidationView {
        steps: steps.len(),
        structure_error,
        warnings,
    })
}

#[derive(Serialize)]
pub struct ValidationView {
    pub steps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_error: Option<String>,
    pub warnings: Vec<TimingWarning>,
}

#[derive(Tabled)]
struct WarningRow {
    #[tabled(rename = "Step")]
    step: u32,
    #[tabled(rename = "Warning")]
    message: String,
}

impl Render for ValidationView {
    fn table(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.structure_error {
            out.push_str(&format!("{}\n", error.red()));
        }
        if self.warnings.is_empty() {
            out.push_str(&format!("{} step(s), no timing warnings", self.steps).green().to_string());
            return out;
        }
        out.push_str(&table(self.warnings.iter().map(|w| WarningRow {
            step: w.step_number(),
            message: w.to_string(),
        })));
        out
    }
}
