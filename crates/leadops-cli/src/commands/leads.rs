//! Leads commands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use colored::Colorize;
use leadops_common::LeadOpsConfig;
use leadops_dedup::domain::services::GroupRemoval;
use leadops_dedup::{
    AnalysisReport, AnalysisScope, Contactability, DeduplicationService, InMemoryLeadRepository, Lead,
    LeadQualityUseCases, RemovalOutcome, RemovalPlan, RemovalResult,
};
use serde::Serialize;
use tabled::Tabled;

use super::{read_json, write_json};
use crate::output::{table, Field, OutputFormat, Render};
use crate::LeadCommands;

pub(crate) async fn handle(action: LeadCommands, config: &LeadOpsConfig, format: OutputFormat) -> Result<()> {
    match action {
        LeadCommands::Analyze { file, scope, top } => {
            let report = analyze(&file, &scope.scope(), config).await?;
            format.print(&AnalysisView { report, top })?;
        }
        LeadCommands::Dedupe { file, scope, dry_run: true } => {
            format.print(&plan_dedupe(&file, &scope.scope(), config).await?)?;
        }
        LeadCommands::Dedupe { file, scope, dry_run: false } => {
            format.print(&dedupe(&file, &scope.scope(), config).await?)?;
        }
        LeadCommands::Cleanup { file, scope, dry_run: true } => {
            format.print(&plan_cleanup(&file, &scope.scope(), config)?)?;
        }
        LeadCommands::Cleanup { file, scope, dry_run: false } => {
            format.print(&cleanup(&file, &scope.scope(), config).await?)?;
        }
    }
    Ok(())
}

fn open(file: &Path, config: &LeadOpsConfig) -> Result<(Arc<InMemoryLeadRepository>, DeduplicationService)> {
    let leads: Vec<Lead> = read_json(file)?;
    tracing::debug!(file = %file.display(), leads = leads.len(), "Loaded leads");
    let repo = Arc::new(InMemoryLeadRepository::with_leads(leads));
    let service = DeduplicationService::new(repo.clone(), &config.dedup);
    Ok((repo, service))
}

pub async fn analyze(file: &Path, scope: &AnalysisScope, config: &LeadOpsConfig) -> Result<AnalysisReport> {
    let (_, service) = open(file, config)?;
    Ok(service.analyze_scope(scope).await?)
}

pub async fn plan_dedupe(file: &Path, scope: &AnalysisScope, config: &LeadOpsConfig) -> Result<PlanView> {
    let report = analyze(file, scope, config).await?;
    Ok(PlanView {
        plan: RemovalPlan::from_groups(&report.duplicate_groups),
    })
}

pub async fn dedupe(file: &Path, scope: &AnalysisScope, config: &LeadOpsConfig) -> Result<RemediationView> {
    let (repo, service) = open(file, config)?;
    let result = service.deduplicate_scope(scope).await?;
    RemediationView::finish("dedupe", file, &repo, result)
}

pub fn plan_cleanup(file: &Path, scope: &AnalysisScope, config: &LeadOpsConfig) -> Result<CleanupPlanView> {
    let (repo, service) = open(file, config)?;
    let classifier = service.analyzer().classifier();
    let lead_ids = repo
        .snapshot()
        .iter()
        .filter(|lead| scope.includes(lead))
        .filter(|lead| classifier.classify(lead).contactability == Contactability::Neither)
        .map(|lead| lead.id().to_string())
        .collect();
    Ok(CleanupPlanView { lead_ids })
}

pub async fn cleanup(file: &Path, scope: &AnalysisScope, config: &LeadOpsConfig) -> Result<RemediationView> {
    let (repo, service) = open(file, config)?;
    let result = service.cleanup_scope(scope).await?;
    RemediationView::finish("cleanup", file, &repo, result)
}

// =============================================================================
// Views
// =============================================================================

#[derive(Serialize)]
pub struct AnalysisView {
    #[serde(flatten)]
    pub report: AnalysisReport,
    #[serde(skip)]
    pub top: usize,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Campaign")]
    campaign: String,
    #[tabled(rename = "Leads")]
    count: usize,
    #[tabled(rename = "Keep")]
    keep: String,
}

impl Render for AnalysisView {
    fn table(&self) -> String {
        let r = &self.report;
        let mut out = format!("Scope: {}\n", r.scope);
        out.push_str(&table(vec![
            Field::new("Total leads", r.total_leads),
            Field::new("Valid phone", r.valid_phone),
            Field::new("Valid email", r.valid_email),
            Field::new("Both", r.with_both),
            Field::new("Phone only", r.phone_only),
            Field::new("Email only", r.email_only),
            Field::new("Neither", r.with_neither),
            Field::new("Empty phone", r.empty_phone),
            Field::new("Invalid phone format", r.invalid_phone_format),
            Field::new("Empty email", r.empty_email),
            Field::new("Invalid email format", r.invalid_email_format),
            Field::new("Duplicate groups", r.duplicate_groups.len()),
            Field::new("Duplicates to remove", r.duplicate_count),
        ]));

        if r.has_duplicates() {
            let rows = r.top_groups(self.top).into_iter().map(|g| GroupRow {
                field: g.field.as_str(),
                value: g.value.clone(),
                campaign: g.campaign_id.as_ref().map(|c| c.to_string()).unwrap_or_default(),
                count: g.count,
                keep: g.canonical().map(|id| id.to_string()).unwrap_or_default(),
            });
            out.push_str(&format!("\n\nLargest duplicate groups (top {}):\n", self.top));
            out.push_str(&table(rows));
        }

        if !r.invalid_records.is_empty() {
            let note = format!("\n\n{} malformed record(s) skipped", r.invalid_records.len());
            out.push_str(&note.yellow().to_string());
        }
        out
    }
}

#[derive(Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: RemovalPlan,
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Keep")]
    keep: String,
    #[tabled(rename = "Remove")]
    remove: String,
}

impl From<&GroupRemoval> for PlanRow {
    fn from(g: &GroupRemoval) -> Self {
        Self {
            group: g.label(),
            keep: g.keep.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            remove: g.remove.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", "),
        }
    }
}

impl Render for PlanView {
    fn table(&self) -> String {
        if self.plan.is_empty() {
            return "No duplicates to remove".to_string();
        }
        let rows = self.plan.groups.iter().filter(|g| !g.remove.is_empty()).map(PlanRow::from);
        format!(
            "{}\nWould remove {} lead(s)",
            table(rows),
            self.plan.total_to_remove()
        )
    }
}

#[derive(Serialize)]
pub struct CleanupPlanView {
    pub lead_ids: Vec<String>,
}

impl Render for CleanupPlanView {
    fn table(&self) -> String {
        if self.lead_ids.is_empty() {
            return "No uncontactable leads".to_string();
        }
        format!("Would remove {} lead(s): {}", self.lead_ids.len(), self.lead_ids.join(", "))
    }
}

#[derive(Serialize)]
pub struct RemediationView {
    pub operation: &'static str,
    pub file: PathBuf,
    pub outcome: RemovalOutcome,
    #[serde(flatten)]
    pub result: RemovalResult,
    /// Leads left in the file
    pub remaining: usize,
}

impl RemediationView {
    /// Write survivors back unless every delete failed
    fn finish(
        operation: &'static str,
        file: &Path,
        repo: &InMemoryLeadRepository,
        result: RemovalResult,
    ) -> Result<Self> {
        let outcome = result.outcome();
        if result.removed > 0 {
            write_json(file, &repo.snapshot())?;
        }
        if outcome == RemovalOutcome::Failed {
            bail!("{} failed: {}", operation, result.error_messages().join("; "));
        }
        Ok(Self {
            operation,
            file: file.to_path_buf(),
            outcome,
            remaining: repo.len(),
            result,
        })
    }
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Lead(s)")]
    leads: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl Render for RemediationView {
    fn table(&self) -> String {
        let outcome = format!("{:?}", self.outcome);
        let outcome = match self.outcome {
            RemovalOutcome::Complete | RemovalOutcome::NothingToDo => outcome.green(),
            RemovalOutcome::Partial => outcome.yellow(),
            RemovalOutcome::Failed => outcome.red(),
        };
        let mut out = table(vec![
            Field::new("Operation", self.operation),
            Field::new("Outcome", outcome),
            Field::new("Requested", self.result.requested),
            Field::new("Removed", self.result.removed),
            Field::new("Skipped", self.result.skipped_count()),
            Field::new("Failed", self.result.failed_count()),
            Field::new("Remaining", self.remaining),
        ]);

        let skipped = self.result.skipped.iter().map(|s| IssueRow {
            leads: s.lead_id.to_string(),
            status: "skipped".into(),
            detail: s.reason.clone(),
        });
        let failed = self.result.failures.iter().map(|f| IssueRow {
            leads: f.lead_ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", "),
            status: format!("failed ({})", f.label),
            detail: f.message.clone(),
        });
        let rows: Vec<IssueRow> = skipped.chain(failed).collect();
        if !rows.is_empty() {
            out.push_str("\n\n");
            out.push_str(&table(rows));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn write_leads(dir: &tempfile::TempDir) -> PathBuf {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let leads = vec![
            Lead::new("a", base).with_phone("555-123-4567").in_campaign("c1"),
            Lead::new("b", base + Duration::minutes(1)).with_phone("5551234567").in_campaign("c2"),
            Lead::new("c", base + Duration::minutes(2)).with_phone("EMPTY").with_email("nope"),
            Lead::new("d", base + Duration::minutes(3)).with_email("d@example.com").in_campaign("c1"),
        ];
        let path = dir.path().join("leads.json");
        write_json(&path, &leads).unwrap();
        path
    }

    #[tokio::test]
    async fn test_analyze_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_leads(&dir);

        let report = analyze(&file, &AnalysisScope::account(), &LeadOpsConfig::default()).await.unwrap();

        assert_eq!(report.total_leads, 4);
        assert_eq!(report.duplicate_groups.len(), 1);
        assert_eq!(report.with_neither, 1);

        let per_campaign = analyze(&file, &AnalysisScope::account_per_campaign(), &LeadOpsConfig::default())
            .await
            .unwrap();
        assert!(per_campaign.duplicate_groups.is_empty());
    }

    #[tokio::test]
    async fn test_dedupe_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_leads(&dir);
        let config = LeadOpsConfig::default();

        let plan = plan_dedupe(&file, &AnalysisScope::account(), &config).await.unwrap();
        assert_eq!(plan.plan.total_to_remove(), 1);
        assert_eq!(read_json::<Lead>(&file).unwrap().len(), 4);

        let view = dedupe(&file, &AnalysisScope::account(), &config).await.unwrap();
        assert_eq!(view.result.removed, 1);
        assert_eq!(view.remaining, 3);

        let survivors: Vec<Lead> = read_json(&file).unwrap();
        assert!(survivors.iter().all(|l| l.id().as_str() != "b"));

        let again = dedupe(&file, &AnalysisScope::account(), &config).await.unwrap();
        assert_eq!(again.outcome, RemovalOutcome::NothingToDo);
    }

    #[tokio::test]
    async fn test_cleanup_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_leads(&dir);
        let config = LeadOpsConfig::default();

        let plan = plan_cleanup(&file, &AnalysisScope::account(), &config).unwrap();
        assert_eq!(plan.lead_ids, vec!["c".to_string()]);

        let view = cleanup(&file, &AnalysisScope::account(), &config).await.unwrap();
        assert_eq!(view.result.removed, 1);
        assert_eq!(read_json::<Lead>(&file).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(analyze(&missing, &AnalysisScope::account(), &LeadOpsConfig::default()).await.is_err());
    }

    #[test]
    fn test_views_render() {
        let view = CleanupPlanView { lead_ids: vec![] };
        assert_eq!(view.table(), "No uncontactable leads");

        let plan = PlanView { plan: RemovalPlan::default() };
        assert_eq!(plan.table(), "No duplicates to remove");
    }
}
