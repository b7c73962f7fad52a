//! Schedule commands

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use colored::Colorize;
use leadops_common::LeadOpsConfig;
use leadops_scheduler::{
    calculate_optimal_send_time, distribute_email_timing, plan_sequence, InMemoryThrottleStateRepository,
    OutreachStep, PlannedStep, ScheduledSend, SenderIdentity, Sequence, SequenceError, ThrottlingDecision,
    ThrottlingService, ThrottlingState, ThrottlingUseCases,
};
use serde::Serialize;
use tabled::Tabled;

use super::{read_json, read_json_or_empty, write_json};
use crate::output::{table, Field, OutputFormat, Render};
use crate::{ScheduleCommands, SenderArgs};

pub(crate) async fn handle(action: ScheduleCommands, config: &LeadOpsConfig, format: OutputFormat) -> Result<()> {
    match action {
        ScheduleCommands::Distribute { file, min_delay } => {
            let minutes = min_delay.unwrap_or(config.throttling.min_delay_minutes);
            format.print(&SendList(distribute(&file, minutes)?))?;
        }
        ScheduleCommands::Optimal { base, step, wait, floor } => {
            let floor = floor.unwrap_or(config.throttling.min_delay_minutes);
            format.print(&optimal(base, step, wait, floor)?)?;
        }
        ScheduleCommands::Plan { file, enrolled_at, floor } => {
            let floor = floor.unwrap_or(config.throttling.min_delay_minutes);
            let enrolled_at = enrolled_at.unwrap_or_else(Utc::now);
            format.print(&StepPlan(plan(&file, enrolled_at, floor)?))?;
        }
        ScheduleCommands::Check { sender } => {
            format.print(&check(&sender, config, Utc::now()).await?)?;
        }
        ScheduleCommands::Record { sender, at } => {
            format.print(&record(&sender, config, at.unwrap_or_else(Utc::now)).await?)?;
        }
    }
    Ok(())
}

pub fn distribute(file: &Path, min_delay_minutes: u32) -> Result<Vec<ScheduledSend>> {
    let sends: Vec<ScheduledSend> = read_json(file)?;
    Ok(distribute_email_timing(sends, Duration::minutes(i64::from(min_delay_minutes))))
}

pub fn optimal(base: DateTime<Utc>, step: u32, wait_seconds: u64, floor_minutes: u32) -> Result<OptimalView> {
    if wait_seconds > leadops_scheduler::domain::MAX_WAIT_SECONDS {
        return Err(SequenceError::WaitOutOfRange {
            step_number: step,
            wait_seconds,
        }
        .into());
    }
    let wait = Duration::seconds(wait_seconds as i64);
    let floor = Duration::minutes(i64::from(floor_minutes));
    let send_at = calculate_optimal_send_time(base, step, wait, floor);
    Ok(OptimalView {
        base,
        step_number: step,
        send_at,
        delay_seconds: (send_at - base).num_seconds(),
    })
}

pub fn plan(file: &Path, enrolled_at: DateTime<Utc>, floor_minutes: u32) -> Result<Vec<PlannedStep>> {
    let steps: Vec<OutreachStep> = read_json(file)?;
    let sequence = Sequence::new(steps).with_context(|| format!("invalid sequence in {}", file.display()))?;
    Ok(plan_sequence(enrolled_at, &sequence, Duration::minutes(i64::from(floor_minutes))))
}

fn open(args: &SenderArgs, config: &LeadOpsConfig) -> Result<(Arc<InMemoryThrottleStateRepository>, ThrottlingService)> {
    let repo = Arc::new(InMemoryThrottleStateRepository::new());
    for state in read_json_or_empty::<ThrottlingState>(&args.state)? {
        repo.insert(state);
    }
    let service = ThrottlingService::new(repo.clone(), &config.throttling);
    Ok((repo, service))
}

fn daily_limit(args: &SenderArgs, service: &ThrottlingService) -> u32 {
    args.daily_limit.unwrap_or_else(|| service.daily_limit_for(args.channel))
}

pub async fn check(args: &SenderArgs, config: &LeadOpsConfig, now: DateTime<Utc>) -> Result<DecisionView> {
    let (_, service) = open(args, config)?;
    let sender = SenderIdentity::new(args.sender.as_str());
    let decision = service.check_throttling_at(&sender, daily_limit(args, &service), now).await;
    let next_allowed_at = (decision.wait_seconds > 0).then(|| decision.next_allowed_at(now));
    Ok(DecisionView {
        sender,
        next_allowed_at,
        decision,
    })
}

pub async fn record(args: &SenderArgs, config: &LeadOpsConfig, at: DateTime<Utc>) -> Result<ThrottlingState> {
    let (repo, service) = open(args, config)?;
    let sender = SenderIdentity::new(args.sender.as_str());
    let state = service.record_send(&sender, daily_limit(args, &service), at).await?;

    let mut all: Vec<ThrottlingState> = read_json_or_empty(&args.state)?;
    all.retain(|s| s.sender != sender);
    all.extend(repo.get(&sender));
    write_json(&args.state, &all)?;
    Ok(state)
}

// =============================================================================
// Views
// =============================================================================

#[derive(Serialize)]
#[serde(transparent)]
pub struct SendList(pub Vec<ScheduledSend>);

#[derive(Tabled)]
struct SendRow {
    #[tabled(rename = "Lead")]
    lead: String,
    #[tabled(rename = "Scheduled at")]
    scheduled_at: String,
}

impl Render for SendList {
    fn table(&self) -> String {
        table(self.0.iter().map(|s| SendRow {
            lead: s.lead_id.to_string(),
            scheduled_at: s.scheduled_at.to_rfc3339(),
        }))
    }
}

#[derive(Debug, Serialize)]
pub struct OptimalView {
    pub base: DateTime<Utc>,
    pub step_number: u32,
    pub send_at: DateTime<Utc>,
    pub delay_seconds: i64,
}

impl Render for OptimalView {
    fn table(&self) -> String {
        table(vec![
            Field::new("Base", self.base.to_rfc3339()),
            Field::new("Step", self.step_number),
            Field::new("Send at", self.send_at.to_rfc3339()),
            Field::new("Delay (s)", self.delay_seconds),
        ])
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct StepPlan(pub Vec<PlannedStep>);

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Step")]
    step: u32,
    #[tabled(rename = "Channel")]
    channel: &'static str,
    #[tabled(rename = "Send at")]
    send_at: String,
}

impl Render for StepPlan {
    fn table(&self) -> String {
        table(self.0.iter().map(|p| PlanRow {
            step: p.step_number,
            channel: p.channel_type.as_str(),
            send_at: p.send_at.to_rfc3339(),
        }))
    }
}

#[derive(Serialize)]
pub struct DecisionView {
    pub sender: SenderIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_allowed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub decision: ThrottlingDecision,
}

impl Render for DecisionView {
    fn table(&self) -> String {
        let d = &self.decision;
        let verdict = if d.can_send { "yes".green() } else { "no".red() };
        let mut rows = vec![
            Field::new("Sender", &self.sender),
            Field::new("Can send", verdict),
            Field::new("Sent today", format!("{}/{}", d.sent_count_today, d.daily_limit)),
            Field::new("Wait (s)", d.wait_seconds),
            Field::new(
                "Next allowed",
                self.next_allowed_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".into()),
            ),
            Field::new(
                "Last sent",
                d.last_sent_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".into()),
            ),
        ];
        if let Some(reason) = d.reason {
            rows.push(Field::new("Reason", format!("{:?}", reason)));
        }
        if d.degraded {
            rows.push(Field::new("Degraded", "state store unavailable".yellow()));
        }
        table(rows)
    }
}

impl Render for ThrottlingState {
    fn table(&self) -> String {
        table(vec![
            Field::new("Sender", &self.sender),
            Field::new("Sent today", format!("{}/{}", self.sent_count_today, self.daily_limit)),
            Field::new("Remaining", self.remaining_today()),
            Field::new(
                "Last sent",
                self.last_sent_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".into()),
            ),
        ])
    }
}
