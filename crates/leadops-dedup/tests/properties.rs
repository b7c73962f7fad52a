//! Property tests for lead analysis invariants.

use chrono::{Duration, TimeZone, Utc};
use leadops_common::{DedupConfig, EmailCaseFolding};
use leadops_dedup::{AnalysisScope, DuplicateAnalyzer, EmailAddress, Lead, PhoneNumber, RemovalPlan};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_phone() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("EMPTY".to_string())),
        Just(Some("n/a".to_string())),
        "[0-9]{3}".prop_map(Some),
        "555[0-9]{2}".prop_map(|tail| Some(format!("(555) 12{}-00", tail))),
        "[0-9]{2}".prop_map(|tail| Some(format!("+1 555 000 00{}", tail))),
    ]
}

fn arb_email() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("  ".to_string())),
        Just(Some("NULL".to_string())),
        "[a-z]{1,6}".prop_map(Some),
        "[a-c]{1,2}".prop_map(|user| Some(format!("{}@Example.com", user))),
        "[a-c]{1,2}".prop_map(|user| Some(format!(" {}@example.COM ", user.to_uppercase()))),
    ]
}

fn arb_leads() -> impl Strategy<Value = Vec<Lead>> {
    prop::collection::vec((arb_phone(), arb_email(), 0i64..50, prop::option::of("c[12]")), 0..60)
        .prop_map(|rows| {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            rows.into_iter()
                .enumerate()
                .map(|(i, (phone, email, offset, campaign))| {
                    let mut lead = Lead::new(format!("lead-{i}").as_str(), base + Duration::minutes(offset));
                    if let Some(p) = phone {
                        lead = lead.with_phone(p);
                    }
                    if let Some(e) = email {
                        lead = lead.with_email(e);
                    }
                    if let Some(c) = campaign {
                        lead = lead.in_campaign(c.as_str());
                    }
                    lead
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn every_lead_lands_in_one_bucket(leads in arb_leads()) {
        let report = DuplicateAnalyzer::default().analyze(&leads, &AnalysisScope::account());

        prop_assert_eq!(report.total_leads, leads.len());
        prop_assert_eq!(
            report.valid_phone + report.empty_phone + report.invalid_phone_format,
            report.total_leads
        );
        prop_assert_eq!(
            report.valid_email + report.empty_email + report.invalid_email_format,
            report.total_leads
        );
        prop_assert_eq!(
            report.with_both + report.phone_only + report.email_only + report.with_neither,
            report.total_leads
        );
    }

    #[test]
    fn groups_are_real_duplicates(leads in arb_leads()) {
        let report = DuplicateAnalyzer::default().analyze(&leads, &AnalysisScope::account());

        for group in &report.duplicate_groups {
            prop_assert!(group.count >= 2);
            prop_assert_eq!(group.count, group.lead_ids.len());
            let unique: HashSet<_> = group.lead_ids.iter().collect();
            prop_assert_eq!(unique.len(), group.lead_ids.len());
        }
    }

    #[test]
    fn removal_plan_leaves_at_most_one_per_group(leads in arb_leads()) {
        let report = DuplicateAnalyzer::default().analyze(&leads, &AnalysisScope::account());
        let plan = RemovalPlan::from_groups(&report.duplicate_groups);
        let doomed: HashSet<_> = plan.doomed().collect();

        prop_assert_eq!(plan.doomed().count(), plan.total_to_remove());
        prop_assert_eq!(doomed.len(), plan.total_to_remove());
        prop_assert_eq!(report.duplicate_count, plan.total_to_remove());
        for group in &report.duplicate_groups {
            let survivors: HashSet<_> = group.lead_ids.iter().filter(|id| !doomed.contains(id)).collect();
            prop_assert!(survivors.len() <= 1);
        }
    }

    #[test]
    fn second_pass_finds_nothing(leads in arb_leads()) {
        let analyzer = DuplicateAnalyzer::default();
        let scope = AnalysisScope::account();
        let plan = RemovalPlan::from_groups(&analyzer.analyze(&leads, &scope).duplicate_groups);
        let doomed: HashSet<_> = plan.doomed().cloned().collect();

        let survivors: Vec<Lead> = leads.iter().filter(|l| !doomed.contains(l.id())).cloned().collect();
        prop_assert!(!analyzer.analyze(&survivors, &scope).has_duplicates());
    }

    #[test]
    fn campaign_scope_never_mixes_campaigns(leads in arb_leads()) {
        let report = DuplicateAnalyzer::default()
            .analyze(&leads, &AnalysisScope::account_per_campaign());

        for group in &report.duplicate_groups {
            let campaigns: HashSet<_> = group
                .lead_ids
                .iter()
                .map(|id| leads.iter().find(|l| l.id() == id).and_then(|l| l.campaign_id()))
                .collect();
            prop_assert_eq!(campaigns.len(), 1);
        }
    }

    #[test]
    fn phone_normalization_is_idempotent(raw in "[ ()+.0-9-]{0,20}") {
        let once = PhoneNumber::normalize(&raw);
        prop_assert_eq!(PhoneNumber::normalize(&once), once);
    }

    #[test]
    fn email_normalization_is_idempotent(raw in "[ a-zA-Z@.]{0,20}") {
        for folding in [EmailCaseFolding::Lowercase, EmailCaseFolding::DomainOnly] {
            let once = EmailAddress::normalize(&raw, folding);
            prop_assert_eq!(EmailAddress::normalize(&once, folding), once);
        }
    }

    #[test]
    fn config_placeholders_are_never_valid(raw in "(?i)(empty|null|none|n/a)") {
        let config = DedupConfig::default();
        let lead = Lead::new("x", Utc::now()).with_phone(raw.clone()).with_email(raw);
        let report = DuplicateAnalyzer::new(&config).analyze(&[lead], &AnalysisScope::account());

        prop_assert_eq!(report.empty_phone, 1);
        prop_assert_eq!(report.empty_email, 1);
    }
}
