use crate::infra::{read_json_file, EvaluatorSet};
use campus_portal::config::AppConfig;
use campus_portal::error::AppError;
use campus_portal::workflows::outpass::{
    gate_check, pending_for, OutpassRecord, OutpassReport, QueueOrder, ReviewerRole,
    StatusFilter, TimelineEntry,
};
use campus_portal::workflows::profile::{PolicyKind, StudentProfile};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ProfileCheckArgs {
    /// Profile document as returned by the portal backend (JSON, `null` for no profile)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Completeness policy: `full` (profile page) or `access-gate`. Defaults to PORTAL_DEFAULT_POLICY.
    #[arg(long, value_parser = parse_policy)]
    pub(crate) policy: Option<PolicyKind>,
}

#[derive(Args, Debug)]
pub(crate) struct OutpassReportArgs {
    /// Outpass listing (JSON array)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Only show records whose derived status matches: all, approved, rejected, pending
    #[arg(long, default_value = "all", value_parser = parse_filter)]
    pub(crate) filter: StatusFilter,
}

#[derive(Args, Debug)]
pub(crate) struct OutpassQueueArgs {
    /// Outpass listing (JSON array)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Reviewer whose pending queue to list: staff, year-incharge, warden
    #[arg(long, value_parser = parse_role)]
    pub(crate) role: ReviewerRole,
    /// Order by start date, newest first, instead of submission order
    #[arg(long)]
    pub(crate) newest_first: bool,
}

#[derive(Args, Debug)]
pub(crate) struct GateCheckArgs {
    /// Outpass listing (JSON array)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Only check the record with this id
    #[arg(long)]
    pub(crate) id: Option<String>,
    /// Date of the gate check (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn parse_policy(raw: &str) -> Result<PolicyKind, String> {
    PolicyKind::parse(raw).ok_or_else(|| format!("unknown policy '{raw}'"))
}

fn parse_role(raw: &str) -> Result<ReviewerRole, String> {
    ReviewerRole::parse(raw).ok_or_else(|| format!("unknown reviewer role '{raw}'"))
}

fn parse_filter(raw: &str) -> Result<StatusFilter, String> {
    Ok(StatusFilter::parse(raw))
}

pub(crate) fn run_profile_check(args: ProfileCheckArgs) -> Result<(), AppError> {
    let ProfileCheckArgs { input, policy } = args;

    let config = AppConfig::load()?;
    let profile: Option<StudentProfile> = read_json_file(&input)?;
    let evaluators = EvaluatorSet::from_config(&config.portal);
    let policy = evaluators.resolve(policy);
    let outcome = evaluators.profile(policy).evaluate(profile.as_ref());

    println!("Profile completeness ({} policy)", policy.label());
    println!(
        "  {}% ({} of {} required fields)",
        outcome.percentage, outcome.filled, outcome.required
    );
    if outcome.is_complete {
        println!("  Status: complete");
    } else {
        println!("  Status: incomplete");
        if !outcome.missing.is_empty() {
            println!("  Missing: {}", outcome.missing_labels().join(", "));
        }
    }

    Ok(())
}

pub(crate) fn run_outpass_report(args: OutpassReportArgs) -> Result<(), AppError> {
    let OutpassReportArgs { input, filter } = args;

    let records: Vec<OutpassRecord> = read_json_file(&input)?;
    let report = OutpassReport::build(&records);

    println!("Outpass summary");
    println!(
        "  Total {} | Approved {} | Rejected {} | Pending {}",
        report.summary.total, report.summary.approved, report.summary.rejected, report.summary.pending
    );

    println!("\nReviewer workload");
    for entry in &report.role_load {
        println!(
            "  {:<14} pending {:>3} (emergencies {})",
            entry.role_label, entry.pending, entry.emergencies
        );
    }

    let selected = filter.apply(&records);
    println!("\nRecords ({}: {})", filter.label(), selected.len());
    for record in selected {
        render_record(record);
    }

    Ok(())
}

pub(crate) fn run_outpass_queue(args: OutpassQueueArgs) -> Result<(), AppError> {
    let OutpassQueueArgs {
        input,
        role,
        newest_first,
    } = args;

    let records: Vec<OutpassRecord> = read_json_file(&input)?;
    let order = if newest_first {
        QueueOrder::NewestFirst
    } else {
        QueueOrder::Submission
    };
    let queue = pending_for(role, &records, order);

    println!("{} queue ({} awaiting decision)", role.label(), queue.len());
    for record in queue {
        render_record(record);
    }

    Ok(())
}

pub(crate) fn run_gate_check(args: GateCheckArgs) -> Result<(), AppError> {
    let GateCheckArgs { input, id, today } = args;

    let records: Vec<OutpassRecord> = read_json_file(&input)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Gate check for {}", today);
    let mut checked = 0;
    for record in records
        .iter()
        .filter(|record| id.is_none() || record.id == id)
    {
        checked += 1;
        let check = gate_check(record, today);
        println!(
            "  {:<12} {:<18} {}",
            record.id.as_deref().unwrap_or("-"),
            record.student_name.as_deref().unwrap_or("-"),
            check.label()
        );
    }
    if checked == 0 {
        println!("  No matching outpass records");
    }

    Ok(())
}

fn render_record(record: &OutpassRecord) {
    let view = record.to_view();
    let window = match (view.from_date, view.to_date) {
        (Some(from), Some(to)) => format!("{from} to {to}"),
        (Some(from), None) => format!("from {from}"),
        (None, Some(to)) => format!("until {to}"),
        (None, None) => "dates not set".to_string(),
    };

    println!(
        "  {} {} [{}{}] {} | {}",
        view.id.as_deref().unwrap_or("-"),
        view.student_name.as_deref().unwrap_or("-"),
        view.outpass_type,
        if view.emergency { ", priority" } else { "" },
        window,
        view.overall_status_label
    );
    println!("    {}", render_timeline(&view.timeline));
}

fn render_timeline(timeline: &[TimelineEntry]) -> String {
    timeline
        .iter()
        .map(|entry| match entry.remarks.as_deref() {
            Some(remarks) => format!(
                "{}: {} ({})",
                entry.stage_label, entry.state_label, remarks
            ),
            None => format!("{}: {}", entry.stage_label, entry.state_label),
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
