//! Timeline Core - Command-line host
//!
//! Loads a TOML snapshot of project, task and calendar records, runs the
//! timeline engine over it and prints a text outline.
//! The actual implementation is in the `timeline_core` library.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use timeline_core::formatting;
use timeline_core::model::{local_date_today, start_of_day};
use timeline_core::{Storage, compose, expand_all, validation};

/// Timeline Core - Gantt view, critical path and recurring events from a record snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML snapshot file
    file: PathBuf,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    today: Option<String>,

    /// View mode: day, week, month, quarter, year
    #[arg(long)]
    view: Option<String>,

    /// Group by: none, project, assignee, priority, status
    #[arg(long)]
    group_by: Option<String>,

    /// Critical path mode: disabled, longest-child, dependency
    #[arg(long)]
    critical_path: Option<String>,

    /// Days past the reference date to expand recurring events
    #[arg(long)]
    horizon_days: Option<i64>,

    /// Only these projects (comma-separated ids)
    #[arg(long)]
    projects: Option<String>,

    /// Only tasks assigned to these users (comma-separated ids)
    #[arg(long)]
    assignees: Option<String>,

    /// Only tasks with these priorities (comma-separated)
    #[arg(long)]
    priority: Option<String>,

    /// Only tasks with these statuses (comma-separated)
    #[arg(long)]
    status: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    init_tracing(args.verbose);

    let storage = Storage::new(&args.file);
    let snapshot = storage
        .load()
        .with_context(|| format!("Failed to load snapshot from {}", storage.path().display()))?;

    let mut options = snapshot.view.clone();
    if let Some(ref view) = args.view {
        options.view_mode = validation::parse_view_mode(view)?;
    }
    if let Some(ref group_by) = args.group_by {
        options.group_by = validation::parse_group_by(group_by)?;
    }
    if let Some(ref mode) = args.critical_path {
        options.critical_path = validation::parse_critical_path_mode(mode)?;
    }
    if let Some(days) = args.horizon_days {
        options.recurrence_horizon_days = days;
    }

    let mut filters = snapshot.filters.clone();
    if let Some(ref projects) = args.projects {
        filters.project_ids = validation::split_list(projects);
    }
    if let Some(ref assignees) = args.assignees {
        filters.assignees = validation::split_list(assignees);
    }
    if let Some(ref priority) = args.priority {
        filters.priority = validation::parse_priority_list(priority)?;
    }
    if let Some(ref status) = args.status {
        filters.status = validation::split_list(status);
    }

    let today = match args.today {
        Some(ref raw) => validation::parse_date_arg(raw)?,
        None => local_date_today(),
    };

    let view = compose(&snapshot.projects, &snapshot.tasks, &filters, &options, today);

    print!("{}", formatting::format_window(&view.window));
    println!();
    print!("{}", formatting::format_forest(&view.forest, &view.critical));
    print!("{}", formatting::format_report(&view.report));
    println!();
    print!("{}", formatting::format_groups(&view.groups));

    if !snapshot.events.is_empty() {
        let horizon = TimeDelta::try_days(options.recurrence_horizon_days.max(0))
            .and_then(|ahead| start_of_day(today).checked_add_signed(ahead))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let events = expand_all(&snapshot.events, horizon);
        println!();
        print!("{}", formatting::format_events(&events));
    }

    Ok(())
}
