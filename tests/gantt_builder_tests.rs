mod common;

use chrono::NaiveDate;
use common::{create_project, create_task, utc};
use timeline_core::model::{duration_days, flatten};
use timeline_core::{
    DateRange, NodeType, Priority, ProjectRecord, TaskRecord, TimelineFilters, WorkItem, build,
    build_with_report,
};
use timeline_core::timeline::build_from_items;

fn sample_records() -> (Vec<ProjectRecord>, Vec<TaskRecord>) {
    let projects = vec![
        create_project("web", "2024-01-01", Some("2024-06-30")),
        create_project("app", "2024-02-01", Some("2024-03-01")),
    ];

    let mut design = create_task("design", "web", "2024-01-05", Some("2024-01-20"));
    design.assignee_id = Some("alice".to_string());
    design.priority = "high".to_string();
    design.status = "done".to_string();

    let mut build_site = create_task("build", "web", "2024-01-10", Some("2024-02-15"));
    build_site.assignee_id = Some("bob".to_string());
    build_site.status = "in-progress".to_string();

    let undated = create_task("docs", "web", "2024-01-10", None);
    let orphan = create_task("lost", "missing-project", "2024-01-10", Some("2024-01-12"));

    (projects, vec![design, build_site, undated, orphan])
}

// Projects keep input order and children keep task scan order
#[test]
fn test_build_preserves_order_and_shape() {
    let (projects, tasks) = sample_records();
    let forest = build(&projects, &tasks, &TimelineFilters::default());

    let ids: Vec<&str> = forest.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["web", "app"]);

    let children: Vec<&str> = forest[0].children.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(children, vec!["design", "build"]);
    assert!(forest[1].children.is_empty());

    for child in &forest[0].children {
        assert_eq!(child.node_type, NodeType::Task);
        assert_eq!(child.parent_id.as_deref(), Some("web"));
        assert!(child.children.is_empty());
    }
}

// Every node satisfies the duration and ordering invariants
#[test]
fn test_duration_invariant_holds_for_every_node() {
    let (projects, tasks) = sample_records();
    let forest = build(&projects, &tasks, &TimelineFilters::default());

    for node in flatten(&forest) {
        assert!(node.end_date >= node.start_date, "{} ends before it starts", node.id);
        assert_eq!(node.duration_days, duration_days(node.start_date, node.end_date));
        assert!(node.duration_days >= 1);
    }
}

// A project with dated tasks takes its span from them
#[test]
fn test_project_span_derived_from_tasks() {
    let (projects, tasks) = sample_records();
    let forest = build(&projects, &tasks, &TimelineFilters::default());

    let web = &forest[0];
    assert_eq!(web.start_date, utc(2024, 1, 5));
    assert_eq!(web.end_date, utc(2024, 2, 15));
    assert_eq!(web.duration_days, 41);

    // No dated tasks: falls back to created_at .. due_date
    let app = &forest[1];
    assert_eq!(app.start_date, utc(2024, 2, 1));
    assert_eq!(app.end_date, utc(2024, 3, 1));
    assert_eq!(app.duration_days, 29);
}

// Dropped tasks are counted rather than silently lost
#[test]
fn test_report_counts_dropped_tasks() {
    let (projects, tasks) = sample_records();
    let (forest, report) = build_with_report(&projects, &tasks, &TimelineFilters::default());

    assert_eq!(report.projects_emitted, forest.len());
    assert_eq!(report.tasks_emitted, 2);
    assert_eq!(report.tasks_without_due_date, 1);
    assert_eq!(report.orphaned_tasks, 1);
    assert_eq!(report.tasks_filtered_out, 0);
    assert_eq!(report.projects_without_dates, 0);
}

// Progress comes from status unless given explicitly
#[test]
fn test_progress_and_color() {
    let (mut projects, tasks) = sample_records();
    projects[0].progress = Some(42.0);
    let forest = build(&projects, &tasks, &TimelineFilters::default());

    assert_eq!(forest[0].progress, 42);
    assert_eq!(forest[1].progress, 0);
    assert_eq!(forest[0].children[0].progress, 100);
    assert_eq!(forest[0].children[1].progress, 50);
    assert_eq!(forest[0].children[0].priority, Priority::High);
    assert_eq!(forest[0].children[0].assignee_ids, vec!["alice".to_string()]);

    assert_eq!(forest[0].color, "#3b82f6");
    assert_eq!(forest[0].children[0].color, "#10b981");
}

// A project stays visible even when all its tasks are filtered out
#[test]
fn test_project_kept_when_all_tasks_filtered() {
    let (projects, tasks) = sample_records();
    let filters = TimelineFilters {
        assignees: vec!["carol".to_string()],
        ..Default::default()
    };
    let (forest, report) = build_with_report(&projects, &tasks, &filters);

    assert_eq!(forest.len(), 2);
    assert!(forest[0].children.is_empty());
    assert_eq!(report.tasks_filtered_out, 2);
    // The project bar does not move when its tasks are hidden
    assert_eq!(forest[0].start_date, utc(2024, 1, 5));
}

// Task filters drop some but not all children
#[test]
fn test_task_level_filters() {
    let (projects, tasks) = sample_records();

    let by_assignee = TimelineFilters {
        assignees: vec!["bob".to_string()],
        ..Default::default()
    };
    let forest = build(&projects, &tasks, &by_assignee);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].id, "build");

    let by_priority = TimelineFilters {
        priority: vec![Priority::High],
        ..Default::default()
    };
    let forest = build(&projects, &tasks, &by_priority);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].id, "design");

    let by_status = TimelineFilters {
        status: vec!["in-progress".to_string(), "todo".to_string()],
        ..Default::default()
    };
    let forest = build(&projects, &tasks, &by_status);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].id, "build");
}

// Project-level filters remove whole projects
#[test]
fn test_project_level_filters() {
    let (projects, tasks) = sample_records();

    let by_id = TimelineFilters {
        project_ids: vec!["app".to_string()],
        ..Default::default()
    };
    let forest = build(&projects, &tasks, &by_id);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id, "app");

    let in_february = TimelineFilters {
        date_range: Some(DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
        )),
        ..Default::default()
    };
    let forest = build(&projects, &tasks, &in_february);
    let ids: Vec<&str> = forest.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["app"]);
}

// Tasks of a filtered-out project are counted, so every task is accounted for
#[test]
fn test_report_accounts_for_every_task() {
    let (projects, tasks) = sample_records();
    let filters = TimelineFilters {
        project_ids: vec!["app".to_string()],
        ..Default::default()
    };

    let (_, report) = build_with_report(&projects, &tasks, &filters);
    assert_eq!(report.tasks_emitted, 0);
    assert_eq!(report.tasks_filtered_out, 2);
    assert_eq!(
        report.tasks_emitted
            + report.tasks_filtered_out
            + report.tasks_without_due_date
            + report.orphaned_tasks,
        tasks.len()
    );
}

// The date range also applies to individual tasks
#[test]
fn test_date_range_filters_tasks() {
    let (projects, tasks) = sample_records();
    let filters = TimelineFilters {
        date_range: Some(DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        )),
        ..Default::default()
    };
    let forest = build(&projects, &tasks, &filters);
    let web = forest.iter().find(|n| n.id == "web").unwrap();
    let children: Vec<&str> = web.children.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(children, vec!["build"]);
}

// Projects degrade to whatever dates they have, and vanish with none
#[test]
fn test_projects_with_partial_or_missing_dates() {
    let projects = vec![
        create_project("half", "2024-04-01", Some("someday")),
        ProjectRecord {
            id: "none".to_string(),
            name: "No dates".to_string(),
            created_at: Some("".to_string()),
            ..Default::default()
        },
    ];
    let (forest, report) = build_with_report(&projects, &[], &TimelineFilters::default());

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id, "half");
    assert_eq!(forest[0].start_date, forest[0].end_date);
    assert_eq!(forest[0].duration_days, 1);
    assert_eq!(report.projects_without_dates, 1);
}

// An undated project can still be placed through its tasks
#[test]
fn test_undated_project_uses_task_span() {
    let projects = vec![ProjectRecord {
        id: "p".to_string(),
        name: "P".to_string(),
        ..Default::default()
    }];
    let tasks = vec![create_task("t", "p", "2024-05-01", Some("2024-05-03"))];
    let forest = build(&projects, &tasks, &TimelineFilters::default());

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].start_date, utc(2024, 5, 1));
    assert_eq!(forest[0].end_date, utc(2024, 5, 3));
}

// Milestone tasks become milestone nodes
#[test]
fn test_milestone_tasks() {
    let projects = vec![create_project("p", "2024-01-01", Some("2024-02-01"))];
    let mut launch = create_task("launch", "p", "2024-01-31", Some("2024-01-31"));
    launch.milestone = true;
    launch.dependency_ids = vec!["other".to_string()];
    let forest = build(&projects, &[launch], &TimelineFilters::default());

    let node = &forest[0].children[0];
    assert_eq!(node.node_type, NodeType::Milestone);
    assert_eq!(node.duration_days, 1);
    assert_eq!(node.dependency_ids, vec!["other".to_string()]);
}

// Mixed work items are split before building
#[test]
fn test_build_from_work_items() {
    let items = vec![
        WorkItem::Task(create_task("t", "p", "2024-01-01", Some("2024-01-04"))),
        WorkItem::Project(create_project("p", "2024-01-01", None)),
    ];
    let (forest, report) = build_from_items(items, &TimelineFilters::default());
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].duration_days, 3);
    assert_eq!(report.orphaned_tasks, 0);
}
