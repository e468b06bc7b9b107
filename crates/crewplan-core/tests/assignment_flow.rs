//! End-to-end flow through the public API: filter a backlog by
//! methodology, then assign what remains.

use crewplan_core::{
    build_role_index, filter_tasks_by_methodology, generate_assignments, Roster, Task, TeamMember,
};

fn team() -> Vec<TeamMember> {
    vec![
        TeamMember::new("m1", "Ada Lovelace", vec!["PM"]),
        TeamMember::new("m2", "Grace Hopper", vec!["PM", "Logistics"]),
        TeamMember::new("m3", "Edsger Dijkstra", Vec::<String>::new()),
    ]
}

fn backlog() -> Vec<Task> {
    vec![
        Task::new("t1", "PM").with_methodology("Quant"),
        Task::new("t2", "Logistics").with_methodology("Qual"),
        Task::new("t3", "Catering"),
    ]
}

#[tokio::test]
async fn full_backlog_assigns_in_stable_order() {
    let assignments = generate_assignments(&backlog(), &team()).await.unwrap();

    let pairs: Vec<(&str, &str)> = assignments
        .iter()
        .map(|a| (a.task_id.as_str(), a.assigned_to.as_str()))
        .collect();
    // t1 fans out to both PMs, t2 to the one Logistics member, t3 matches nobody.
    assert_eq!(pairs, [("t1", "m1"), ("t1", "m2"), ("t2", "m2")]);
}

#[tokio::test]
async fn methodology_scoping_before_assignment() {
    let quant_only = filter_tasks_by_methodology(&backlog(), "quant");
    let ids: Vec<&str> = quant_only.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t1", "t3"]); // t3 has no methodology tag, always kept

    let assignments = generate_assignments(&quant_only, &team()).await.unwrap();
    assert!(assignments.iter().all(|a| a.task_id == "t1"));
    assert_eq!(assignments.len(), 2);
}

#[tokio::test]
async fn roster_file_feeds_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");

    Roster {
        team: team(),
        tasks: backlog(),
    }
    .to_file(&path)
    .unwrap();

    let roster = Roster::from_file(&path).unwrap();
    let index = build_role_index(&roster.team);
    assert_eq!(index.members_for("PM").unwrap(), ["m1", "m2"]);

    let assignments = generate_assignments(&roster.tasks, &roster.team)
        .await
        .unwrap();
    assert_eq!(assignments.len(), 3);
}
