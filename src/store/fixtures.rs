use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::models::{
    Activity, ActivityKind, Capability, CapabilityStatus, DashboardStats, Priority, Project,
    ProjectStatus, Session, Skill, Task, TaskStatus,
};

/// Everything the dashboard displays, materialized up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub stats: DashboardStats,
}

impl Fixtures {
    /// Parse a fixture set from JSON. Enum fields are checked here, so the
    /// rest of the program never sees an unknown status or priority.
    pub fn from_json(json: &str) -> Result<Self> {
        let fixtures: Fixtures = serde_json::from_str(json).context("invalid fixture data")?;
        Ok(fixtures)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixtures from {}", path.display()))?;
        let fixtures = Self::from_json(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::info!(
            "loaded {} tasks, {} projects, {} sessions from {}",
            fixtures.tasks.len(),
            fixtures.projects.len(),
            fixtures.sessions.len(),
            path.display()
        );
        Ok(fixtures)
    }

    /// Built-in sample data, with timestamps placed relative to `now` so the
    /// relative-time labels read naturally whenever the dashboard is opened.
    pub fn sample(now: DateTime<Utc>) -> Self {
        let mins = |m: i64| now - Duration::minutes(m);
        let hours = |h: i64| now - Duration::hours(h);
        let days = |d: i64| now - Duration::days(d);
        let in_days = |d: i64| now + Duration::days(d);
        let tags = |t: &[&str]| t.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();

        let tasks = vec![
            Task {
                id: "task-1".into(),
                title: "Ship the weekly digest email".into(),
                description: "Summarize completed work and open questions for the weekly update."
                    .into(),
                status: TaskStatus::InProgress,
                priority: Priority::High,
                project: Some("Inbox Zero".into()),
                assigned_to: Some("Mike Jr.".into()),
                created_at: days(3),
                updated_at: mins(25),
                due_date: Some(in_days(1)),
                tags: tags(&["email", "weekly"]),
            },
            Task {
                id: "task-2".into(),
                title: "Fix calendar sync for shared events".into(),
                description: "Recurring events from shared calendars are duplicated after sync."
                    .into(),
                status: TaskStatus::Blocked,
                priority: Priority::Urgent,
                project: Some("Calendar Assistant".into()),
                assigned_to: Some("Mike Jr.".into()),
                created_at: days(5),
                updated_at: hours(3),
                due_date: Some(now),
                tags: tags(&["bug", "calendar", "sync", "oauth"]),
            },
            Task {
                id: "task-3".into(),
                title: "Draft research notes on vector stores".into(),
                description: "Compare three embedded vector stores for the notes search feature."
                    .into(),
                status: TaskStatus::Todo,
                priority: Priority::Medium,
                project: Some("Knowledge Base".into()),
                assigned_to: None,
                created_at: days(2),
                updated_at: days(2),
                due_date: Some(in_days(6)),
                tags: tags(&["research"]),
            },
            Task {
                id: "task-4".into(),
                title: "Archive stale newsletters".into(),
                description: "Move newsletters older than 30 days out of the inbox.".into(),
                status: TaskStatus::Completed,
                priority: Priority::Low,
                project: Some("Inbox Zero".into()),
                assigned_to: Some("Mike Jr.".into()),
                created_at: days(9),
                updated_at: days(1),
                due_date: None,
                tags: tags(&["email", "cleanup"]),
            },
            Task {
                id: "task-5".into(),
                title: "Prepare travel itinerary".into(),
                description: "Flights, hotel and a day-by-day plan for the conference trip."
                    .into(),
                status: TaskStatus::Todo,
                priority: Priority::Urgent,
                project: Some("Calendar Assistant".into()),
                assigned_to: None,
                created_at: days(1),
                updated_at: hours(5),
                due_date: Some(in_days(2)),
                tags: tags(&["travel"]),
            },
            Task {
                id: "task-6".into(),
                title: "Tag untagged notes".into(),
                description: "Suggest tags for notes imported last month.".into(),
                status: TaskStatus::InProgress,
                priority: Priority::Medium,
                project: Some("Knowledge Base".into()),
                assigned_to: Some("Mike Jr.".into()),
                created_at: days(4),
                updated_at: hours(1),
                due_date: None,
                tags: tags(&["notes", "tagging"]),
            },
            Task {
                id: "task-7".into(),
                title: "Renew domain registration".into(),
                description: String::new(),
                status: TaskStatus::Todo,
                priority: Priority::Low,
                project: None,
                assigned_to: None,
                created_at: days(12),
                updated_at: days(12),
                due_date: Some(in_days(20)),
                tags: vec![],
            },
            Task {
                id: "task-8".into(),
                title: "Reply to onboarding questions".into(),
                description: "Three new users asked about exporting their history.".into(),
                status: TaskStatus::Completed,
                priority: Priority::High,
                project: Some("Inbox Zero".into()),
                assigned_to: Some("Mike Jr.".into()),
                created_at: days(2),
                updated_at: hours(20),
                due_date: None,
                tags: tags(&["support"]),
            },
        ];

        let tasks_for = |name: &str| {
            tasks
                .iter()
                .filter(|t| t.project.as_deref() == Some(name))
                .cloned()
                .collect::<Vec<_>>()
        };

        let projects = vec![
            Project {
                id: "proj-1".into(),
                name: "Inbox Zero".into(),
                description: "Keep the shared inbox triaged and answered within a day.".into(),
                status: ProjectStatus::Active,
                progress: 68,
                tasks: tasks_for("Inbox Zero"),
                created_at: days(40),
                last_activity: mins(25),
                tags: tags(&["email", "support", "routine", "daily"]),
            },
            Project {
                id: "proj-2".into(),
                name: "Calendar Assistant".into(),
                description: "Scheduling, reminders and travel planning.".into(),
                status: ProjectStatus::Active,
                progress: 35,
                tasks: tasks_for("Calendar Assistant"),
                created_at: days(21),
                last_activity: hours(3),
                tags: tags(&["calendar"]),
            },
            Project {
                id: "proj-3".into(),
                name: "Knowledge Base".into(),
                description: "Searchable notes with automatic tagging.".into(),
                status: ProjectStatus::Paused,
                progress: 52,
                tasks: tasks_for("Knowledge Base"),
                created_at: days(60),
                last_activity: hours(1),
                tags: tags(&["notes", "search"]),
            },
            Project {
                id: "proj-4".into(),
                name: "Voice Notes".into(),
                description: "Transcribe and file voice memos.".into(),
                status: ProjectStatus::Completed,
                progress: 100,
                tasks: vec![],
                created_at: days(120),
                last_activity: days(30),
                tags: vec![],
            },
        ];

        let sessions = vec![
            Session {
                id: "sess-1".into(),
                start_time: hours(2),
                end_time: Some(mins(75)),
                duration: Some(45 * 60),
                channel: "Slack".into(),
                messages: 42,
                tasks_created: 3,
                tasks_completed: 1,
                summary: Some("Planned the conference trip and flagged the calendar bug.".into()),
                tags: tags(&["planning", "travel", "calendar"]),
            },
            Session {
                id: "sess-2".into(),
                start_time: days(1) - Duration::hours(2),
                end_time: Some(days(1)),
                duration: Some(2 * 3600 + 5 * 60),
                channel: "Web".into(),
                messages: 88,
                tasks_created: 2,
                tasks_completed: 4,
                summary: Some("Inbox triage and onboarding replies.".into()),
                tags: tags(&["email"]),
            },
            Session {
                id: "sess-3".into(),
                start_time: days(3),
                end_time: None,
                duration: None,
                channel: "Telegram".into(),
                messages: 7,
                tasks_created: 1,
                tasks_completed: 0,
                summary: None,
                tags: vec![],
            },
            Session {
                id: "sess-4".into(),
                start_time: days(9),
                end_time: Some(days(9) + Duration::minutes(20)),
                duration: Some(20 * 60),
                channel: "Web".into(),
                messages: 15,
                tasks_created: 0,
                tasks_completed: 2,
                summary: Some("Reviewed the vector store shortlist.".into()),
                tags: tags(&["research"]),
            },
            Session {
                id: "sess-5".into(),
                start_time: days(14),
                end_time: Some(days(14) + Duration::minutes(50)),
                duration: Some(50 * 60),
                channel: "Slack".into(),
                messages: 31,
                tasks_created: 4,
                tasks_completed: 3,
                summary: None,
                tags: tags(&["notes"]),
            },
        ];

        let capabilities = vec![
            Capability {
                id: "cap-1".into(),
                name: "Email triage".into(),
                category: "Communication".into(),
                description: "Sort, label and draft replies for incoming mail.".into(),
                status: CapabilityStatus::Available,
                usage_count: 312,
                last_used: Some(mins(25)),
            },
            Capability {
                id: "cap-2".into(),
                name: "Calendar scheduling".into(),
                category: "Productivity".into(),
                description: "Find free slots and send invites.".into(),
                status: CapabilityStatus::Available,
                usage_count: 128,
                last_used: Some(hours(3)),
            },
            Capability {
                id: "cap-3".into(),
                name: "Slack summaries".into(),
                category: "Communication".into(),
                description: "Digest busy channels into a short summary.".into(),
                status: CapabilityStatus::Learning,
                usage_count: 9,
                last_used: Some(days(2)),
            },
            Capability {
                id: "cap-4".into(),
                name: "Web research".into(),
                category: "Research".into(),
                description: "Search, read and cite sources.".into(),
                status: CapabilityStatus::Available,
                usage_count: 87,
                last_used: Some(days(1)),
            },
            Capability {
                id: "cap-5".into(),
                name: "Legacy RSS reader".into(),
                category: "Research".into(),
                description: "Poll RSS feeds for updates.".into(),
                status: CapabilityStatus::Deprecated,
                usage_count: 2,
                last_used: Some(days(45)),
            },
            Capability {
                id: "cap-6".into(),
                name: "Expense reports".into(),
                category: "Productivity".into(),
                description: "Collect receipts and fill in expense forms.".into(),
                status: CapabilityStatus::Learning,
                usage_count: 0,
                last_used: None,
            },
        ];

        let skills = vec![
            Skill {
                id: "skill-1".into(),
                name: "Writing".into(),
                description: "Clear, concise prose in the user's voice.".into(),
                proficiency: 92,
                category: "Communication".into(),
                examples: tags(&["Weekly digests", "Support replies"]),
            },
            Skill {
                id: "skill-2".into(),
                name: "Rust".into(),
                description: "Systems programming and CLI tooling.".into(),
                proficiency: 78,
                category: "Engineering".into(),
                examples: tags(&["Terminal dashboards", "Parsers"]),
            },
            Skill {
                id: "skill-3".into(),
                name: "Negotiation".into(),
                description: "Scheduling across busy calendars.".into(),
                proficiency: 58,
                category: "Communication".into(),
                examples: vec![],
            },
            Skill {
                id: "skill-4".into(),
                name: "TypeScript".into(),
                description: "Front-end and tooling scripts.".into(),
                proficiency: 85,
                category: "Engineering".into(),
                examples: tags(&["Browser extensions"]),
            },
            Skill {
                id: "skill-5".into(),
                name: "Summarization".into(),
                description: "Condense long threads and documents.".into(),
                proficiency: 95,
                category: "Communication".into(),
                examples: tags(&["Meeting notes", "Slack digests", "Paper abstracts"]),
            },
            Skill {
                id: "skill-6".into(),
                name: "SQL".into(),
                description: "Ad-hoc reporting queries.".into(),
                proficiency: 64,
                category: "Engineering".into(),
                examples: tags(&["Usage reports"]),
            },
        ];

        let activities = vec![
            Activity {
                id: "act-1".into(),
                kind: ActivityKind::Task,
                description: "Started \"Ship the weekly digest email\"".into(),
                timestamp: mins(25),
                details: serde_json::Map::new(),
            },
            Activity {
                id: "act-2".into(),
                kind: ActivityKind::Session,
                description: "Slack session ended after 42 messages".into(),
                timestamp: mins(75),
                details: serde_json::Map::new(),
            },
            Activity {
                id: "act-3".into(),
                kind: ActivityKind::Task,
                description: "Blocked \"Fix calendar sync for shared events\"".into(),
                timestamp: hours(3),
                details: serde_json::Map::new(),
            },
            Activity {
                id: "act-4".into(),
                kind: ActivityKind::Project,
                description: "Knowledge Base paused".into(),
                timestamp: hours(26),
                details: serde_json::Map::new(),
            },
            Activity {
                id: "act-5".into(),
                kind: ActivityKind::System,
                description: "Learned a new capability: Slack summaries".into(),
                timestamp: days(2),
                details: serde_json::Map::new(),
            },
            Activity {
                id: "act-6".into(),
                kind: ActivityKind::Project,
                description: "Voice Notes completed".into(),
                timestamp: days(30),
                details: serde_json::Map::new(),
            },
        ];

        // Deliberately a snapshot, not derived from the lists above.
        let stats = DashboardStats {
            total_tasks: 24,
            active_tasks: 6,
            completed_tasks: 15,
            total_projects: 4,
            active_projects: 2,
            total_sessions: 37,
            recent_sessions: 3,
            capabilities_available: 3,
        };

        Fixtures {
            tasks,
            projects,
            sessions,
            capabilities,
            skills,
            activities,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn sample_task_ids_are_unique() {
        let fixtures = Fixtures::sample(Utc::now());
        let ids: HashSet<&str> = fixtures.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), fixtures.tasks.len());
    }

    #[test]
    fn sample_projects_own_their_tasks() {
        let fixtures = Fixtures::sample(Utc::now());
        for project in &fixtures.projects {
            for task in &project.tasks {
                assert_eq!(task.project.as_deref(), Some(project.name.as_str()));
            }
        }
        let inbox = fixtures
            .projects
            .iter()
            .find(|p| p.name == "Inbox Zero")
            .unwrap();
        assert_eq!(inbox.tasks.len(), 3);
        assert_eq!(inbox.completed_tasks(), 2);
    }

    #[test]
    fn sample_timestamps_are_not_in_the_future() {
        let now = Utc::now();
        let fixtures = Fixtures::sample(now);
        assert!(fixtures.tasks.iter().all(|t| t.updated_at <= now));
        assert!(fixtures.activities.iter().all(|a| a.timestamp <= now));
        assert!(fixtures.sessions.iter().all(|s| s.start_time <= now));
    }

    #[test]
    fn json_round_trip_preserves_sample() {
        let fixtures = Fixtures::sample(Utc::now());
        let json = serde_json::to_string(&fixtures).unwrap();
        let parsed = Fixtures::from_json(&json).unwrap();
        assert_eq!(parsed, fixtures);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let fixtures = Fixtures::from_json("{}").unwrap();
        assert!(fixtures.tasks.is_empty());
        assert!(fixtures.skills.is_empty());
        assert_eq!(fixtures.stats, DashboardStats::default());
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let json = r#"{"tasks": [{
            "id": "t1", "title": "x", "status": "todo", "priority": "critical",
            "createdAt": "2026-01-01T00:00:00Z", "updatedAt": "2026-01-01T00:00:00Z"
        }]}"#;
        assert!(Fixtures::from_json(json).is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"skills": [{{"id": "s1", "name": "Go", "proficiency": 40, "category": "Eng"}}]}}"#
        )
        .unwrap();

        let fixtures = Fixtures::load(file.path()).unwrap();
        assert_eq!(fixtures.skills.len(), 1);
        assert!(fixtures.skills[0].examples.is_empty());
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = Fixtures::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
