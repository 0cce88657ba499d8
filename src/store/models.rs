use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "☐",
            TaskStatus::InProgress => "●",
            TaskStatus::Completed => "✓",
            TaskStatus::Blocked => "✗",
        }
    }

    /// The status that follows this one when cycling with a single key.
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Blocked,
            TaskStatus::Blocked => TaskStatus::Todo,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            other => Err(format!(
                "unknown task status '{other}' (expected todo, in-progress, completed or blocked)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Sort rank on the task board: urgent first, low last.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// A copy of this task moved to `status`, stamped as updated at `now`.
    ///
    /// `updated_at` is refreshed even when the status does not change.
    pub fn with_status(&self, status: TaskStatus, now: DateTime<Utc>) -> Task {
        Task {
            status,
            updated_at: now,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Paused,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "●",
            ProjectStatus::Paused => "‖",
            ProjectStatus::Completed => "✓",
            ProjectStatus::Archived => "▪",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    /// Percentage in 0..=100; larger values render as 100.
    pub progress: u8,
    /// Owned copies, not references into the task store.
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Project {
    pub fn completed_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<u64>,
    pub channel: String,
    pub messages: u32,
    pub tasks_created: u32,
    pub tasks_completed: u32,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityStatus {
    Available,
    Learning,
    Deprecated,
}

impl CapabilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CapabilityStatus::Available => "Available",
            CapabilityStatus::Learning => "Learning",
            CapabilityStatus::Deprecated => "Deprecated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub status: CapabilityStatus,
    pub usage_count: u32,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Percentage in 0..=100.
    pub proficiency: u8,
    pub category: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    Task,
    Project,
    Session,
    System,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Task => "task",
            ActivityKind::Project => "project",
            ActivityKind::Session => "session",
            ActivityKind::System => "system",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ActivityKind::Task => "☐",
            ActivityKind::Project => "▲",
            ActivityKind::Session => "◆",
            ActivityKind::System => "⚙",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Aggregate counts shown in the stats grid.
///
/// Supplied alongside the entity lists rather than computed from them, so the
/// two can disagree. [`DashboardStats::derive`] computes the live equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tasks: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    pub total_projects: usize,
    pub active_projects: usize,
    pub total_sessions: usize,
    pub recent_sessions: usize,
    pub capabilities_available: usize,
}

impl DashboardStats {
    /// Counts derived from the current lists.
    ///
    /// "Active" tasks are those in progress; "recent" sessions started within
    /// the last seven days of `now`.
    pub fn derive(
        tasks: &[Task],
        projects: &[Project],
        sessions: &[Session],
        capabilities: &[Capability],
        now: DateTime<Utc>,
    ) -> Self {
        let week_ago = now - chrono::Duration::days(7);
        DashboardStats {
            total_tasks: tasks.len(),
            active_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count(),
            completed_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            total_projects: projects.len(),
            active_projects: projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
                .count(),
            total_sessions: sessions.len(),
            recent_sessions: sessions
                .iter()
                .filter(|s| s.start_time >= week_ago)
                .count(),
            capabilities_available: capabilities
                .iter()
                .filter(|c| c.status == CapabilityStatus::Available)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
    }

    #[test]
    fn task_status_rejects_unknown() {
        assert!("done".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn task_status_cycle_visits_every_status() {
        let mut status = TaskStatus::Todo;
        let mut seen = vec![status];
        for _ in 0..3 {
            status = status.next();
            seen.push(status);
        }
        assert_eq!(seen, TaskStatus::ALL.to_vec());
        assert_eq!(status.next(), TaskStatus::Todo);
    }

    #[test]
    fn priority_rank_orders_urgent_first() {
        assert!(Priority::Urgent.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn task_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": "t1",
            "title": "Write docs",
            "status": "in-progress",
            "priority": "high",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-02T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert!(task.tags.is_empty());
        assert!(task.project.is_none());
        assert!(task.description.is_empty());
    }

    #[test]
    fn task_rejects_unknown_status() {
        let json = r#"{
            "id": "t1",
            "title": "x",
            "status": "done",
            "priority": "high",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-02T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn activity_type_field_maps_to_kind() {
        let json = r#"{
            "id": "a1",
            "type": "system",
            "description": "Restarted",
            "timestamp": "2026-01-01T00:00:00Z"
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.kind, ActivityKind::System);
        assert!(activity.details.is_empty());
    }

    #[test]
    fn derive_stats_counts_lists() {
        let now = Utc::now();
        let task = |id: &str, status| Task {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            status,
            priority: Priority::Low,
            project: None,
            assigned_to: None,
            created_at: now,
            updated_at: now,
            due_date: None,
            tags: vec![],
        };
        let tasks = vec![
            task("1", TaskStatus::InProgress),
            task("2", TaskStatus::Completed),
            task("3", TaskStatus::Todo),
        ];
        let session = |id: &str, days_ago| Session {
            id: id.into(),
            start_time: now - chrono::Duration::days(days_ago),
            end_time: None,
            duration: None,
            channel: "cli".into(),
            messages: 0,
            tasks_created: 0,
            tasks_completed: 0,
            summary: None,
            tags: vec![],
        };
        let sessions = vec![session("s1", 1), session("s2", 30)];

        let stats = DashboardStats::derive(&tasks, &[], &sessions, &[], now);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.active_tasks, 1);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.recent_sessions, 1);
        assert_eq!(stats.total_projects, 0);
    }
}
