mod fixtures;
mod models;

pub use fixtures::*;
pub use models::*;

use chrono::{DateTime, Utc};

/// Owner of the canonical task list.
///
/// Views only ever see `&[Task]`; every change goes through [`TaskStore::update_task`].
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replace the task whose id matches `updated.id`, keeping its position.
    ///
    /// Returns `false` (and changes nothing) when no task has that id.
    pub fn update_task(&mut self, updated: Task) -> bool {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            tracing::info!(
                "task {} -> {} ({})",
                updated.id,
                updated.status.as_str(),
                updated.title
            );
            *slot = updated;
            true
        } else {
            tracing::debug!("ignoring update for unknown task {}", updated.id);
            false
        }
    }

    /// Move the task `id` to `status`, refreshing its `updated_at`.
    pub fn set_status(&mut self, id: &str, status: TaskStatus, now: DateTime<Utc>) -> bool {
        match self.get(id) {
            Some(task) => {
                let updated = task.with_status(status, now);
                self.update_task(updated)
            }
            None => {
                tracing::debug!("ignoring status change for unknown task {id}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(id: &str, status: TaskStatus, at: DateTime<Utc>) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            description: String::new(),
            status,
            priority: Priority::Medium,
            project: None,
            assigned_to: None,
            created_at: at,
            updated_at: at,
            due_date: None,
            tags: vec![],
        }
    }

    fn ids(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn update_replaces_in_place() {
        let t0 = Utc::now() - Duration::hours(1);
        let mut store = TaskStore::new(vec![
            task("a", TaskStatus::Todo, t0),
            task("b", TaskStatus::Todo, t0),
            task("c", TaskStatus::Todo, t0),
        ]);

        let mut updated = store.get("b").unwrap().clone();
        updated.status = TaskStatus::Blocked;
        assert!(store.update_task(updated));

        assert_eq!(ids(&store), ["a", "b", "c"]);
        assert_eq!(store.get("b").unwrap().status, TaskStatus::Blocked);
        assert_eq!(store.get("a").unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let t0 = Utc::now();
        let mut store = TaskStore::new(vec![task("a", TaskStatus::Todo, t0)]);
        let before = store.tasks().to_vec();

        assert!(!store.update_task(task("zzz", TaskStatus::Completed, t0)));
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn set_status_refreshes_updated_at() {
        let t0 = Utc::now() - Duration::days(2);
        let now = Utc::now();
        let mut store = TaskStore::new(vec![task("a", TaskStatus::Todo, t0)]);

        assert!(store.set_status("a", TaskStatus::InProgress, now));
        let a = store.get("a").unwrap();
        assert_eq!(a.status, TaskStatus::InProgress);
        assert_eq!(a.updated_at, now);
        assert_eq!(a.created_at, t0);
    }

    #[test]
    fn same_status_update_still_touches_timestamp() {
        let t0 = Utc::now() - Duration::days(2);
        let now = Utc::now();
        let mut store = TaskStore::new(vec![
            task("a", TaskStatus::Todo, t0),
            task("b", TaskStatus::Blocked, t0),
        ]);
        let untouched = store.get("b").unwrap().clone();

        assert!(store.set_status("a", TaskStatus::Todo, now));
        assert_eq!(store.get("a").unwrap().status, TaskStatus::Todo);
        assert_eq!(store.get("a").unwrap().updated_at, now);
        assert_eq!(store.get("b").unwrap(), &untouched);
    }

    #[test]
    fn updates_preserve_length_and_ids() {
        let t0 = Utc::now();
        let mut store = TaskStore::new(
            ["1", "2", "3", "4"]
                .iter()
                .map(|id| task(id, TaskStatus::Todo, t0))
                .collect(),
        );
        let before: Vec<String> = ids(&store).into_iter().map(String::from).collect();

        for (id, status) in [
            ("3", TaskStatus::Completed),
            ("1", TaskStatus::Blocked),
            ("9", TaskStatus::InProgress),
        ] {
            store.set_status(id, status, Utc::now());
        }

        assert_eq!(ids(&store), before);
    }

    #[test]
    fn set_status_unknown_id_returns_false() {
        let mut store = TaskStore::default();
        assert!(!store.set_status("missing", TaskStatus::Todo, Utc::now()));
        assert!(store.tasks().is_empty());
    }
}
