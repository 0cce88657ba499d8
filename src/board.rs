//! Task board: status filter, priority ordering and status changes.
//!
//! The board never mutates the task list it is given. A status change
//! produces a new [`Task`] that the owner applies to its [`TaskStore`].
//!
//! [`TaskStore`]: crate::store::TaskStore

use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::store::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Completed,
    Blocked,
}

impl StatusFilter {
    /// Display order of the filter tabs.
    pub const ALL: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Todo,
        StatusFilter::InProgress,
        StatusFilter::Completed,
        StatusFilter::Blocked,
    ];

    pub fn status(self) -> Option<TaskStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Todo => Some(TaskStatus::Todo),
            StatusFilter::InProgress => Some(TaskStatus::InProgress),
            StatusFilter::Completed => Some(TaskStatus::Completed),
            StatusFilter::Blocked => Some(TaskStatus::Blocked),
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        self.status().is_none_or(|s| task.status == s)
    }

    pub fn label(self) -> &'static str {
        self.status().map_or("All", |s| s.label())
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => StatusFilter::Todo,
            TaskStatus::InProgress => StatusFilter::InProgress,
            TaskStatus::Completed => StatusFilter::Completed,
            TaskStatus::Blocked => StatusFilter::Blocked,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse::<TaskStatus>().map(StatusFilter::from)
        }
    }
}

/// Filter by status, order by priority rank (ties: most recently updated
/// first), then keep at most `limit` tasks.
///
/// `limit: None` keeps everything; `Some(0)` keeps nothing.
pub fn display_tasks(tasks: &[Task], filter: StatusFilter, limit: Option<usize>) -> Vec<&Task> {
    let mut shown: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();
    shown.sort_by_key(|t| (t.priority.rank(), Reverse(t.updated_at)));
    if let Some(limit) = limit {
        shown.truncate(limit);
    }
    shown
}

/// Interactive state of one task board.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    pub title: String,
    pub limit: Option<usize>,
    pub show_all_link: bool,
    filter: StatusFilter,
    selected: usize,
}

impl TaskBoard {
    pub fn new(title: impl Into<String>, limit: Option<usize>, show_all_link: bool) -> Self {
        TaskBoard {
            title: title.into(),
            limit,
            show_all_link,
            filter: StatusFilter::All,
            selected: 0,
        }
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.selected = 0;
    }

    pub fn next_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn prev_filter(&mut self) {
        self.set_filter(self.filter.prev());
    }

    pub fn displayed<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        display_tasks(tasks, self.filter, self.limit)
    }

    /// Selected row index, clamped to the current display.
    pub fn selected_index(&self, tasks: &[Task]) -> usize {
        let len = self.displayed(tasks).len();
        self.selected.min(len.saturating_sub(1))
    }

    pub fn selected_task<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        let shown = self.displayed(tasks);
        let idx = self.selected.min(shown.len().saturating_sub(1));
        shown.get(idx).copied()
    }

    pub fn select_next(&mut self, tasks: &[Task]) {
        let len = self.displayed(tasks).len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self, tasks: &[Task]) {
        self.selected = self.selected_index(tasks).saturating_sub(1);
    }

    /// Keep the selection inside the display after the task list changed.
    pub fn clamp_selection(&mut self, tasks: &[Task]) {
        self.selected = self.selected_index(tasks);
    }

    /// The updated task for a status change on `task_id`, or `None` when no
    /// task in `tasks` has that id.
    pub fn change_status(
        &self,
        tasks: &[Task],
        task_id: &str,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Option<Task> {
        tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.with_status(status, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Priority, TaskStore};
    use chrono::Duration;

    fn task(id: &str, status: TaskStatus, priority: Priority, updated: DateTime<Utc>) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            status,
            priority,
            project: None,
            assigned_to: None,
            created_at: updated,
            updated_at: updated,
            due_date: None,
            tags: vec![],
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    fn mixed() -> Vec<Task> {
        let t0 = Utc::now() - Duration::days(1);
        vec![
            task("a", TaskStatus::Todo, Priority::Low, t0),
            task("b", TaskStatus::Completed, Priority::Urgent, t0),
            task("c", TaskStatus::Todo, Priority::High, t0 + Duration::hours(1)),
            task("d", TaskStatus::Blocked, Priority::High, t0 + Duration::hours(2)),
            task("e", TaskStatus::InProgress, Priority::Medium, t0),
            task("f", TaskStatus::Todo, Priority::High, t0 + Duration::hours(3)),
        ]
    }

    #[test]
    fn filter_keeps_exact_status_subset() {
        let tasks = mixed();
        for filter in StatusFilter::ALL {
            let shown = display_tasks(&tasks, filter, None);
            let expected = tasks
                .iter()
                .filter(|t| filter.status().is_none_or(|s| t.status == s))
                .count();
            assert_eq!(shown.len(), expected, "filter {filter:?}");
            assert!(shown.iter().all(|t| filter.matches(t)));
        }
        assert_eq!(display_tasks(&tasks, StatusFilter::All, None).len(), tasks.len());
    }

    #[test]
    fn ordering_is_priority_then_recency() {
        let tasks = mixed();
        let shown = display_tasks(&tasks, StatusFilter::All, None);
        assert_eq!(ids(&shown), ["b", "f", "d", "c", "e", "a"]);

        for pair in shown.windows(2) {
            let (x, y) = (pair[0], pair[1]);
            assert!(x.priority.rank() <= y.priority.rank());
            if x.priority == y.priority {
                assert!(x.updated_at >= y.updated_at);
            }
        }
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let t0 = Utc::now();
        let tasks = vec![
            task("x", TaskStatus::Todo, Priority::Medium, t0),
            task("y", TaskStatus::Todo, Priority::Medium, t0),
        ];
        assert_eq!(ids(&display_tasks(&tasks, StatusFilter::All, None)), ["x", "y"]);
    }

    #[test]
    fn limit_truncates() {
        let tasks = mixed();
        assert_eq!(display_tasks(&tasks, StatusFilter::All, Some(2)).len(), 2);
        assert_eq!(display_tasks(&tasks, StatusFilter::Todo, Some(10)).len(), 3);
        assert_eq!(display_tasks(&tasks, StatusFilter::All, None).len(), 6);
    }

    #[test]
    fn zero_limit_is_empty_not_unlimited() {
        let tasks = mixed();
        assert!(display_tasks(&tasks, StatusFilter::All, Some(0)).is_empty());
    }

    #[test]
    fn example_scenario_urgent_before_low() {
        let t0 = Utc::now() - Duration::hours(2);
        let mut store = TaskStore::new(vec![
            task("1", TaskStatus::Todo, Priority::Low, t0),
            task("2", TaskStatus::Todo, Priority::Urgent, t0),
        ]);
        let mut board = TaskBoard::new("Tasks", None, false);
        board.set_filter(StatusFilter::Todo);
        assert_eq!(ids(&board.displayed(store.tasks())), ["2", "1"]);

        let updated = board
            .change_status(store.tasks(), "1", TaskStatus::Completed, Utc::now())
            .unwrap();
        assert!(store.update_task(updated));
        assert_eq!(ids(&board.displayed(store.tasks())), ["2"]);
    }

    #[test]
    fn change_status_does_not_touch_input() {
        let tasks = mixed();
        let before = tasks.clone();
        let board = TaskBoard::new("Tasks", None, false);
        let now = Utc::now();

        let updated = board
            .change_status(&tasks, "a", TaskStatus::Blocked, now)
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Blocked);
        assert_eq!(updated.updated_at, now);
        assert_eq!(updated.title, "a");
        assert_eq!(tasks, before);
    }

    #[test]
    fn change_status_unknown_id_is_none() {
        let board = TaskBoard::new("Tasks", None, false);
        assert!(
            board
                .change_status(&mixed(), "nope", TaskStatus::Todo, Utc::now())
                .is_none()
        );
    }

    #[test]
    fn filter_cycles_both_ways() {
        let mut board = TaskBoard::new("Tasks", None, false);
        assert_eq!(board.filter(), StatusFilter::All);
        board.next_filter();
        assert_eq!(board.filter(), StatusFilter::Todo);
        board.prev_filter();
        board.prev_filter();
        assert_eq!(board.filter(), StatusFilter::Blocked);
    }

    #[test]
    fn selection_clamps_when_display_shrinks() {
        let tasks = mixed();
        let mut board = TaskBoard::new("Tasks", None, false);
        for _ in 0..10 {
            board.select_next(&tasks);
        }
        assert_eq!(board.selected_index(&tasks), 5);

        board.set_filter(StatusFilter::Blocked);
        assert_eq!(board.selected_index(&tasks), 0);
        assert_eq!(board.selected_task(&tasks).unwrap().id, "d");

        board.set_filter(StatusFilter::Todo);
        board.select_next(&tasks);
        board.select_next(&tasks);
        board.clamp_selection(&tasks[..1]);
        assert_eq!(board.selected_index(&tasks[..1]), 0);
    }

    #[test]
    fn selected_task_on_empty_board() {
        let board = TaskBoard::new("Tasks", Some(0), false);
        assert!(board.selected_task(&mixed()).is_none());
    }

    #[test]
    fn filter_parses_from_cli_names() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "in-progress".parse::<StatusFilter>(),
            Ok(StatusFilter::InProgress)
        );
        assert!("done".parse::<StatusFilter>().is_err());
    }
}
