use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::board::{StatusFilter, TaskBoard};
use crate::config::{Config, DashboardConfig, StatsSource};
use crate::store::{
    Activity, Capability, DashboardStats, Fixtures, Project, Session, Skill, TaskStatus, TaskStore,
};

use super::event::{self, AppEvent};
use super::keymap::{Action, KeyMap};
use super::theme::Theme;
use super::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Tasks,
    Projects,
    Sessions,
    Capabilities,
    Skills,
}

impl View {
    /// Navigation order, also the order of the header tabs.
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Tasks,
        View::Projects,
        View::Sessions,
        View::Capabilities,
        View::Skills,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Tasks => "Tasks",
            View::Projects => "Projects",
            View::Sessions => "Sessions",
            View::Capabilities => "Capabilities",
            View::Skills => "Skills",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Views that show the interactive task board.
    pub fn has_board(self) -> bool {
        matches!(self, View::Dashboard | View::Tasks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    CommandPalette,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub style: ToastStyle,
    /// `None` when the configured lifetime does not fit in an `Instant`;
    /// such a toast stays until the next one replaces it.
    pub expires_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct PaletteItem {
    pub label: String,
    pub action: PaletteAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    GoTo(View),
    Filter(StatusFilter),
    ToggleHelp,
    Quit,
}

pub struct App {
    pub store: TaskStore,
    pub should_quit: bool,
    pub view: View,
    pub input_mode: InputMode,

    // Read-only data
    pub projects: Vec<Project>,
    pub sessions: Vec<Session>,
    pub capabilities: Vec<Capability>,
    pub skills: Vec<Skill>,
    pub activities: Vec<Activity>,
    snapshot_stats: DashboardStats,

    pub config: DashboardConfig,
    pub theme: Theme,
    pub keymap: KeyMap,

    /// Rebuilt on every view change, which resets its filter.
    pub board: TaskBoard,
    /// First visible item in the full list views.
    pub scroll: usize,

    // Command palette state
    pub input_buffer: String,
    pub palette_items: Vec<PaletteItem>,
    pub palette_filtered: Vec<usize>,
    pub palette_index: usize,

    pub toast: Option<Toast>,
}

impl App {
    pub fn new(fixtures: Fixtures, config: &Config) -> Self {
        let mut palette_items: Vec<PaletteItem> = View::ALL
            .iter()
            .map(|v| PaletteItem {
                label: format!("Go to {}", v.label()),
                action: PaletteAction::GoTo(*v),
            })
            .collect();
        palette_items.extend(StatusFilter::ALL.iter().map(|f| PaletteItem {
            label: format!("Filter tasks: {}", f.label()),
            action: PaletteAction::Filter(*f),
        }));
        palette_items.push(PaletteItem {
            label: "Keyboard shortcuts".into(),
            action: PaletteAction::ToggleHelp,
        });
        palette_items.push(PaletteItem {
            label: "Quit".into(),
            action: PaletteAction::Quit,
        });
        let palette_filtered: Vec<usize> = (0..palette_items.len()).collect();

        let dashboard = config.dashboard.clone();
        let board = board_for(View::Dashboard, &dashboard);

        App {
            store: TaskStore::new(fixtures.tasks),
            should_quit: false,
            view: View::Dashboard,
            input_mode: InputMode::Normal,
            projects: fixtures.projects,
            sessions: fixtures.sessions,
            capabilities: fixtures.capabilities,
            skills: fixtures.skills,
            activities: fixtures.activities,
            snapshot_stats: fixtures.stats,
            config: dashboard,
            theme: config.theme.build(),
            keymap: KeyMap::default_keymap(),
            board,
            scroll: 0,
            input_buffer: String::new(),
            palette_items,
            palette_filtered,
            palette_index: 0,
            toast: None,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.tick_rate_ms);

        loop {
            let now = Utc::now();
            terminal.draw(|frame| ui::draw(frame, self, now))?;

            match event::poll(tick_rate)? {
                AppEvent::Key(key) => self.handle_key(key.code, key.modifiers),
                AppEvent::Resize => {}
                AppEvent::Tick => self.expire_toast(Instant::now()),
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Counts for the stats grid, from the shipped snapshot or the lists.
    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        match self.config.stats_source {
            StatsSource::Snapshot => self.snapshot_stats.clone(),
            StatsSource::Live => DashboardStats::derive(
                self.store.tasks(),
                &self.projects,
                &self.sessions,
                &self.capabilities,
                now,
            ),
        }
    }

    /// Switch the main view. Never touches data.
    pub fn set_view(&mut self, view: View) {
        tracing::debug!(from = self.view.label(), to = view.label(), "view change");
        self.view = view;
        self.scroll = 0;
        self.board = board_for(view, &self.config);
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match self.input_mode {
            InputMode::Normal => {
                if let Some(action) = self.keymap.lookup_normal(code, modifiers) {
                    self.execute(action);
                }
            }
            InputMode::CommandPalette => self.handle_palette_key(code),
            InputMode::Help => {
                if matches!(code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                    self.input_mode = InputMode::Normal;
                }
            }
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::OpenCommandPalette => {
                self.input_mode = InputMode::CommandPalette;
                self.input_buffer.clear();
                self.palette_index = 0;
                self.filter_palette();
            }
            Action::NextView => self.set_view(self.view.next()),
            Action::PrevView => self.set_view(self.view.prev()),
            Action::GoTo(view) => {
                if view != self.view {
                    self.set_view(view);
                }
            }
            Action::ShowHelp => self.input_mode = InputMode::Help,
            Action::MoveDown => self.move_down(),
            Action::MoveUp => self.move_up(),
            Action::NextFilter if self.view.has_board() => self.board.next_filter(),
            Action::PrevFilter if self.view.has_board() => self.board.prev_filter(),
            Action::SetStatus(status) if self.view.has_board() => {
                self.change_selected_status(|_| status);
            }
            Action::CycleStatus if self.view.has_board() => {
                self.change_selected_status(TaskStatus::next);
            }
            Action::ViewAll if self.board.show_all_link && self.view.has_board() => {
                self.set_view(View::Tasks);
            }
            Action::NextFilter
            | Action::PrevFilter
            | Action::SetStatus(_)
            | Action::CycleStatus
            | Action::ViewAll => {}
        }
    }

    /// Apply a status change to the selected board row and tell the store.
    fn change_selected_status(&mut self, new_status: impl FnOnce(TaskStatus) -> TaskStatus) {
        let Some(task) = self.board.selected_task(self.store.tasks()) else {
            self.show_toast("No task selected", ToastStyle::Error);
            return;
        };
        let id = task.id.clone();
        let status = new_status(task.status);

        if let Some(updated) = self
            .board
            .change_status(self.store.tasks(), &id, status, Utc::now())
        {
            let message = format!("{} \u{2192} {}", updated.title, status.label());
            if self.store.update_task(updated) {
                self.show_toast(message, ToastStyle::Success);
            }
        }
        self.board.clamp_selection(self.store.tasks());
    }

    fn move_down(&mut self) {
        if self.view.has_board() {
            self.board.select_next(self.store.tasks());
        } else {
            let len = self.list_len();
            if len > 0 {
                self.scroll = (self.scroll + 1).min(len - 1);
            }
        }
    }

    fn move_up(&mut self) {
        if self.view.has_board() {
            self.board.select_prev(self.store.tasks());
        } else {
            self.scroll = self.scroll.saturating_sub(1);
        }
    }

    /// Number of scrollable items in the current full list view.
    fn list_len(&self) -> usize {
        match self.view {
            View::Dashboard | View::Tasks => 0,
            View::Projects => self.projects.len(),
            View::Sessions => self.sessions.len(),
            View::Capabilities => self.capabilities.len(),
            View::Skills => self.skills.len(),
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>, style: ToastStyle) {
        self.toast = Some(Toast {
            message: message.into(),
            style,
            expires_at: Instant::now().checked_add(Duration::from_secs(self.config.toast_secs)),
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if let Some(toast) = &self.toast
            && toast.expires_at.is_some_and(|at| at <= now)
        {
            self.toast = None;
        }
    }

    fn handle_palette_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if let Some(&idx) = self.palette_filtered.get(self.palette_index) {
                    let action = self.palette_items[idx].action;
                    self.input_buffer.clear();
                    self.input_mode = InputMode::Normal;
                    self.execute_palette_action(action);
                }
            }
            KeyCode::Up => {
                self.palette_index = self.palette_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if !self.palette_filtered.is_empty() {
                    self.palette_index =
                        (self.palette_index + 1).min(self.palette_filtered.len() - 1);
                }
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.filter_palette();
                self.palette_index = 0;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.filter_palette();
                self.palette_index = 0;
            }
            _ => {}
        }
    }

    fn filter_palette(&mut self) {
        let query = self.input_buffer.to_lowercase();
        if query.is_empty() {
            self.palette_filtered = (0..self.palette_items.len()).collect();
        } else {
            self.palette_filtered = self
                .palette_items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.label.to_lowercase().contains(&query))
                .map(|(i, _)| i)
                .collect();
        }
    }

    fn execute_palette_action(&mut self, action: PaletteAction) {
        match action {
            PaletteAction::GoTo(view) => self.execute(Action::GoTo(view)),
            PaletteAction::Filter(filter) => {
                if !self.view.has_board() {
                    self.set_view(View::Tasks);
                }
                self.board.set_filter(filter);
            }
            PaletteAction::ToggleHelp => self.input_mode = InputMode::Help,
            PaletteAction::Quit => self.should_quit = true,
        }
    }
}

fn board_for(view: View, config: &DashboardConfig) -> TaskBoard {
    match view {
        View::Dashboard => TaskBoard::new("Active Tasks", Some(config.task_limit), true),
        _ => TaskBoard::new("All Tasks", None, false),
    }
}
