use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::store::{ActivityKind, CapabilityStatus, Priority, ProjectStatus, TaskStatus};
use crate::views::ProficiencyBand;

use super::app::ToastStyle;

/// Semantic colour theme for the entire TUI.
///
/// Every colour used by the renderer is stored here so the user can
/// override any of them via `[theme]` in `config.toml`.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Borders ───────────────────────────────────────────────
    pub border_focused: Color,
    pub border_unfocused: Color,

    // ── Text ──────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_accent: Color,

    // ── Task status ───────────────────────────────────────────
    pub status_todo: Color,
    pub status_in_progress: Color,
    pub status_completed: Color,
    pub status_blocked: Color,

    // ── Task priority ─────────────────────────────────────────
    pub priority_low: Color,
    pub priority_medium: Color,
    pub priority_high: Color,
    pub priority_urgent: Color,

    // ── Project status ────────────────────────────────────────
    pub project_active: Color,
    pub project_paused: Color,
    pub project_completed: Color,
    pub project_archived: Color,

    // ── Capability status ─────────────────────────────────────
    pub capability_available: Color,
    pub capability_learning: Color,
    pub capability_deprecated: Color,

    // ── Activity kinds ────────────────────────────────────────
    pub activity_task: Color,
    pub activity_project: Color,
    pub activity_session: Color,
    pub activity_system: Color,

    // ── Skill proficiency bands ───────────────────────────────
    pub proficiency_expert: Color,
    pub proficiency_strong: Color,
    pub proficiency_fair: Color,
    pub proficiency_weak: Color,

    // ── Toast ─────────────────────────────────────────────────
    pub toast_info: Color,
    pub toast_success: Color,
    pub toast_error: Color,

    // ── Tabs ──────────────────────────────────────────────────
    pub tab_active: Color,
    pub tab_inactive: Color,

    // ── Misc ──────────────────────────────────────────────────
    pub selection_indicator: Color,
    pub progress_filled: Color,
    pub progress_empty: Color,
    pub online: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,

            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            text_accent: Color::Cyan,

            status_todo: Color::Gray,
            status_in_progress: Color::Blue,
            status_completed: Color::Green,
            status_blocked: Color::Red,

            priority_low: Color::Gray,
            priority_medium: Color::Yellow,
            priority_high: Color::Rgb(255, 165, 0),
            priority_urgent: Color::Red,

            project_active: Color::Green,
            project_paused: Color::Yellow,
            project_completed: Color::Blue,
            project_archived: Color::DarkGray,

            capability_available: Color::Green,
            capability_learning: Color::Yellow,
            capability_deprecated: Color::Red,

            activity_task: Color::Blue,
            activity_project: Color::Magenta,
            activity_session: Color::Green,
            activity_system: Color::Gray,

            proficiency_expert: Color::Green,
            proficiency_strong: Color::Cyan,
            proficiency_fair: Color::Yellow,
            proficiency_weak: Color::Red,

            toast_info: Color::Cyan,
            toast_success: Color::Green,
            toast_error: Color::Red,

            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,

            selection_indicator: Color::Cyan,
            progress_filled: Color::Cyan,
            progress_empty: Color::DarkGray,
            online: Color::Green,
        }
    }
}

impl Theme {
    /// Style for a focused panel border.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Style for an unfocused panel border.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.border_unfocused)
    }

    pub fn primary(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.text_accent)
    }

    /// Map a `TaskStatus` to its display style (foreground colour).
    pub fn task_status_style(&self, status: TaskStatus) -> Style {
        let color = match status {
            TaskStatus::Todo => self.status_todo,
            TaskStatus::InProgress => self.status_in_progress,
            TaskStatus::Completed => self.status_completed,
            TaskStatus::Blocked => self.status_blocked,
        };
        Style::default().fg(color)
    }

    /// Priorities render bold so they stand out on a task card.
    pub fn priority_style(&self, priority: Priority) -> Style {
        let color = match priority {
            Priority::Low => self.priority_low,
            Priority::Medium => self.priority_medium,
            Priority::High => self.priority_high,
            Priority::Urgent => self.priority_urgent,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn project_status_style(&self, status: ProjectStatus) -> Style {
        let color = match status {
            ProjectStatus::Active => self.project_active,
            ProjectStatus::Paused => self.project_paused,
            ProjectStatus::Completed => self.project_completed,
            ProjectStatus::Archived => self.project_archived,
        };
        Style::default().fg(color)
    }

    pub fn capability_status_style(&self, status: CapabilityStatus) -> Style {
        let color = match status {
            CapabilityStatus::Available => self.capability_available,
            CapabilityStatus::Learning => self.capability_learning,
            CapabilityStatus::Deprecated => self.capability_deprecated,
        };
        Style::default().fg(color)
    }

    pub fn activity_style(&self, kind: ActivityKind) -> Style {
        let color = match kind {
            ActivityKind::Task => self.activity_task,
            ActivityKind::Project => self.activity_project,
            ActivityKind::Session => self.activity_session,
            ActivityKind::System => self.activity_system,
        };
        Style::default().fg(color)
    }

    /// Colour for a skill's proficiency bar.
    pub fn proficiency_color(&self, proficiency: u8) -> Color {
        match ProficiencyBand::of(proficiency) {
            ProficiencyBand::Expert => self.proficiency_expert,
            ProficiencyBand::Strong => self.proficiency_strong,
            ProficiencyBand::Fair => self.proficiency_fair,
            ProficiencyBand::Weak => self.proficiency_weak,
        }
    }

    /// Style for the active tab label.
    pub fn tab_active_style(&self) -> Style {
        Style::default()
            .fg(self.tab_active)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Style for an inactive tab label.
    pub fn tab_inactive_style(&self) -> Style {
        Style::default().fg(self.tab_inactive)
    }

    /// Style for a toast notification.
    pub fn toast_style(&self, style: ToastStyle) -> Style {
        let color = match style {
            ToastStyle::Info => self.toast_info,
            ToastStyle::Success => self.toast_success,
            ToastStyle::Error => self.toast_error,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

// ── Config deserialization ────────────────────────────────────────────

/// All-optional mirror of [`Theme`] for `config.toml` `[theme]` section.
///
/// Only `Some` fields override the default; everything else keeps its default.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ThemeConfig {
    pub border_focused: Option<String>,
    pub border_unfocused: Option<String>,

    pub text_primary: Option<String>,
    pub text_secondary: Option<String>,
    pub text_accent: Option<String>,

    pub status_todo: Option<String>,
    pub status_in_progress: Option<String>,
    pub status_completed: Option<String>,
    pub status_blocked: Option<String>,

    pub priority_low: Option<String>,
    pub priority_medium: Option<String>,
    pub priority_high: Option<String>,
    pub priority_urgent: Option<String>,

    pub project_active: Option<String>,
    pub project_paused: Option<String>,
    pub project_completed: Option<String>,
    pub project_archived: Option<String>,

    pub capability_available: Option<String>,
    pub capability_learning: Option<String>,
    pub capability_deprecated: Option<String>,

    pub activity_task: Option<String>,
    pub activity_project: Option<String>,
    pub activity_session: Option<String>,
    pub activity_system: Option<String>,

    pub proficiency_expert: Option<String>,
    pub proficiency_strong: Option<String>,
    pub proficiency_fair: Option<String>,
    pub proficiency_weak: Option<String>,

    pub toast_info: Option<String>,
    pub toast_success: Option<String>,
    pub toast_error: Option<String>,

    pub tab_active: Option<String>,
    pub tab_inactive: Option<String>,

    pub selection_indicator: Option<String>,
    pub progress_filled: Option<String>,
    pub progress_empty: Option<String>,
    pub online: Option<String>,
}

/// Parse a colour string into a ratatui `Color`.
///
/// Supports named colours (`"cyan"`, `"red"`, `"dark_gray"`, etc.) and
/// `"rgb(R,G,B)"` syntax.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
        let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        return Some(Color::Rgb(r, g, b));
    }

    // Named colours (case-insensitive, with underscore tolerance)
    let lower = s.to_lowercase().replace('-', "_");
    match lower.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "light_red" | "lightred" => Some(Color::LightRed),
        "light_green" | "lightgreen" => Some(Color::LightGreen),
        "light_yellow" | "lightyellow" => Some(Color::LightYellow),
        "light_blue" | "lightblue" => Some(Color::LightBlue),
        "light_magenta" | "lightmagenta" => Some(Color::LightMagenta),
        "light_cyan" | "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Overwrite `target` when `source` holds a parseable colour; anything else
/// is logged and ignored.
fn apply(target: &mut Color, field: &str, source: Option<&str>) {
    let Some(s) = source else {
        return;
    };
    match parse_color(s) {
        Some(color) => *target = color,
        None => tracing::warn!("ignoring theme.{field}: unrecognized colour '{s}'"),
    }
}

impl ThemeConfig {
    /// Build a `Theme` starting from defaults, overriding any fields that were
    /// set in the config file.
    pub fn build(&self) -> Theme {
        let mut t = Theme::default();

        apply(&mut t.border_focused, "border_focused", self.border_focused.as_deref());
        apply(&mut t.border_unfocused, "border_unfocused", self.border_unfocused.as_deref());
        apply(&mut t.text_primary, "text_primary", self.text_primary.as_deref());
        apply(&mut t.text_secondary, "text_secondary", self.text_secondary.as_deref());
        apply(&mut t.text_accent, "text_accent", self.text_accent.as_deref());
        apply(&mut t.status_todo, "status_todo", self.status_todo.as_deref());
        apply(
            &mut t.status_in_progress,
            "status_in_progress",
            self.status_in_progress.as_deref(),
        );
        apply(&mut t.status_completed, "status_completed", self.status_completed.as_deref());
        apply(&mut t.status_blocked, "status_blocked", self.status_blocked.as_deref());
        apply(&mut t.priority_low, "priority_low", self.priority_low.as_deref());
        apply(&mut t.priority_medium, "priority_medium", self.priority_medium.as_deref());
        apply(&mut t.priority_high, "priority_high", self.priority_high.as_deref());
        apply(&mut t.priority_urgent, "priority_urgent", self.priority_urgent.as_deref());
        apply(&mut t.project_active, "project_active", self.project_active.as_deref());
        apply(&mut t.project_paused, "project_paused", self.project_paused.as_deref());
        apply(
            &mut t.project_completed,
            "project_completed",
            self.project_completed.as_deref(),
        );
        apply(&mut t.project_archived, "project_archived", self.project_archived.as_deref());
        apply(
            &mut t.capability_available,
            "capability_available",
            self.capability_available.as_deref(),
        );
        apply(
            &mut t.capability_learning,
            "capability_learning",
            self.capability_learning.as_deref(),
        );
        apply(
            &mut t.capability_deprecated,
            "capability_deprecated",
            self.capability_deprecated.as_deref(),
        );
        apply(&mut t.activity_task, "activity_task", self.activity_task.as_deref());
        apply(&mut t.activity_project, "activity_project", self.activity_project.as_deref());
        apply(&mut t.activity_session, "activity_session", self.activity_session.as_deref());
        apply(&mut t.activity_system, "activity_system", self.activity_system.as_deref());
        apply(
            &mut t.proficiency_expert,
            "proficiency_expert",
            self.proficiency_expert.as_deref(),
        );
        apply(
            &mut t.proficiency_strong,
            "proficiency_strong",
            self.proficiency_strong.as_deref(),
        );
        apply(&mut t.proficiency_fair, "proficiency_fair", self.proficiency_fair.as_deref());
        apply(&mut t.proficiency_weak, "proficiency_weak", self.proficiency_weak.as_deref());
        apply(&mut t.toast_info, "toast_info", self.toast_info.as_deref());
        apply(&mut t.toast_success, "toast_success", self.toast_success.as_deref());
        apply(&mut t.toast_error, "toast_error", self.toast_error.as_deref());
        apply(&mut t.tab_active, "tab_active", self.tab_active.as_deref());
        apply(&mut t.tab_inactive, "tab_inactive", self.tab_inactive.as_deref());
        apply(
            &mut t.selection_indicator,
            "selection_indicator",
            self.selection_indicator.as_deref(),
        );
        apply(&mut t.progress_filled, "progress_filled", self.progress_filled.as_deref());
        apply(&mut t.progress_empty, "progress_empty", self.progress_empty.as_deref());
        apply(&mut t.online, "online", self.online.as_deref());

        t
    }
}
