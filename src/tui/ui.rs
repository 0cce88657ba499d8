use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::board::StatusFilter;
use crate::store::{DashboardStats, Session, Task};
use crate::timefmt;
use crate::views::{self, Group, Panel};

use super::app::{App, InputMode, View};
use super::theme::Theme;

const CARD_TAGS: usize = 3;
const SESSION_TAGS: usize = 2;
const BAR_WIDTH: usize = 20;

pub fn draw(frame: &mut Frame, app: &App, now: DateTime<Utc>) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, outer[0]);

    let body = outer[1];
    match app.view {
        View::Dashboard => draw_dashboard(frame, app, body, now),
        View::Tasks => draw_board(frame, app, body),
        View::Projects => draw_projects(frame, app, body, &Panel::full("Projects"), app.scroll),
        View::Sessions => {
            draw_sessions(frame, app, body, &Panel::full("Sessions"), app.scroll, now);
        }
        View::Capabilities => draw_capabilities(frame, app, body, now),
        View::Skills => draw_skills(frame, app, body),
    }

    draw_status_bar(frame, app, outer[2]);

    match app.input_mode {
        InputMode::CommandPalette => draw_command_palette(frame, app),
        InputMode::Help => draw_help(frame, app),
        InputMode::Normal => {}
    }
}

// ── Chrome ────────────────────────────────────────────────────────────

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        " taskdeck ",
        theme.accent().add_modifier(Modifier::BOLD),
    )];
    for (i, view) in View::ALL.iter().enumerate() {
        let style = if *view == app.view {
            theme.tab_active_style()
        } else {
            theme.tab_inactive_style()
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} {} ", i + 1, view.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let online = Line::from(vec![
        Span::styled("● ", Style::default().fg(theme.online)),
        Span::styled("Online ", theme.secondary()),
    ]);
    frame.render_widget(Paragraph::new(online).alignment(Alignment::Right), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = match &app.toast {
        Some(toast) => Line::from(Span::styled(
            format!(" {}", toast.message),
            theme.toast_style(toast.style),
        )),
        None => {
            let hint = if app.view.has_board() {
                " Tab:views  j/k:select  f:filter  t/i/c/b:status  ?:help  q:quit"
            } else {
                " Tab:views  j/k:scroll  Ctrl+P:palette  ?:help  q:quit"
            };
            Line::from(Span::styled(hint, theme.secondary()))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn panel_block<'a>(theme: &Theme, title: String, focused: bool) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border()
        } else {
            theme.unfocused_border()
        })
}

/// "View All" hint in the bottom border of a preview panel.
fn with_view_all<'a>(block: Block<'a>, theme: &Theme, panel: &Panel, key: &str) -> Block<'a> {
    if panel.show_all_link {
        block.title_bottom(
            Line::from(Span::styled(format!(" View All ({key}) → "), theme.accent()))
                .alignment(Alignment::Right),
        )
    } else {
        block
    }
}

fn draw_empty(frame: &mut Frame, theme: &Theme, block: Block, message: &str, area: Rect) {
    let msg = Paragraph::new(format!("\n  {message}"))
        .style(theme.secondary())
        .block(block);
    frame.render_widget(msg, area);
}

// ── Dashboard ─────────────────────────────────────────────────────────

fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(10),
        ])
        .split(area);

    draw_stats(frame, app, rows[0], now);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);
    draw_board(frame, app, middle[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(middle[1]);
    let cfg = &app.config;
    draw_projects(
        frame,
        app,
        side[0],
        &Panel::preview("Projects", cfg.project_limit),
        0,
    );
    draw_activity(frame, app, side[1], Some(cfg.activity_limit), now);

    draw_sessions(
        frame,
        app,
        rows[2],
        &Panel::preview("Recent Sessions", cfg.session_limit),
        0,
        now,
    );
}

/// The four stats cards, each read from its own named field.
fn stat_cards(stats: &DashboardStats) -> [(&'static str, usize); 4] {
    [
        ("Total Tasks", stats.total_tasks),
        ("Active Tasks", stats.active_tasks),
        ("Completed Tasks", stats.completed_tasks),
        ("Active Projects", stats.active_projects),
    ]
}

fn draw_stats(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let theme = &app.theme;
    let stats = app.stats(now);
    let colors = [
        theme.text_accent,
        theme.status_in_progress,
        theme.status_completed,
        theme.project_active,
    ];

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((cell, (label, value)), color) in cells.iter().zip(stat_cards(&stats)).zip(colors) {
        let block = panel_block(theme, format!(" {label} "), false);
        let value = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(value, *cell);
    }
}

// ── Task board ────────────────────────────────────────────────────────

fn draw_board(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let board = &app.board;
    let tasks = app.store.tasks();
    let shown = board.displayed(tasks);

    let panel = Panel {
        title: "",
        limit: board.limit,
        show_all_link: board.show_all_link,
    };
    let block = panel_block(theme, format!(" {} ({}) ", board.title, shown.len()), true);
    let block = with_view_all(block, theme, &panel, "a");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(Paragraph::new(filter_tabs(theme, board.filter())), parts[0]);

    if shown.is_empty() {
        frame.render_widget(
            Paragraph::new("  No tasks found").style(theme.secondary()),
            parts[1],
        );
        return;
    }

    let selected = board.selected_index(tasks);
    let items: Vec<ListItem> = shown
        .iter()
        .enumerate()
        .map(|(i, &task)| task_card(theme, task, i == selected))
        .collect();

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(List::new(items), parts[1], &mut state);
}

fn filter_tabs(theme: &Theme, active: StatusFilter) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for filter in StatusFilter::ALL {
        let style = if filter == active {
            theme.tab_active_style()
        } else {
            theme.tab_inactive_style()
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn task_card<'a>(theme: &Theme, task: &'a Task, selected: bool) -> ListItem<'a> {
    let marker = if selected {
        Span::styled("▸ ", Style::default().fg(theme.selection_indicator))
    } else {
        Span::raw("  ")
    };
    let title_style = if selected {
        theme.primary().add_modifier(Modifier::BOLD)
    } else {
        theme.primary()
    };

    let mut head = vec![
        marker,
        Span::styled(task.status.symbol(), theme.task_status_style(task.status)),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw("  "),
        Span::styled(
            task.priority.as_str().to_uppercase(),
            theme.priority_style(task.priority),
        ),
    ];
    if selected {
        head.push(Span::styled(
            format!("  {}", task.status.label()),
            theme.task_status_style(task.status),
        ));
    }

    let mut details: Vec<Span> = vec![Span::raw("    ")];
    let mut push_detail = |text: String| {
        if details.len() > 1 {
            details.push(Span::styled(" · ", theme.secondary()));
        }
        details.push(Span::styled(text, theme.secondary()));
    };
    if let Some(project) = &task.project {
        push_detail(project.clone());
    }
    if let Some(assignee) = &task.assigned_to {
        push_detail(format!("@{assignee}"));
    }
    if let Some(due) = task.due_date {
        push_detail(format!("due {}", timefmt::short_date(due)));
    }
    if !task.tags.is_empty() {
        details.push(Span::raw("  "));
        details.extend(tag_spans(theme, &task.tags, CARD_TAGS));
    }

    ListItem::new(vec![Line::from(head), Line::from(details)])
}

fn tag_spans(theme: &Theme, tags: &[String], max: usize) -> Vec<Span<'static>> {
    let (shown, hidden) = views::visible_tags(tags, max);
    let mut spans: Vec<Span> = shown
        .iter()
        .map(|t| Span::styled(format!("#{t} "), theme.accent()))
        .collect();
    if hidden > 0 {
        spans.push(Span::styled(format!("+{hidden}"), theme.secondary()));
    }
    spans
}

// ── Read-only views ───────────────────────────────────────────────────

fn progress_bar(theme: &Theme, percent: u8, width: usize) -> Vec<Span<'static>> {
    let percent = percent.min(100);
    let filled = usize::from(percent) * width / 100;
    vec![
        Span::styled("█".repeat(filled), Style::default().fg(theme.progress_filled)),
        Span::styled(
            "░".repeat(width - filled),
            Style::default().fg(theme.progress_empty),
        ),
        Span::styled(format!(" {percent:>3}%"), theme.secondary()),
    ]
}

fn draw_projects(frame: &mut Frame, app: &App, area: Rect, panel: &Panel, scroll: usize) {
    let theme = &app.theme;
    let projects = views::projects(panel, &app.projects);
    let focused = app.view == View::Projects;
    let block = panel_block(theme, format!(" {} ", panel.title), focused);
    let block = with_view_all(block, theme, panel, "3");

    if projects.is_empty() {
        draw_empty(frame, theme, block, "No projects yet", area);
        return;
    }

    let items: Vec<ListItem> = projects
        .iter()
        .map(|project| {
            let status_style = theme.project_status_style(project.status);
            let head = Line::from(vec![
                Span::raw(" "),
                Span::styled(project.status.symbol(), status_style),
                Span::raw(" "),
                Span::styled(
                    project.name.as_str(),
                    theme.primary().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", project.status.as_str()), status_style),
            ]);

            let mut progress = vec![Span::raw("   ")];
            progress.extend(progress_bar(theme, project.progress, BAR_WIDTH / 2));
            progress.push(Span::styled(
                format!(
                    "  {} tasks · {} done",
                    project.tasks.len(),
                    project.completed_tasks()
                ),
                theme.secondary(),
            ));

            let mut meta = vec![Span::styled(
                format!(
                    "   Updated {}  ",
                    timefmt::short_date(project.last_activity)
                ),
                theme.secondary(),
            )];
            meta.extend(tag_spans(theme, &project.tags, CARD_TAGS));

            ListItem::new(vec![head, Line::from(progress), Line::from(meta)])
        })
        .collect();

    let mut state = ListState::default().with_offset(scroll);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn draw_activity(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    limit: Option<usize>,
    now: DateTime<Utc>,
) {
    let theme = &app.theme;
    let panel = Panel {
        title: "Recent Activity",
        limit,
        show_all_link: false,
    };
    let activities = views::activities(&panel, &app.activities);
    let block = panel_block(
        theme,
        format!(" {} [{}] ", panel.title, activities.len()),
        false,
    );

    if activities.is_empty() {
        draw_empty(frame, theme, block, "No recent activity", area);
        return;
    }

    let items: Vec<ListItem> = activities
        .iter()
        .map(|activity| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(activity.kind.symbol(), theme.activity_style(activity.kind)),
                    Span::raw(" "),
                    Span::styled(activity.description.as_str(), theme.primary()),
                ]),
                Line::from(Span::styled(
                    format!("   {}", timefmt::relative(activity.timestamp, now)),
                    theme.secondary(),
                )),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn session_item<'a>(theme: &Theme, session: &'a Session, now: DateTime<Utc>) -> ListItem<'a> {
    let duration = timefmt::duration(session.duration.unwrap_or(0));

    let mut head = vec![
        Span::raw(" "),
        Span::styled(
            session.channel.as_str(),
            theme.accent().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    head.extend(tag_spans(theme, &session.tags, SESSION_TAGS));
    head.push(Span::styled(
        format!(
            " {} at {} · {}",
            timefmt::relative(session.start_time, now),
            timefmt::clock_time(session.start_time),
            duration
        ),
        theme.secondary(),
    ));
    head.push(Span::styled(
        format!(
            "   ✉ {}  + {}  ✓ {}",
            session.messages, session.tasks_created, session.tasks_completed
        ),
        theme.primary(),
    ));

    let summary = session.summary.as_deref().unwrap_or("No summary");
    ListItem::new(vec![
        Line::from(head),
        Line::from(Span::styled(format!("   {summary}"), theme.secondary())),
    ])
}

fn draw_sessions(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    panel: &Panel,
    scroll: usize,
    now: DateTime<Utc>,
) {
    let theme = &app.theme;
    let sessions = views::sessions(panel, &app.sessions);
    let focused = app.view == View::Sessions;
    let block = panel_block(theme, format!(" {} ", panel.title), focused);
    let block = with_view_all(block, theme, panel, "4");

    if sessions.is_empty() {
        draw_empty(frame, theme, block, "No sessions yet", area);
        return;
    }

    let items: Vec<ListItem> = sessions
        .iter()
        .map(|s| session_item(theme, s, now))
        .collect();
    let mut state = ListState::default().with_offset(scroll);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// Flatten groups into list rows, skipping the first `scroll` items. A group
/// header is emitted only when at least one of its items is visible.
fn grouped_rows<'a, T>(
    theme: &Theme,
    groups: &[Group<'a, T>],
    scroll: usize,
    mut row: impl FnMut(&'a T) -> ListItem<'a>,
) -> Vec<ListItem<'a>> {
    let mut rows = Vec::new();
    let mut index = 0;
    for group in groups {
        let mut header_done = false;
        for &item in &group.items {
            index += 1;
            if index <= scroll {
                continue;
            }
            if !header_done {
                rows.push(ListItem::new(Line::from(Span::styled(
                    format!(" {}", group.category),
                    theme.accent().add_modifier(Modifier::BOLD),
                ))));
                header_done = true;
            }
            rows.push(row(item));
        }
    }
    rows
}

fn draw_capabilities(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let theme = &app.theme;
    let block = panel_block(theme, " Capabilities ".into(), true);
    let groups = views::capabilities_by_category(&app.capabilities);

    if groups.is_empty() {
        draw_empty(frame, theme, block, "No capabilities", area);
        return;
    }

    let rows = grouped_rows(theme, &groups, app.scroll, |cap| {
        ListItem::new(vec![
            Line::from(vec![
                Span::raw("   "),
                Span::styled(cap.name.as_str(), theme.primary().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(cap.status.label(), theme.capability_status_style(cap.status)),
                Span::styled(
                    format!(
                        "  used {}× · last used {}",
                        cap.usage_count,
                        timefmt::relative_or_never(cap.last_used, now)
                    ),
                    theme.secondary(),
                ),
            ]),
            Line::from(Span::styled(
                format!("     {}", cap.description),
                theme.secondary(),
            )),
        ])
    });

    frame.render_widget(List::new(rows).block(block), area);
}

fn draw_skills(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = panel_block(theme, " Skills ".into(), true);
    let groups = views::skills_by_category(&app.skills);

    if groups.is_empty() {
        draw_empty(frame, theme, block, "No skills", area);
        return;
    }

    let rows = grouped_rows(theme, &groups, app.scroll, |skill| {
        let percent = skill.proficiency.min(100);
        let filled = usize::from(percent) * BAR_WIDTH / 100;
        let color = theme.proficiency_color(percent);
        let mut head = vec![
            Span::raw("   "),
            Span::styled(format!("{:<24}", skill.name), theme.primary()),
            Span::styled("█".repeat(filled), Style::default().fg(color)),
            Span::styled(
                "░".repeat(BAR_WIDTH - filled),
                Style::default().fg(theme.progress_empty),
            ),
            Span::styled(format!(" {percent:>3}%"), Style::default().fg(color)),
        ];
        if !skill.examples.is_empty() {
            head.push(Span::styled(
                format!("  e.g. {}", skill.examples.join(", ")),
                theme.secondary(),
            ));
        }
        ListItem::new(vec![
            Line::from(head),
            Line::from(Span::styled(
                format!("     {}", skill.description),
                theme.secondary(),
            )),
        ])
    });

    frame.render_widget(List::new(rows).block(block), area);
}

// ── Overlays ──────────────────────────────────────────────────────────

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn draw_help(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();
    for (category, entries) in app.keymap.help_entries() {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            category,
            theme.accent().add_modifier(Modifier::BOLD),
        )));
        for entry in entries {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", entry.label), theme.primary()),
                Span::styled(entry.description, theme.secondary()),
            ]));
        }
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(56, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_bottom(Line::from(" ?/Esc to close ").alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(theme.focused_border());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_command_palette(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.area();
    let width = 50u16.min(area.width.saturating_sub(4));
    let rows = u16::try_from(app.palette_filtered.len()).unwrap_or(u16::MAX);
    let height = rows.saturating_add(3).min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = area.height / 5;
    let palette_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, palette_area);

    let block = Block::default()
        .title(" Command Palette ")
        .borders(Borders::ALL)
        .border_style(theme.focused_border());

    let inner = block.inner(palette_area);
    frame.render_widget(block, palette_area);

    if inner.height < 2 {
        return;
    }

    let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let input_line = Line::from(vec![
        Span::styled("> ", theme.accent()),
        Span::raw(app.input_buffer.as_str()),
        Span::styled("█", theme.accent()),
    ]);
    frame.render_widget(Paragraph::new(input_line), input_area);

    let items_area = Rect::new(
        inner.x,
        inner.y + 1,
        inner.width,
        inner.height.saturating_sub(1),
    );
    let items: Vec<ListItem> = app
        .palette_filtered
        .iter()
        .enumerate()
        .map(|(i, &idx)| {
            let item = &app.palette_items[idx];
            let style = if i == app.palette_index {
                theme.accent().add_modifier(Modifier::BOLD)
            } else {
                theme.primary()
            };
            let prefix = if i == app.palette_index { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(item.label.as_str(), style),
            ]))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.palette_index));
    frame.render_stateful_widget(List::new(items), items_area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{Capability, CapabilityStatus, Fixtures};
    use chrono::{Duration, TimeZone};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        render_at(app, Utc::now())
    }

    fn render_at(app: &App, now: DateTime<Utc>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|f| draw(f, app, now)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_app() -> App {
        App::new(Fixtures::sample(Utc::now()), &Config::default())
    }

    #[test]
    fn stat_cards_read_named_fields() {
        let stats = DashboardStats {
            total_tasks: 10,
            active_tasks: 20,
            completed_tasks: 30,
            total_projects: 40,
            active_projects: 50,
            ..Default::default()
        };
        assert_eq!(
            stat_cards(&stats),
            [
                ("Total Tasks", 10),
                ("Active Tasks", 20),
                ("Completed Tasks", 30),
                ("Active Projects", 50),
            ]
        );
    }

    #[test]
    fn dashboard_renders_all_panels() {
        let screen = render(&sample_app());
        for needle in [
            "taskdeck",
            "Online",
            "Total Tasks",
            "Active Projects",
            "Active Tasks (5)",
            "View All (a)",
            "Projects",
            "Recent Activity [5]",
            "Recent Sessions",
            "▸ ",
        ] {
            assert!(screen.contains(needle), "missing {needle:?}\n{screen}");
        }
    }

    #[test]
    fn tasks_view_has_filter_tabs_and_no_view_all() {
        let mut app = sample_app();
        app.set_view(View::Tasks);
        let screen = render(&app);
        assert!(screen.contains("All Tasks (8)"));
        for label in ["To Do", "In Progress", "Completed", "Blocked"] {
            assert!(screen.contains(label), "missing {label}");
        }
        assert!(!screen.contains("View All"));
    }

    #[test]
    fn empty_data_shows_placeholders() {
        let mut app = App::new(Fixtures::default(), &Config::default());
        let screen = render(&app);
        assert!(screen.contains("No tasks found"));
        assert!(screen.contains("No projects yet"));
        assert!(screen.contains("No recent activity"));
        assert!(screen.contains("No sessions yet"));

        app.set_view(View::Skills);
        assert!(render(&app).contains("No skills"));
        app.set_view(View::Capabilities);
        assert!(render(&app).contains("No capabilities"));
    }

    #[test]
    fn grouped_views_show_categories() {
        let mut app = sample_app();
        app.set_view(View::Capabilities);
        let screen = render(&app);
        assert!(screen.contains("Communication"));
        assert!(screen.contains("Research"));

        app.set_view(View::Skills);
        let screen = render(&app);
        assert!(screen.contains("Engineering"));
        assert!(screen.contains('%'));
    }

    #[test]
    fn overlays_render() {
        let mut app = sample_app();
        app.handle_key(KeyCode::Char('?'), KeyModifiers::NONE);
        let screen = render(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
        assert!(screen.contains("Task Board"));

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('p'), KeyModifiers::CONTROL);
        let screen = render(&app);
        assert!(screen.contains("Command Palette"));
        assert!(screen.contains("Go to Skills"));
    }

    #[test]
    fn toast_replaces_hints() {
        let mut app = sample_app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::NONE);
        let screen = render(&app);
        assert!(screen.contains("→ Completed"));
        assert!(!screen.contains("q:quit"));
    }

    fn capability(name: &str, category: &str) -> Capability {
        Capability {
            id: name.into(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            status: CapabilityStatus::Available,
            usage_count: 0,
            last_used: None,
        }
    }

    fn name_row(c: &Capability) -> ListItem<'_> {
        ListItem::new(c.name.as_str())
    }

    #[test]
    fn session_row_shows_all_details() {
        let now = Utc.with_ymd_and_hms(2026, 3, 20, 15, 7, 0).unwrap();
        let session = Session {
            id: "s1".into(),
            start_time: now - Duration::hours(3),
            end_time: None,
            duration: None,
            channel: "telegram".into(),
            messages: 12,
            tasks_created: 2,
            tasks_completed: 1,
            summary: Some("Sorted the inbox".into()),
            tags: ["email", "triage", "weekly"].map(String::from).to_vec(),
        };
        let fixtures = Fixtures {
            sessions: vec![session],
            ..Default::default()
        };
        let mut app = App::new(fixtures, &Config::default());
        app.set_view(View::Sessions);

        let screen = render_at(&app, now);
        for needle in [
            "telegram",
            "#email #triage +1",
            "3h ago at 12:07 PM · 0m",
            "12  + 2 ",
            "Sorted the inbox",
        ] {
            assert!(screen.contains(needle), "missing {needle:?}\n{screen}");
        }
        assert!(!screen.contains("#weekly"));
    }

    #[test]
    fn grouped_rows_drop_headers_of_scrolled_groups() {
        let caps = vec![
            capability("Inbox sweep", "Messaging"),
            capability("Reply drafts", "Messaging"),
            capability("Web search", "Research"),
        ];
        let groups = views::capabilities_by_category(&caps);
        let theme = Theme::default();

        // two headers plus three items
        assert_eq!(grouped_rows(&theme, &groups, 0, name_row).len(), 5);
        // first group's header kept while one of its items is visible
        assert_eq!(grouped_rows(&theme, &groups, 1, name_row).len(), 4);
        // only the Research header and its item remain
        assert_eq!(grouped_rows(&theme, &groups, 2, name_row).len(), 2);

        let fixtures = Fixtures {
            capabilities: caps.clone(),
            ..Default::default()
        };
        let mut app = App::new(fixtures, &Config::default());
        app.set_view(View::Capabilities);
        app.scroll = 2;
        let screen = render(&app);
        assert!(!screen.contains("Messaging"));
        assert!(!screen.contains("Reply drafts"));
        assert!(screen.contains("Research"));
        assert!(screen.contains("Web search"));
    }
}
