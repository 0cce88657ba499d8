//! Read-only projections for the list views.
//!
//! Each view takes a slice, optionally truncates it, and for the category
//! views groups it by category in order of first appearance.

use crate::store::{Activity, Capability, Project, Session, Skill};

/// How a list panel is shown: its heading, an optional item cap and whether
/// it offers a "View All" jump to the full view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub limit: Option<usize>,
    pub show_all_link: bool,
}

impl Panel {
    /// A panel showing everything, without a "View All" link.
    pub const fn full(title: &'static str) -> Self {
        Panel {
            title,
            limit: None,
            show_all_link: false,
        }
    }

    pub const fn preview(title: &'static str, limit: usize) -> Self {
        Panel {
            title,
            limit: Some(limit),
            show_all_link: true,
        }
    }

    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        take_limit(items, self.limit)
    }
}

/// The first `limit` items, or all of them when `limit` is `None`.
pub fn take_limit<T>(items: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(n) => &items[..n.min(items.len())],
        None => items,
    }
}

/// Items sharing one category, in input order unless the view re-sorts.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a, T> {
    pub category: &'a str,
    pub items: Vec<&'a T>,
}

/// Group `items` by `category`, keeping categories in first-seen order and
/// items in input order within each group.
pub fn group_by_category<'a, T>(
    items: &'a [T],
    category: impl Fn(&T) -> &str,
) -> Vec<Group<'a, T>> {
    let mut groups: Vec<Group<'a, T>> = Vec::new();
    for item in items {
        let key = category(item);
        match groups.iter_mut().find(|g| g.category == key) {
            Some(group) => group.items.push(item),
            None => groups.push(Group {
                category: key,
                items: vec![item],
            }),
        }
    }
    groups
}

pub fn capabilities_by_category(capabilities: &[Capability]) -> Vec<Group<'_, Capability>> {
    group_by_category(capabilities, |c| c.category.as_str())
}

/// Skills grouped by category, strongest first within each group.
pub fn skills_by_category(skills: &[Skill]) -> Vec<Group<'_, Skill>> {
    let mut groups = group_by_category(skills, |s| s.category.as_str());
    for group in &mut groups {
        group.items.sort_by_key(|s| std::cmp::Reverse(s.proficiency));
    }
    groups
}

pub fn projects<'a>(panel: &Panel, projects: &'a [Project]) -> &'a [Project] {
    panel.apply(projects)
}

pub fn sessions<'a>(panel: &Panel, sessions: &'a [Session]) -> &'a [Session] {
    panel.apply(sessions)
}

pub fn activities<'a>(panel: &Panel, activities: &'a [Activity]) -> &'a [Activity] {
    panel.apply(activities)
}

/// The first `max` tags and how many were left out.
pub fn visible_tags(tags: &[String], max: usize) -> (&[String], usize) {
    let shown = take_limit(tags, Some(max));
    (shown, tags.len() - shown.len())
}

/// Colour band for a skill's proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProficiencyBand {
    Expert,
    Strong,
    Fair,
    Weak,
}

impl ProficiencyBand {
    pub fn of(proficiency: u8) -> Self {
        if proficiency >= 90 {
            ProficiencyBand::Expert
        } else if proficiency >= 75 {
            ProficiencyBand::Strong
        } else if proficiency >= 60 {
            ProficiencyBand::Fair
        } else {
            ProficiencyBand::Weak
        }
    }
}
