use crossterm::event::{KeyCode, KeyModifiers};

use crate::store::TaskStatus;

use super::app::View;

// ── Actions ──────────────────────────────────────────────────────────

/// Every discrete action the TUI can perform in response to a key press.
///
/// Actions are context-free identifiers; the *execution* code in `App`
/// decides what actually happens based on the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Global
    Quit,
    OpenCommandPalette,
    NextView,
    PrevView,
    GoTo(View),
    ShowHelp,

    // Navigation
    MoveUp,
    MoveDown,

    // Task board
    NextFilter,
    PrevFilter,
    SetStatus(TaskStatus),
    CycleStatus,
    ViewAll,
}

// ── Help categories ──────────────────────────────────────────────────

/// Logical groupings shown in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpCategory {
    Navigation,
    Views,
    Tasks,
}

impl HelpCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Views => "Views",
            Self::Tasks => "Task Board",
        }
    }

    /// Fixed display order for the help overlay.
    const ORDERED: &[Self] = &[Self::Navigation, Self::Views, Self::Tasks];
}

// ── Keybinding ───────────────────────────────────────────────────────

/// A single key → action mapping with metadata for the help overlay.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
    /// Human-readable key label shown in help (e.g. `"Ctrl+P"`).
    /// Empty for aliases that share a row with another binding.
    pub label: &'static str,
    pub description: &'static str,
    pub category: HelpCategory,
}

/// A single row in the help overlay.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    pub label: &'static str,
    pub description: &'static str,
}

// ── KeyMap ────────────────────────────────────────────────────────────

/// Declarative registry of every key binding in the dashboard.
pub struct KeyMap {
    pub normal: Vec<KeyBinding>,
}

impl KeyMap {
    pub fn default_keymap() -> Self {
        Self {
            normal: default_normal_bindings(),
        }
    }

    pub fn lookup_normal(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        // Shifted characters arrive with SHIFT set on some terminals and
        // without it on others.
        let modifiers = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        self.normal
            .iter()
            .find(|kb| kb.code == code && kb.modifiers == modifiers)
            .map(|kb| kb.action)
    }

    /// Generate grouped help entries in display order.
    pub fn help_entries(&self) -> Vec<(&'static str, Vec<HelpEntry>)> {
        let mut out = Vec::new();

        for &cat in HelpCategory::ORDERED {
            let mut entries: Vec<HelpEntry> = Vec::new();
            for kb in &self.normal {
                if kb.category == cat
                    && !kb.description.is_empty()
                    && !entries.iter().any(|e| e.label == kb.label)
                {
                    entries.push(HelpEntry {
                        label: kb.label,
                        description: kb.description,
                    });
                }
            }
            if !entries.is_empty() {
                out.push((cat.label(), entries));
            }
        }

        out
    }
}

// ── Default bindings ─────────────────────────────────────────────────

fn alias(code: KeyCode, modifiers: KeyModifiers, action: Action, category: HelpCategory) -> KeyBinding {
    KeyBinding {
        code,
        modifiers,
        action,
        label: "",
        description: "",
        category,
    }
}

#[allow(clippy::enum_glob_use)]
fn default_normal_bindings() -> Vec<KeyBinding> {
    use Action::*;
    use HelpCategory::*;

    let mut bindings = vec![
        // ── Navigation ───────────────────────────────────────────
        KeyBinding {
            code: KeyCode::Char('p'),
            modifiers: KeyModifiers::CONTROL,
            action: OpenCommandPalette,
            label: "  Ctrl+P",
            description: "Command palette",
            category: Navigation,
        },
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            action: MoveDown,
            label: "  j/k",
            description: "Move selection / scroll",
            category: Navigation,
        },
        alias(KeyCode::Char('k'), KeyModifiers::NONE, MoveUp, Navigation),
        alias(KeyCode::Down, KeyModifiers::NONE, MoveDown, Navigation),
        alias(KeyCode::Up, KeyModifiers::NONE, MoveUp, Navigation),
        KeyBinding {
            code: KeyCode::Char('?'),
            modifiers: KeyModifiers::NONE,
            action: ShowHelp,
            label: "  ?",
            description: "This help screen",
            category: Navigation,
        },
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            action: Quit,
            label: "  q",
            description: "Quit",
            category: Navigation,
        },
        alias(KeyCode::Char('c'), KeyModifiers::CONTROL, Quit, Navigation),
        // ── Views ────────────────────────────────────────────────
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: KeyModifiers::NONE,
            action: NextView,
            label: "  Tab/S-Tab",
            description: "Next / previous view",
            category: Views,
        },
        alias(KeyCode::BackTab, KeyModifiers::SHIFT, PrevView, Views),
        alias(KeyCode::BackTab, KeyModifiers::NONE, PrevView, Views),
        KeyBinding {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::NONE,
            action: GoTo(View::Dashboard),
            label: "  1-6",
            description: "Jump to view",
            category: Views,
        },
        KeyBinding {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            action: ViewAll,
            label: "  a",
            description: "View all (from a dashboard preview)",
            category: Views,
        },
        // ── Task board ───────────────────────────────────────────
        KeyBinding {
            code: KeyCode::Char('f'),
            modifiers: KeyModifiers::NONE,
            action: NextFilter,
            label: "  f/F",
            description: "Next / previous status filter",
            category: Tasks,
        },
        alias(KeyCode::Char('F'), KeyModifiers::NONE, PrevFilter, Tasks),
        KeyBinding {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::NONE,
            action: SetStatus(TaskStatus::Todo),
            label: "  t",
            description: "Mark To Do",
            category: Tasks,
        },
        KeyBinding {
            code: KeyCode::Char('i'),
            modifiers: KeyModifiers::NONE,
            action: SetStatus(TaskStatus::InProgress),
            label: "  i",
            description: "Mark In Progress",
            category: Tasks,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::NONE,
            action: SetStatus(TaskStatus::Completed),
            label: "  c",
            description: "Mark Completed",
            category: Tasks,
        },
        KeyBinding {
            code: KeyCode::Char('b'),
            modifiers: KeyModifiers::NONE,
            action: SetStatus(TaskStatus::Blocked),
            label: "  b",
            description: "Mark Blocked",
            category: Tasks,
        },
        KeyBinding {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            action: CycleStatus,
            label: "  Space",
            description: "Cycle status",
            category: Tasks,
        },
    ];

    // 2-6 share the "1-6" help row.
    for (digit, view) in ('2'..='6').zip(&View::ALL[1..]) {
        bindings.push(alias(KeyCode::Char(digit), KeyModifiers::NONE, GoTo(*view), Views));
    }

    bindings
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_normal_quit() {
        let km = KeyMap::default_keymap();
        assert_eq!(
            km.lookup_normal(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
        assert_eq!(
            km.lookup_normal(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn plain_c_completes_ctrl_c_quits() {
        let km = KeyMap::default_keymap();
        assert_eq!(
            km.lookup_normal(KeyCode::Char('c'), KeyModifiers::NONE),
            Some(Action::SetStatus(TaskStatus::Completed))
        );
    }

    #[test]
    fn digits_jump_to_views_in_order() {
        let km = KeyMap::default_keymap();
        for (digit, view) in ('1'..='6').zip(View::ALL) {
            assert_eq!(
                km.lookup_normal(KeyCode::Char(digit), KeyModifiers::NONE),
                Some(Action::GoTo(view)),
                "digit {digit}"
            );
        }
        assert_eq!(km.lookup_normal(KeyCode::Char('7'), KeyModifiers::NONE), None);
    }

    #[test]
    fn shifted_filter_key_with_or_without_shift_flag() {
        let km = KeyMap::default_keymap();
        assert_eq!(
            km.lookup_normal(KeyCode::Char('F'), KeyModifiers::NONE),
            Some(Action::PrevFilter)
        );
        assert_eq!(
            km.lookup_normal(KeyCode::Char('F'), KeyModifiers::SHIFT),
            Some(Action::PrevFilter)
        );
        assert_eq!(
            km.lookup_normal(KeyCode::BackTab, KeyModifiers::SHIFT),
            Some(Action::PrevView)
        );
    }

    #[test]
    fn unknown_key_has_no_action() {
        let km = KeyMap::default_keymap();
        assert_eq!(km.lookup_normal(KeyCode::Char('x'), KeyModifiers::NONE), None);
    }

    #[test]
    fn help_entries_cover_all_categories() {
        let km = KeyMap::default_keymap();
        let labels: Vec<&str> = km.help_entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Navigation", "Views", "Task Board"]);
    }

    #[test]
    fn help_entries_no_duplicates() {
        let km = KeyMap::default_keymap();
        for (_, entries) in km.help_entries() {
            let mut seen = std::collections::HashSet::new();
            for e in &entries {
                assert!(seen.insert(e.label), "duplicate help label: {:?}", e.label);
            }
        }
    }

    #[test]
    fn no_key_is_bound_twice() {
        let km = KeyMap::default_keymap();
        let mut seen = std::collections::HashSet::new();
        for kb in &km.normal {
            assert!(
                seen.insert((kb.code, kb.modifiers)),
                "duplicate binding: {:?} {:?}",
                kb.code,
                kb.modifiers
            );
        }
    }
}
