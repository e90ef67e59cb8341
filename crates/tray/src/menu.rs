//! Dynamic context menu for the system tray.

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Start the keep-alive loop.
    Start,
    /// Stop the keep-alive loop.
    Stop,
    /// Quit the application.
    Quit,
}

/// A single menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn header(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
            action: None,
        }
    }

    fn action(label: &str, enabled: bool, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            enabled,
            action: Some(action),
        }
    }

    /// Separators are disabled items with an empty label.
    pub fn separator() -> Self {
        Self::header(String::new())
    }

    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.action.is_none()
    }
}

/// Current state used to build the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    /// Application display name.
    pub app_name: String,
    /// Whether the keep-alive loop is running.
    pub running: bool,
    /// Work-hours, power and ethernet status lines.
    pub status_lines: Vec<String>,
}

impl MenuState {
    /// Builds the menu items from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::header(self.app_name.as_str()), MenuItem::separator()];

        // Start/Stop: only the one that changes state is clickable.
        items.push(MenuItem::action("Start", !self.running, MenuAction::Start));
        items.push(MenuItem::action("Stop", self.running, MenuAction::Stop));
        items.push(MenuItem::separator());

        if !self.status_lines.is_empty() {
            items.extend(self.status_lines.iter().map(|l| MenuItem::header(l.as_str())));
            items.push(MenuItem::separator());
        }

        items.push(MenuItem::action("Quit", true, MenuAction::Quit));
        items
    }
}
