//! `tray-icon` binding for the tray model.
//!
//! Must be created and updated on the main thread (muda constraint on
//! macOS, GTK on Linux).

use std::collections::HashMap;

use keepalive_tray::{IconColor, MenuAction, MenuState, TrayConfig, TrayView, render_icon};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// Live tray icon plus the menu id → action map of its current menu.
pub struct Tray {
    icon: TrayIcon,
    actions: HashMap<MenuId, MenuAction>,
    icon_size: u32,
    current: TrayView,
}

impl Tray {
    /// Creates the tray icon in the stopped state.
    pub fn build(config: &TrayConfig) -> anyhow::Result<Self> {
        let view = TrayView::initial(config);
        let (menu, actions) = build_menu(&view.menu)?;

        let icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(&view.tooltip)
            .with_icon(load_icon(view.color, config.icon_size)?)
            .build()?;

        tracing::debug!("tray icon created");

        Ok(Self {
            icon,
            actions,
            icon_size: config.icon_size,
            current: view,
        })
    }

    /// Redraws whatever changed since the last view.
    pub fn apply(&mut self, view: TrayView) -> anyhow::Result<()> {
        if view.color != self.current.color {
            self.icon
                .set_icon(Some(load_icon(view.color, self.icon_size)?))?;
        }
        if view.tooltip != self.current.tooltip {
            self.icon.set_tooltip(Some(&view.tooltip))?;
        }
        if view.menu != self.current.menu {
            let (menu, actions) = build_menu(&view.menu)?;
            self.icon.set_menu(Some(Box::new(menu)));
            self.actions = actions;
        }

        self.current = view;
        Ok(())
    }

    /// Returns the action bound to a clicked menu item.
    pub fn action_for(&self, id: &MenuId) -> Option<MenuAction> {
        self.actions.get(id).copied()
    }
}

fn build_menu(state: &MenuState) -> anyhow::Result<(Menu, HashMap<MenuId, MenuAction>)> {
    let menu = Menu::new();
    let mut actions = HashMap::new();

    for item in state.build_menu() {
        if item.is_separator() {
            menu.append(&PredefinedMenuItem::separator())?;
            continue;
        }

        let entry = MenuItem::new(&item.label, item.enabled, None);
        if let Some(action) = item.action {
            actions.insert(entry.id().clone(), action);
        }
        menu.append(&entry)?;
    }

    Ok((menu, actions))
}

fn load_icon(color: IconColor, size: u32) -> anyhow::Result<Icon> {
    Ok(Icon::from_rgba(render_icon(color, size), size, size)?)
}
