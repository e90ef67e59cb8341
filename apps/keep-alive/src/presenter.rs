//! [`Presenter`] implementation that forwards controller refreshes to the
//! tray event loop.

use keepalive_controller::{KeepAliveStatus, Presenter, StatusView};
use keepalive_tray::{IconColor, MenuState, TrayUpdate, TrayView};
use tao::event_loop::EventLoopProxy;
use tray_icon::menu::MenuEvent;

/// Events delivered to the tao event loop.
#[derive(Debug)]
pub enum UserEvent {
    /// A tray menu item was clicked.
    Menu(MenuEvent),
    /// The controller changed state.
    Update(TrayUpdate),
}

/// Sends tray updates through the event loop proxy, so tray objects are
/// only ever touched on the main thread.
pub struct ProxyPresenter {
    proxy: EventLoopProxy<UserEvent>,
    app_name: String,
}

impl ProxyPresenter {
    pub fn new(proxy: EventLoopProxy<UserEvent>, app_name: String) -> Self {
        Self { proxy, app_name }
    }

    fn send(&self, update: TrayUpdate) {
        if self.proxy.send_event(UserEvent::Update(update)).is_err() {
            tracing::debug!("tray event loop closed, dropping update");
        }
    }
}

impl Presenter for ProxyPresenter {
    fn refresh(&self, view: StatusView) {
        self.send(TrayUpdate::Refresh(tray_view(&self.app_name, view)));
    }

    fn terminate(&self) {
        self.send(TrayUpdate::Shutdown);
    }
}

/// Maps a controller view onto the tray model.
pub fn tray_view(app_name: &str, view: StatusView) -> TrayView {
    let color = match view.status {
        KeepAliveStatus::Stopped => IconColor::Stopped,
        KeepAliveStatus::Active => IconColor::Active,
        KeepAliveStatus::Paused(_) => IconColor::Paused,
    };

    TrayView {
        color,
        menu: MenuState {
            app_name: app_name.to_string(),
            running: view.is_running(),
            status_lines: vec![view.work_hours_line, view.power_line, view.ethernet_line],
        },
        tooltip: view.tooltip,
    }
}
