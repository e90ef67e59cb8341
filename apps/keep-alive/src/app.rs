//! Application orchestrator: wires the controller to the tray event loop.

use std::sync::Arc;

use keepalive_controller::{EnigoKeySender, KeepAliveController};
use keepalive_core::{Config, HostProbe};
use keepalive_tray::{TrayConfig, TrayEvent, TrayUpdate};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tray_icon::menu::MenuEvent;

use crate::presenter::{ProxyPresenter, UserEvent};
use crate::tray::Tray;

/// Runs the tray event loop until the user quits.
///
/// Only returns early on startup failure; a normal quit exits the process
/// from inside the event loop with status 0.
pub fn run(config: Arc<Config>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

    // -- Menu clicks → event loop --
    let menu_proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = menu_proxy.send_event(UserEvent::Menu(event));
    }));

    // -- Controller --
    let presenter = Arc::new(ProxyPresenter::new(
        event_loop.create_proxy(),
        config.app_name.clone(),
    ));
    let controller = Arc::new(KeepAliveController::new(
        Arc::clone(&config),
        Arc::new(HostProbe),
        Arc::new(EnigoKeySender),
        presenter,
    ));

    // -- Ctrl-C → quit --
    let signal_controller = Arc::clone(&controller);
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("SIGINT received, shutting down");
            signal_controller.quit().await;
        }
    });

    let tray_config = TrayConfig {
        app_name: config.app_name.clone(),
        icon_size: config.icon_size,
    };
    let mut tray: Option<Tray> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => match Tray::build(&tray_config) {
                Ok(t) => tray = Some(t),
                Err(e) => {
                    tracing::error!("failed to create tray icon: {e:#}");
                    *control_flow = ControlFlow::ExitWithCode(1);
                }
            },

            Event::UserEvent(UserEvent::Menu(event)) => {
                let Some(action) = tray.as_ref().and_then(|t| t.action_for(&event.id)) else {
                    return;
                };
                match TrayEvent::from(action) {
                    TrayEvent::StartRequested => runtime.block_on(controller.start()),
                    TrayEvent::StopRequested => runtime.block_on(controller.stop()),
                    TrayEvent::QuitRequested => {
                        tracing::info!("quit requested via tray");
                        runtime.block_on(controller.quit());
                    }
                }
            }

            Event::UserEvent(UserEvent::Update(TrayUpdate::Refresh(view))) => {
                if let Some(t) = tray.as_mut()
                    && let Err(e) = t.apply(view)
                {
                    tracing::warn!("failed to update tray icon: {e:#}");
                }
            }

            Event::UserEvent(UserEvent::Update(TrayUpdate::Shutdown)) => {
                // Drop the icon before exiting so it leaves the tray.
                tray.take();
                tracing::info!("{} shut down cleanly", config.app_name);
                *control_flow = ControlFlow::Exit;
            }

            _ => {}
        }
    })
}
