//! Keep Alive entry point.

mod app;
mod platform;
mod presenter;
mod tray;

use std::sync::Arc;

use keepalive_core::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    log_subscriber(filter, std::io::stdout).init();

    let config = Arc::new(Config::default());
    platform::set_console_title(&config.app_name);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "{} started", config.app_name);
    tracing::info!("Work hours: {}", config.work_hours);
    tracing::info!(
        "Keep-alive will only be active during work hours, when on AC power, and with wired ethernet"
    );
    tracing::info!("Look for the icon in your system tray");
    tracing::info!("Right-click the icon to start/stop keep-alive functionality");

    app::run(config)
}

/// Plain stdout lines: audit messages already carry their own `HH:MM:SS`
/// timestamp, so no time, level or target prefix is added.
fn log_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .without_time()
        .with_level(false)
        .with_target(false)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn audit_lines_start_with_their_prefix() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = log_subscriber(EnvFilter::new("info"), move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Keep-alive: Scroll Lock key pressed at 09:15:00");
            tracing::debug!("filtered out");
        });

        let output = captured.text();
        assert!(output.starts_with("Keep-alive: Scroll Lock key pressed at 09:15:00"));
        assert!(!output.contains("INFO"));
        assert!(!output.contains("filtered out"));
        assert_eq!(output.lines().count(), 1);
    }
}
