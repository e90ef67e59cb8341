//! Start/stop state machine and the periodic keep-alive loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use keepalive_core::status;
use keepalive_core::{Condition, ConditionEvaluator, Config, SystemProbe};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::keys::KeySender;
use crate::status::{Presenter, RunState, StatusView};

/// Keep-alive controller.
///
/// At most one loop task exists per controller: `start` and `stop` are
/// serialized through the task mutex, and the running flag is only flipped
/// while it is held.
pub struct KeepAliveController {
    shared: Arc<Shared>,
    task: Mutex<Option<LoopTask>>,
}

/// State shared with the loop task.
struct Shared {
    config: Arc<Config>,
    evaluator: ConditionEvaluator,
    keys: Arc<dyn KeySender>,
    presenter: Arc<dyn Presenter>,
    running: AtomicBool,
}

struct LoopTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Pressed,
    PressFailed,
    Skipped(Condition),
}

impl KeepAliveController {
    pub fn new(
        config: Arc<Config>,
        probe: Arc<dyn SystemProbe>,
        keys: Arc<dyn KeySender>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let evaluator = ConditionEvaluator::new(Arc::clone(&config), probe);
        Self {
            shared: Arc::new(Shared {
                config,
                evaluator,
                keys,
                presenter,
                running: AtomicBool::new(false),
            }),
            task: Mutex::new(None),
        }
    }

    /// Starts the loop. No-op if already running.
    ///
    /// The first tick runs immediately.
    pub async fn start(&self) {
        let mut task = self.task.lock().await;
        if task.is_some() {
            tracing::debug!("keep-alive already running");
            return;
        }

        self.shared.running.store(true, Ordering::SeqCst);

        let cancel = CancellationToken::new();
        let shared = Arc::clone(&self.shared);
        let loop_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            keep_alive_loop(shared, loop_cancel).await;
        });
        *task = Some(LoopTask { cancel, handle });
        drop(task);

        tracing::info!("Keep-alive started");
        self.refresh();
    }

    /// Stops the loop. No-op if already stopped.
    ///
    /// Waits up to `stop_timeout` for the loop to exit, then aborts it.
    pub async fn stop(&self) {
        let mut task = self.task.lock().await;
        let Some(LoopTask { cancel, mut handle }) = task.take() else {
            return;
        };

        self.shared.running.store(false, Ordering::SeqCst);
        cancel.cancel();

        match tokio::time::timeout(self.shared.config.stop_timeout, &mut handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("keep-alive loop failed: {e}"),
            Err(_) => {
                tracing::warn!("keep-alive loop did not exit in time, aborting");
                handle.abort();
            }
        }
        drop(task);

        tracing::info!("Keep-alive stopped");
        self.refresh();
    }

    /// Stops the loop and asks the presenter to end the process.
    pub async fn quit(&self) {
        self.stop().await;
        self.shared.presenter.terminate();
    }

    /// Returns `true` if the loop is running.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    pub fn run_state(&self) -> RunState {
        self.shared.run_state()
    }

    /// Evaluates the conditions and builds a fresh view.
    pub fn status_view(&self) -> StatusView {
        self.shared.status_view()
    }

    fn refresh(&self) {
        self.shared.presenter.refresh(self.status_view());
    }
}

impl Shared {
    fn run_state(&self) -> RunState {
        if self.running.load(Ordering::SeqCst) {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    fn status_view(&self) -> StatusView {
        StatusView::build(&self.config, self.run_state(), &self.evaluator.snapshot())
    }

    /// Evaluates the conditions, presses the key if all hold, then
    /// refreshes the presenter.
    fn tick(&self) -> TickOutcome {
        let snapshot = self.evaluator.snapshot();

        let outcome = match snapshot.first_failed() {
            None => match self.keys.press(self.config.key) {
                Ok(()) => {
                    tracing::info!("{}", status::press_line(self.config.key, snapshot.time));
                    TickOutcome::Pressed
                }
                Err(e) => {
                    tracing::error!("Keep-alive: {} key press failed: {e}", self.config.key);
                    TickOutcome::PressFailed
                }
            },
            Some(condition) => {
                tracing::info!(
                    "{}",
                    status::skip_line(condition, &self.config, snapshot.time)
                );
                TickOutcome::Skipped(condition)
            }
        };

        self.presenter
            .refresh(StatusView::build(&self.config, self.run_state(), &snapshot));
        outcome
    }
}

/// Main loop. Exits as soon as the token is cancelled.
async fn keep_alive_loop(shared: Arc<Shared>, cancel: CancellationToken) {
    let period = shared.config.update_period;

    loop {
        if cancel.is_cancelled() || !shared.running.load(Ordering::SeqCst) {
            break;
        }

        let outcome = shared.tick();
        tracing::debug!(?outcome, "keep-alive tick");

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(period) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use chrono::NaiveTime;
    use keepalive_core::{BatteryReading, KeepAliveKey, NetInterface, ProbeError};

    use crate::error::KeyError;
    use crate::status::KeepAliveStatus;

    struct FakeProbe {
        hour: u32,
        plugged_in: bool,
        wired: bool,
    }

    impl FakeProbe {
        fn healthy() -> Self {
            Self {
                hour: 10,
                plugged_in: true,
                wired: true,
            }
        }
    }

    impl SystemProbe for FakeProbe {
        fn local_time(&self) -> NaiveTime {
            NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap()
        }

        fn battery(&self) -> Result<Option<BatteryReading>, ProbeError> {
            Ok(Some(BatteryReading {
                percent: Some(80),
                plugged_in: self.plugged_in,
            }))
        }

        fn interfaces(&self) -> Result<Vec<NetInterface>, ProbeError> {
            let addr = if self.wired { "10.0.0.5" } else { "169.254.0.5" };
            Ok(vec![NetInterface {
                name: "eth0".into(),
                is_up: true,
                addrs: vec![addr.parse().unwrap()],
            }])
        }
    }

    #[derive(Default)]
    struct CountingKeys {
        presses: AtomicUsize,
        fail: bool,
    }

    impl KeySender for CountingKeys {
        fn press(&self, key: KeepAliveKey) -> Result<(), KeyError> {
            assert_eq!(key, KeepAliveKey::ScrollLock);
            self.presses.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(KeyError::Init("no display".into()));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        views: StdMutex<Vec<StatusView>>,
        terminated: AtomicBool,
    }

    impl RecordingPresenter {
        fn last(&self) -> Option<StatusView> {
            self.views.lock().unwrap().last().cloned()
        }

        fn count(&self) -> usize {
            self.views.lock().unwrap().len()
        }
    }

    impl Presenter for RecordingPresenter {
        fn refresh(&self, view: StatusView) {
            self.views.lock().unwrap().push(view);
        }

        fn terminate(&self) {
            self.terminated.store(true, Ordering::SeqCst);
        }
    }

    struct Harness {
        controller: KeepAliveController,
        keys: Arc<CountingKeys>,
        presenter: Arc<RecordingPresenter>,
    }

    fn harness(probe: FakeProbe, keys: CountingKeys, period: Duration) -> Harness {
        let config = Arc::new(Config {
            update_period: period,
            ..Config::default()
        });
        let keys = Arc::new(keys);
        let presenter = Arc::new(RecordingPresenter::default());
        let controller = KeepAliveController::new(
            config,
            Arc::new(probe),
            Arc::clone(&keys) as Arc<dyn KeySender>,
            Arc::clone(&presenter) as Arc<dyn Presenter>,
        );
        Harness {
            controller,
            keys,
            presenter,
        }
    }

    #[tokio::test]
    async fn starts_stopped() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(30));
        assert!(!h.controller.is_running());
        assert_eq!(h.controller.run_state(), RunState::Stopped);
        assert_eq!(h.controller.status_view().status, KeepAliveStatus::Stopped);
    }

    #[tokio::test]
    async fn start_twice_runs_one_loop() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(3600));

        h.controller.start().await;
        h.controller.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(h.controller.is_running());
        assert_eq!(h.controller.run_state(), RunState::Running);
        // Each loop ticks once immediately; a second loop would press again.
        assert_eq!(h.keys.presses.load(Ordering::SeqCst), 1);

        h.controller.stop().await;
    }

    #[tokio::test]
    async fn stop_when_stopped_is_noop() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(30));

        h.controller.stop().await;

        assert_eq!(h.controller.run_state(), RunState::Stopped);
        assert_eq!(h.presenter.count(), 0);
    }

    #[tokio::test]
    async fn stop_ends_the_loop() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_millis(20));

        h.controller.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        h.controller.stop().await;
        assert!(!h.controller.is_running());

        let after_stop = h.keys.presses.load(Ordering::SeqCst);
        assert!(after_stop >= 2, "expected repeated ticks, got {after_stop}");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(h.keys.presses.load(Ordering::SeqCst), after_stop);

        let last = h.presenter.last().unwrap();
        assert_eq!(last.status, KeepAliveStatus::Stopped);
        assert!(!last.is_running());
        assert_eq!(last.tooltip, "Keep Alive - Stopped");
    }

    #[tokio::test]
    async fn stop_wakes_a_sleeping_loop() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(3600));

        h.controller.start().await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let started = std::time::Instant::now();
        h.controller.stop().await;
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn restart_after_stop() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(3600));

        h.controller.start().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        h.controller.stop().await;
        h.controller.start().await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(h.controller.is_running());
        assert_eq!(h.keys.presses.load(Ordering::SeqCst), 2);
        h.controller.stop().await;
    }

    #[tokio::test]
    async fn quit_stops_and_terminates() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(3600));

        h.controller.start().await;
        h.controller.quit().await;

        assert!(!h.controller.is_running());
        assert!(h.presenter.terminated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn start_refreshes_presenter() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(3600));

        h.controller.start().await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // One refresh from start, one from the first tick.
        assert_eq!(h.presenter.count(), 2);
        let last = h.presenter.last().unwrap();
        assert!(last.is_running());
        assert_eq!(last.status, KeepAliveStatus::Active);

        h.controller.stop().await;
    }

    #[test]
    fn tick_presses_when_all_met() {
        let h = harness(FakeProbe::healthy(), CountingKeys::default(), Duration::from_secs(30));
        h.controller.shared.running.store(true, Ordering::SeqCst);

        assert_eq!(h.controller.shared.tick(), TickOutcome::Pressed);
        assert_eq!(h.keys.presses.load(Ordering::SeqCst), 1);

        let view = h.presenter.last().unwrap();
        assert_eq!(view.status, KeepAliveStatus::Active);
        assert_eq!(view.tooltip, "Keep Alive - Running (Active)");
    }

    #[test]
    fn tick_skips_on_battery() {
        let probe = FakeProbe {
            plugged_in: false,
            ..FakeProbe::healthy()
        };
        let h = harness(probe, CountingKeys::default(), Duration::from_secs(30));
        h.controller.shared.running.store(true, Ordering::SeqCst);

        assert_eq!(
            h.controller.shared.tick(),
            TickOutcome::Skipped(Condition::AcPower)
        );
        assert_eq!(h.keys.presses.load(Ordering::SeqCst), 0);

        let view = h.presenter.last().unwrap();
        assert_eq!(view.status, KeepAliveStatus::Paused(vec![Condition::AcPower]));
        assert_eq!(view.power_line, "On battery power (80%)");
    }

    #[test]
    fn tick_reports_first_failed_but_view_lists_all() {
        let probe = FakeProbe {
            hour: 7,
            plugged_in: true,
            wired: false,
        };
        let h = harness(probe, CountingKeys::default(), Duration::from_secs(30));
        h.controller.shared.running.store(true, Ordering::SeqCst);

        assert_eq!(
            h.controller.shared.tick(),
            TickOutcome::Skipped(Condition::WorkHours)
        );
        assert_eq!(h.keys.presses.load(Ordering::SeqCst), 0);

        let view = h.presenter.last().unwrap();
        assert_eq!(
            view.status,
            KeepAliveStatus::Paused(vec![Condition::WorkHours, Condition::WiredEthernet])
        );
        assert_eq!(
            view.tooltip,
            "Keep Alive - Paused (Outside Work Hours, No Ethernet)"
        );
    }

    #[tokio::test]
    async fn key_failure_keeps_loop_running() {
        let keys = CountingKeys {
            fail: true,
            ..CountingKeys::default()
        };
        let h = harness(FakeProbe::healthy(), keys, Duration::from_millis(20));

        h.controller.start().await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(h.controller.is_running());
        assert!(h.keys.presses.load(Ordering::SeqCst) >= 2);

        h.controller.stop().await;
    }
}
