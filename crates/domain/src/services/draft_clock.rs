use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How often the driver persists the remaining seconds, in ticks.
pub const PERSIST_EVERY_TICKS: u64 = 10;

/// Snapshot of the countdown for one pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    pub league_id: Uuid,
    pub seconds_remaining: i32,
    pub is_running: bool,
    pub pick_number: i32,
    pub team_id: Option<Uuid>,
    /// Bumped on every arm/halt so a stale expiry queued behind the
    /// coordinator lock can be recognized and dropped.
    pub generation: u64,
}

/// Countdown clock for the pick currently on the board. The clock itself
/// never mutates draft state; the driver reports ticks and expiry to an
/// observer, which re-enters the coordinator's serial queue.
pub struct PickClock {
    state: Arc<RwLock<ClockState>>,
}

impl PickClock {
    pub fn new(league_id: Uuid) -> Self {
        let state = ClockState {
            league_id,
            seconds_remaining: 0,
            is_running: false,
            pick_number: 0,
            team_id: None,
            generation: 0,
        };

        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Start (or restart) the countdown for a pick. Returns the new
    /// generation.
    pub async fn arm(&self, seconds: i32, pick_number: i32, team_id: Option<Uuid>) -> u64 {
        let mut state = self.state.write().await;
        state.seconds_remaining = seconds.max(0);
        state.pick_number = pick_number;
        state.team_id = team_id;
        state.is_running = true;
        state.generation += 1;
        info!(
            league_id = %state.league_id,
            pick_number = pick_number,
            seconds = state.seconds_remaining,
            "Pick clock armed"
        );
        state.generation
    }

    /// Stop the countdown without firing expiry. Returns the residual
    /// seconds at the moment of the halt.
    pub async fn halt(&self) -> i32 {
        let mut state = self.state.write().await;
        state.is_running = false;
        state.generation += 1;
        info!(
            league_id = %state.league_id,
            seconds_remaining = state.seconds_remaining,
            "Pick clock halted"
        );
        state.seconds_remaining
    }

    /// Advance one second. Returns `true` when this tick consumed the last
    /// second; the clock stops itself before reporting expiry.
    pub async fn tick(&self) -> bool {
        let mut state = self.state.write().await;

        if !state.is_running {
            return false;
        }

        state.seconds_remaining -= 1;
        if state.seconds_remaining > 0 {
            debug!(
                league_id = %state.league_id,
                seconds_remaining = state.seconds_remaining,
                "Clock tick"
            );
            false
        } else {
            state.seconds_remaining = 0;
            state.is_running = false;
            warn!(
                league_id = %state.league_id,
                pick_number = state.pick_number,
                "Pick clock expired"
            );
            true
        }
    }

    pub async fn get_state(&self) -> ClockState {
        self.state.read().await.clone()
    }

    pub async fn seconds_remaining(&self) -> i32 {
        self.state.read().await.seconds_remaining
    }

    pub async fn is_running(&self) -> bool {
        self.state.read().await.is_running
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }
}

/// Receives the driver's 1 Hz callbacks.
#[async_trait]
pub trait ClockObserver: Send + Sync {
    /// `persist` is set on every tenth tick so the observer can bound its
    /// write rate while keeping reconnect fidelity reasonable.
    async fn on_tick(&self, state: ClockState, persist: bool);

    async fn on_expired(&self, state: ClockState);
}

/// Background task that ticks a [`PickClock`] once per second and reports
/// to the observer. The task ends after expiry; arming a new pick spawns a
/// fresh driver.
pub struct ClockDriver {
    handle: JoinHandle<()>,
}

impl ClockDriver {
    pub fn spawn(clock: Arc<PickClock>, observer: Arc<dyn ClockObserver>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // Skip the immediate first tick
            ticker.reset();
            let mut tick_count: u64 = 0;

            loop {
                ticker.tick().await;

                if !clock.is_running().await {
                    continue;
                }

                let expired = clock.tick().await;
                let state = clock.get_state().await;

                if expired {
                    observer.on_expired(state).await;
                    break;
                }

                tick_count += 1;
                observer
                    .on_tick(state, tick_count % PERSIST_EVERY_TICKS == 0)
                    .await;
            }
        });

        Self { handle }
    }

    /// Cancel the driver task. Safe to call after the task has finished.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for ClockDriver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_clock_is_stopped() {
        let league_id = Uuid::new_v4();
        let clock = PickClock::new(league_id);

        let state = clock.get_state().await;
        assert_eq!(state.league_id, league_id);
        assert!(!state.is_running);
        assert_eq!(state.seconds_remaining, 0);
    }

    #[tokio::test]
    async fn test_arm_and_halt() {
        let clock = PickClock::new(Uuid::new_v4());

        let gen1 = clock.arm(90, 1, Some(Uuid::new_v4())).await;
        assert!(clock.is_running().await);
        assert_eq!(clock.seconds_remaining().await, 90);

        let residual = clock.halt().await;
        assert_eq!(residual, 90);
        assert!(!clock.is_running().await);
        assert!(clock.generation().await > gen1);
    }

    #[tokio::test]
    async fn test_tick_counts_down_and_expires() {
        let clock = PickClock::new(Uuid::new_v4());
        clock.arm(3, 1, None).await;

        assert!(!clock.tick().await);
        assert_eq!(clock.seconds_remaining().await, 2);
        assert!(!clock.tick().await);
        assert_eq!(clock.seconds_remaining().await, 1);

        // Third tick consumes the last second and expires
        assert!(clock.tick().await);
        assert_eq!(clock.seconds_remaining().await, 0);
        assert!(!clock.is_running().await);
    }

    #[tokio::test]
    async fn test_tick_when_halted_does_nothing() {
        let clock = PickClock::new(Uuid::new_v4());
        clock.arm(10, 1, None).await;
        clock.halt().await;

        assert!(!clock.tick().await);
        assert_eq!(clock.seconds_remaining().await, 10);
    }

    #[tokio::test]
    async fn test_rearm_resets_countdown() {
        let clock = PickClock::new(Uuid::new_v4());
        clock.arm(10, 1, None).await;
        clock.tick().await;
        clock.tick().await;

        clock.arm(90, 2, None).await;
        let state = clock.get_state().await;
        assert_eq!(state.seconds_remaining, 90);
        assert_eq!(state.pick_number, 2);
        assert!(state.is_running);
    }

    #[tokio::test]
    async fn test_arm_with_residual() {
        let clock = PickClock::new(Uuid::new_v4());
        clock.arm(42, 3, None).await;
        assert_eq!(clock.seconds_remaining().await, 42);
    }

    struct CountingObserver {
        ticks: std::sync::atomic::AtomicUsize,
        expiries: std::sync::atomic::AtomicUsize,
        persists: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl ClockObserver for CountingObserver {
        async fn on_tick(&self, _state: ClockState, persist: bool) {
            self.ticks
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if persist {
                self.persists
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }

        async fn on_expired(&self, state: ClockState) {
            assert_eq!(state.seconds_remaining, 0);
            self.expiries
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_reports_expiry_once() {
        let clock = Arc::new(PickClock::new(Uuid::new_v4()));
        clock.arm(3, 1, None).await;

        let observer = Arc::new(CountingObserver {
            ticks: std::sync::atomic::AtomicUsize::new(0),
            expiries: std::sync::atomic::AtomicUsize::new(0),
            persists: std::sync::atomic::AtomicUsize::new(0),
        });

        let driver = ClockDriver::spawn(clock.clone(), observer.clone());

        // Advance simulated time well past expiry
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(
            observer
                .expiries
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );
        // Two non-expiry ticks before the third expires
        assert_eq!(
            observer.ticks.load(std::sync::atomic::Ordering::SeqCst),
            2
        );
        driver.abort();
    }
}
