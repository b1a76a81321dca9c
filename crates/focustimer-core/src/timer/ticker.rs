//! Fixed-cadence tick source.
//!
//! Neither the engine nor the orchestrator owns a timer. The event loop
//! holds a `Ticker` and forwards each tick to `SessionOrchestrator::tick`.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use super::orchestrator::SessionOrchestrator;
use crate::clock::Clock;
use crate::error::ValidationError;
use crate::notify::Notifier;
use crate::storage::PersistenceSink;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// First tick fires one `period` from now. Late ticks are delayed rather
    /// than bunched, so a stalled loop never fast-forwards the countdown.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(TICK_PERIOD)
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Tick `orchestrator` until its countdown stops (finished or paused).
    pub async fn run_while_ticking<S, N, C>(
        &mut self,
        orchestrator: &mut SessionOrchestrator<S, N, C>,
    ) -> Result<(), ValidationError>
    where
        S: PersistenceSink,
        N: Notifier,
        C: Clock,
    {
        while orchestrator.is_ticking() {
            self.tick().await;
            orchestrator.tick()?;
        }
        Ok(())
    }
}
