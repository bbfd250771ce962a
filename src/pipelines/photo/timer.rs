// SPDX-License-Identifier: GPL-3.0-only

//! Capture countdown
//!
//! [`Countdown`] is the tick-driven state used by the booth handlers, where the
//! orchestrator schedules one tick per second. [`run_countdown`] is the
//! awaitable form for callers that prefer to await the whole countdown.

use crate::constants::{PhotoTimerSetting, timing};
use tokio::sync::oneshot;
use tracing::{debug, info};

/// What a countdown tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Still counting; seconds left
    Remaining(u32),
    /// Reached zero; capture now
    Fire,
}

/// Active countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Start a countdown; `Off` has no countdown
    pub fn start(setting: PhotoTimerSetting) -> Option<Self> {
        let seconds = setting.seconds();
        if seconds == 0 {
            return None;
        }
        info!(seconds, "Starting photo timer countdown");
        Some(Self { remaining: seconds })
    }

    /// Seconds left before capture
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance by one second
    pub fn tick(&mut self) -> CountdownTick {
        if self.remaining <= 1 {
            self.remaining = 0;
            info!("Photo timer countdown complete");
            CountdownTick::Fire
        } else {
            self.remaining -= 1;
            debug!(remaining = self.remaining, "Photo timer tick");
            CountdownTick::Remaining(self.remaining)
        }
    }
}

/// How an awaited countdown ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownResult {
    /// Reached zero; the caller should capture
    Completed,
    /// Cancelled before reaching zero; nothing should be captured
    Cancelled,
}

/// Count down `seconds`, calling `on_tick` with each remaining value
///
/// `on_tick` sees the starting value first and `0` last. Sending on the
/// paired `oneshot::Sender` cancels; dropping the sender does not.
pub async fn run_countdown<F>(
    seconds: u32,
    mut cancel: oneshot::Receiver<()>,
    mut on_tick: F,
) -> CountdownResult
where
    F: FnMut(u32) + Send,
{
    let mut remaining = seconds;
    let mut cancel_closed = false;
    on_tick(remaining);

    while remaining > 0 {
        tokio::select! {
            _ = tokio::time::sleep(timing::COUNTDOWN_TICK) => {
                remaining -= 1;
                on_tick(remaining);
            }
            result = &mut cancel, if !cancel_closed => {
                match result {
                    Ok(()) => {
                        info!(remaining, "Photo timer countdown aborted");
                        return CountdownResult::Cancelled;
                    }
                    Err(_) => cancel_closed = true,
                }
            }
        }
    }

    CountdownResult::Completed
}
