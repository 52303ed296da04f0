use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Paces ticks at a fixed rate and renders whenever something changed.
///
/// Tick deadlines advance by exactly one interval, so a late tick is followed
/// by an early one and the average tick rate stays on target. When the loop
/// falls more than [`MAX_BACKLOG`] intervals behind, the backlog is dropped.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    next_tick: Instant,
    dirty: bool,
}

const MAX_BACKLOG: u32 = 5;

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            next_tick: Instant::now(),
            dirty: true,
        }
    }
}

impl EventLoop {
    /// Pass `None` to stop generating ticks.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.next_tick = Instant::now();
    }

    /// Blocks until the next tick is due, a render is needed or a terminal event arrives.
    ///
    /// Pending renders go first, so the screen is drawn between two ticks.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now >= self.next_tick
            {
                self.next_tick += interval;
                if now.duration_since(self.next_tick) > interval * MAX_BACKLOG {
                    self.next_tick = now + interval;
                }
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            let timeout = self
                .tick_interval
                .map_or(Duration::from_secs(1), |_| {
                    self.next_tick.saturating_duration_since(now)
                });
            if event::poll(timeout)? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}
