use std::time::Duration;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal runtime executing an [`App`].
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events
            .set_tick_interval(Some(Duration::from_secs_f64(1.0 / rate)));
    }

    /// Runs `app` on the alternate screen until it asks to exit.
    ///
    /// The terminal is restored even if the app returns an error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
