use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time for the next simulation tick.
    Tick,
    /// The screen is out of date.
    Render,
    Crossterm(CrosstermEvent),
}
