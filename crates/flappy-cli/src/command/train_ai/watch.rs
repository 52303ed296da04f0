use crossterm::event::{Event, KeyCode};
use flappy_engine::Genome as _;
use flappy_training::{
    GenerationReport, GenerationalDriver, Optimizer as _, Population, StopReason,
};
use ratatui::Frame;

use crate::{
    tui::{App, Tui},
    ui::{
        self,
        widgets::{Banner, EpisodeDisplay},
    },
};

/// Simulation ticks per screen tick in turbo mode.
const TURBO_TICKS: usize = 50;

/// Trains in the terminal, one simulation tick per screen tick (or a batch in turbo mode).
///
/// Returns why training ended. Quitting before the last generation stops the
/// running generation, which is then discarded.
pub(super) fn run(driver: &mut GenerationalDriver<Population>) -> anyhow::Result<StopReason> {
    let mut app = WatchApp::new(driver);
    Tui::new().run(&mut app)?;
    Ok(app.finish())
}

#[derive(Debug)]
struct WatchApp<'a> {
    driver: &'a mut GenerationalDriver<Population>,
    last_report: Option<GenerationReport>,
    turbo: bool,
    paused: bool,
    is_exiting: bool,
}

impl<'a> WatchApp<'a> {
    fn new(driver: &'a mut GenerationalDriver<Population>) -> Self {
        Self {
            driver,
            last_report: None,
            turbo: false,
            paused: false,
            is_exiting: false,
        }
    }

    fn finish(self) -> StopReason {
        let Self { driver, .. } = self;
        if let Some(reason) = driver.finished() {
            return reason;
        }
        driver.stop();
        StopReason::Stopped
    }

    fn banner(&self) -> Option<Banner> {
        if self.driver.finished().is_some() {
            Some(Banner::TrainingFinished)
        } else if self.paused {
            Some(Banner::Paused)
        } else {
            None
        }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let fitness =
            |value: Option<f32>| value.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"));
        let last_best = self
            .last_report
            .as_ref()
            .and_then(|report| report.fitness)
            .map(|stats| stats.max);
        let best_ever = self.driver.optimizer().best().map(|best| best.fitness());
        vec![
            (
                "DONE:",
                format!("{}/{}", self.driver.generation(), self.driver.max_generations()),
            ),
            (
                "POPULATION:",
                self.driver.optimizer().genomes().len().to_string(),
            ),
            ("LAST BEST:", fitness(last_best)),
            ("BEST EVER:", fitness(best_ever)),
        ]
    }
}

impl App for WatchApp<'_> {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(f64::from(self.driver.episode().config().tick_rate));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(event) = event.as_key_press_event() {
            match event.code {
                KeyCode::Char('t') => self.turbo = !self.turbo,
                KeyCode::Char('p') => self.paused = !self.paused,
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let display = EpisodeDisplay::new(self.driver.episode().snapshot())
            .extra_rows(self.rows())
            .banner(self.banner())
            .turbo(self.turbo);
        let help_text = if self.driver.finished().is_some() {
            "Controls: Q (Save and quit)"
        } else if self.turbo {
            "Controls: T (Turbo: ON) | P (Pause) | Q (Quit)"
        } else {
            "Controls: T (Turbo: OFF) | P (Pause) | Q (Quit)"
        };
        ui::draw_episode(frame, display, help_text);
    }

    fn update(&mut self, _tui: &mut Tui) {
        if self.paused {
            return;
        }
        let ticks = if self.turbo { TURBO_TICKS } else { 1 };
        for _ in 0..ticks {
            if self.driver.finished().is_some() {
                break;
            }
            if let Some(report) = self.driver.tick(&[]) {
                self.last_report = Some(report);
            }
        }
    }
}
