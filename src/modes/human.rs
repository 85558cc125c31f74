use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::game::{GameConfig, GameLoop, InputEvent};
use crate::input::InputHandler;
use crate::persistence::HighScoreStore;
use crate::render::Renderer;

/// Interactive play in the terminal
pub struct HumanMode<S: HighScoreStore, R: Rng> {
    game: GameLoop<S, R>,
    renderer: Renderer,
    input_handler: InputHandler,
    started_at: Instant,
}

impl<S: HighScoreStore> HumanMode<S, rand::rngs::StdRng> {
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        Ok(Self::with_game(GameLoop::new(config, store)?))
    }
}

impl<S: HighScoreStore, R: Rng> HumanMode<S, R> {
    pub fn with_game(game: GameLoop<S, R>) -> Self {
        Self {
            game,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            started_at: Instant::now(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Tick period follows the current level's speed
        let mut tick_period = self.game.frame_interval();
        let mut tick_timer = tick_interval(tick_period);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!("Session started, speed {}", self.game.speed());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let now = self.now_ms();
                    self.game.tick(now);

                    let period = self.game.frame_interval();
                    if period != tick_period {
                        debug!("Tick period {:?} -> {:?}", tick_period, period);
                        tick_period = period;
                        tick_timer = tick_interval(period);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let draw = self.game.draw_list();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &draw);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.game.handle_input(InputEvent::Quit);
                }
            }

            if self.game.should_quit() {
                break;
            }
        }

        info!("Session ended, high score {}", self.game.high_score());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            if let Some(input) = self.input_handler.handle_key_event(key) {
                self.game.handle_input(input);
            }
        }
    }

    /// Monotonic milliseconds since the session started
    fn now_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Interval whose first tick is one period away, not immediate
fn tick_interval(period: Duration) -> Interval {
    let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
