use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::game::{Direction, GameConfig, GameSession, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let session = match seed {
            Some(seed) => GameSession::with_seed(config, seed),
            None => GameSession::new(config),
        }
        .context("Failed to start game session")?;

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
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

        // One animation pass and one frame per tick
        let tick_interval = Duration::from_secs_f64(1.0 / f64::from(self.session.config().fps));
        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(&event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Animation tick and redraw
                _ = tick_timer.tick() => {
                    self.update_game()?;
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games = self.metrics.games_played,
            best_score = self.metrics.best_score,
            "leaving game"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match self.input_handler.handle_event(event) {
            KeyAction::Move(direction) => self.start_move(direction),
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn start_move(&mut self, direction: Direction) {
        // No input queue: presses during a slide are dropped
        if self.session.is_animating() {
            debug!(%direction, "input ignored while tiles slide");
            return;
        }

        let was_lost = self.session.is_lost();
        self.session.begin_move(direction);
        if !was_lost && self.session.is_lost() {
            self.record_game_over();
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let Some(report) = self
            .session
            .tick()
            .context("Board invariant violated while resolving a move")?
        else {
            return Ok(());
        };

        self.metrics
            .observe(self.session.score(), self.session.board().max_value());
        if report.status == GameStatus::Lost {
            self.record_game_over();
        }

        Ok(())
    }

    fn record_game_over(&mut self) {
        self.metrics
            .on_game_over(self.session.score(), self.session.board().max_value());
    }

    fn reset_game(&mut self) {
        if let Err(err) = self.session.new_game() {
            error!(%err, "failed to start a new game");
            self.should_quit = true;
            return;
        }
        self.metrics.on_game_start();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn settle(mode: &mut HumanMode) {
        while mode.session.is_animating() {
            mode.update_game().unwrap();
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(5)).unwrap();
        assert!(!mode.session.is_lost());
        assert_eq!(mode.session.score(), 0);
        assert_eq!(mode.session.board().len(), 2);
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = GameConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(HumanMode::new(config, None).is_err());
    }

    #[test]
    fn test_key_press_starts_animation() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(5)).unwrap();
        let mut started = false;
        for code in [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down] {
            mode.handle_event(&key(code));
            started |= mode.session.is_animating();
            settle(&mut mode);
        }
        assert!(started);
        assert!(mode.session.board().len() >= 2);
    }

    #[test]
    fn test_quit_and_restart() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(5)).unwrap();
        mode.handle_event(&key(KeyCode::Left));
        settle(&mut mode);
        mode.handle_event(&key(KeyCode::Char('r')));
        assert_eq!(mode.session.moves(), 0);
        assert_eq!(mode.session.board().len(), 2);

        mode.handle_event(&key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
