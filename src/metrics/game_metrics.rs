use std::time::{Duration, Instant};

/// In-memory statistics for the current process; nothing is persisted
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u64,
    pub best_tile: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            best_tile: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record the running game's progress so bests survive a restart
    pub fn observe(&mut self, score: u64, max_tile: u32) {
        self.best_score = self.best_score.max(score);
        self.best_tile = self.best_tile.max(max_tile);
    }

    pub fn on_game_over(&mut self, final_score: u64, max_tile: u32) {
        self.games_played += 1;
        self.observe(final_score, max_tile);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
