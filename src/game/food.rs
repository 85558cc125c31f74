//! Pickups: the regular food and the timed bonus food

use rand::Rng;

use super::config::GameConfig;
use super::state::Position;

/// Sample random cells until one is not excluded
///
/// There is no retry cap; callers guarantee the board has a free cell.
fn sample_free_cell<R: Rng + ?Sized>(
    config: &GameConfig,
    excluded: &[Position],
    rng: &mut R,
) -> Position {
    loop {
        let pos = Position::random(config, rng);
        if !excluded.contains(&pos) {
            return pos;
        }
    }
}

/// Single-cell pickup, always present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Place a new food on a cell outside `excluded`
    pub fn spawn<R: Rng + ?Sized>(config: &GameConfig, excluded: &[Position], rng: &mut R) -> Self {
        Self {
            position: sample_free_cell(config, excluded, rng),
        }
    }

    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        excluded: &[Position],
        rng: &mut R,
    ) {
        self.position = sample_free_cell(config, excluded, rng);
    }
}

/// Transient bonus pickup with an expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BigFood {
    /// `None` while no big food is on the board
    pub position: Option<Position>,
    /// Clock reading at the last spawn, in milliseconds
    pub spawn_time_ms: u64,
}

impl BigFood {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        config: &GameConfig,
        excluded: &[Position],
        now_ms: u64,
        rng: &mut R,
    ) {
        self.position = Some(sample_free_cell(config, excluded, rng));
        self.spawn_time_ms = now_ms;
    }

    pub fn clear(&mut self) {
        self.position = None;
    }

    /// True when the big food sits on `pos`
    pub fn is_at(&self, pos: Position) -> bool {
        self.position == Some(pos)
    }

    /// Active and alive for longer than `timeout_ms`
    pub fn is_expired(&self, now_ms: u64, timeout_ms: u64) -> bool {
        self.is_active() && now_ms.saturating_sub(self.spawn_time_ms) > timeout_ms
    }
}
