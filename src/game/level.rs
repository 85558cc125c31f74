use std::time::Duration;

/// Difficulty level and the tick rate derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub level: u32,
    initial_speed: u32,
    speed_increment: u32,
}

impl Level {
    pub fn new(initial_speed: u32, speed_increment: u32) -> Self {
        Self {
            level: 1,
            initial_speed,
            speed_increment,
        }
    }

    pub fn increase_level(&mut self) {
        self.level += 1;
    }

    pub fn reset(&mut self) {
        self.level = 1;
    }

    /// Ticks per second at the current level
    pub fn speed(&self) -> u32 {
        self.initial_speed
            .saturating_add((self.level - 1).saturating_mul(self.speed_increment))
    }

    /// Wall-clock length of one tick, never shorter than 1ms
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis((1000 / u64::from(self.speed().max(1))).max(1))
    }
}
