use anyhow::Result;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;

use super::{
    action::{Direction, InputEvent},
    config::GameConfig,
    draw::{CellKind, DrawCell, DrawList, Hud, Overlay},
    food::{BigFood, Food},
    level::Level,
    state::{CollisionType, MoveOutcome, Position, Snake},
};
use crate::persistence::{FileHighScoreStore, HighScoreStore};

/// Where the game loop is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start screen, before the first game
    Waiting,
    Playing,
    Paused,
    GameOver,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ate_food: bool,
    pub ate_big_food: bool,
    pub big_food_spawned: bool,
    pub big_food_expired: bool,
    pub leveled_up: bool,
    /// Set when the move failed and the game ended
    pub collision: Option<CollisionType>,
}

impl TickReport {
    pub fn terminated(&self) -> bool {
        self.collision.is_some()
    }
}

/// Owns one game session and advances it tick by tick
///
/// The high score store and the random source are injected so sessions can
/// be replayed deterministically.
pub struct GameLoop<S = FileHighScoreStore, R = StdRng> {
    config: GameConfig,
    store: S,
    rng: R,
    phase: Phase,
    snake: Snake,
    food: Food,
    big_food: BigFood,
    level: Level,
    foods_eaten_since_big_food: u32,
    high_score: u32,
    new_high_score: bool,
    pending_turns: Vec<Direction>,
    should_quit: bool,
}

impl<S: HighScoreStore> GameLoop<S, StdRng> {
    /// Create a game loop seeded from system entropy
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        Self::with_rng(config, store, StdRng::from_entropy())
    }
}

impl<S: HighScoreStore, R: Rng> GameLoop<S, R> {
    /// Fails when `config` does not pass [`GameConfig::validate`]
    pub fn with_rng(config: GameConfig, store: S, mut rng: R) -> Result<Self> {
        config.validate()?;

        let center = Position::center_of(&config);
        let mut snake = Snake::new(center, Direction::Up);
        snake.reset(center, &mut rng);
        let food = Food::spawn(&config, &snake.positions, &mut rng);
        let level = Level::new(config.initial_speed, config.speed_increment);
        let high_score = store.load();
        let phase = if config.start_screen {
            Phase::Waiting
        } else {
            Phase::Playing
        };

        Ok(Self {
            config,
            store,
            rng,
            phase,
            snake,
            food,
            big_food: BigFood::new(),
            level,
            foods_eaten_since_big_food: 0,
            high_score,
            new_high_score: false,
            pending_turns: Vec::new(),
            should_quit: false,
        })
    }

    /// Apply one input event from the host
    pub fn handle_input(&mut self, event: InputEvent) {
        match (self.phase, event) {
            (_, InputEvent::Quit) => self.should_quit = true,
            (Phase::Waiting, InputEvent::Start) => self.set_phase(Phase::Playing),
            (Phase::Playing, InputEvent::PauseToggle) => self.set_phase(Phase::Paused),
            (Phase::Paused, InputEvent::PauseToggle) => self.set_phase(Phase::Playing),
            (Phase::Playing, InputEvent::Turn(direction)) => self.pending_turns.push(direction),
            (Phase::GameOver, InputEvent::Replay) => self.replay(),
            _ => {}
        }
    }

    /// Advance the game by one tick; `now_ms` is a monotonic clock reading
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != Phase::Playing {
            return report;
        }

        // Each queued turn is checked against the direction left by the previous one
        for direction in self.pending_turns.drain(..) {
            self.snake.turn(direction);
        }

        if let MoveOutcome::Collided(kind) = self.snake.move_step(&self.config) {
            report.collision = Some(kind);
            self.game_over(kind);
            return report;
        }

        let head = self.snake.head();

        if head == self.food.position {
            self.snake.score += self.config.food_score;
            self.snake.grow(1);
            self.foods_eaten_since_big_food += 1;
            let excluded = self.occupied_cells(self.big_food.position);
            self.food
                .randomize_position(&self.config, &excluded, &mut self.rng);
            report.ate_food = true;
            report.leveled_up |= self.check_level_up();
        }

        if self.foods_eaten_since_big_food >= self.config.big_food_threshold
            && !self.big_food.is_active()
        {
            let excluded = self.occupied_cells(Some(self.food.position));
            self.big_food
                .spawn(&self.config, &excluded, now_ms, &mut self.rng);
            self.foods_eaten_since_big_food = 0;
            report.big_food_spawned = true;
            debug!("Big food spawned at {:?}", self.big_food.position);
        }

        if self.big_food.is_at(head) {
            self.snake.score += self.config.big_food_score;
            self.snake.grow(self.config.big_food_growth);
            self.big_food.clear();
            report.ate_big_food = true;
            report.leveled_up |= self.check_level_up();
        } else if self
            .big_food
            .is_expired(now_ms, self.config.big_food_timeout_ms)
        {
            self.big_food.clear();
            report.big_food_expired = true;
            debug!("Big food expired");
        }

        report
    }

    /// Describe the current frame for a renderer
    pub fn draw_list(&self) -> DrawList {
        let cell_size = self.config.cell_size;
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let mut cells = Vec::with_capacity(self.config.cell_count() + self.snake.len() + 2);

        for row in 0..height {
            for col in 0..width {
                cells.push(DrawCell {
                    col,
                    row,
                    kind: CellKind::Background {
                        dark: (col + row) % 2 == 0,
                    },
                });
            }
        }

        let mut push = |pos: Position, kind: CellKind| {
            let (col, row) = pos.cell(cell_size);
            cells.push(DrawCell { col, row, kind });
        };

        push(self.food.position, CellKind::Food);
        if let Some(pos) = self.big_food.position {
            push(pos, CellKind::BigFood);
        }
        for pos in self.snake.positions.iter().skip(1).rev() {
            push(*pos, CellKind::SnakeBody);
        }
        push(self.snake.head(), CellKind::SnakeHead);

        let overlay = match self.phase {
            Phase::Waiting => Some(Overlay::Start),
            Phase::Playing => None,
            Phase::Paused => Some(Overlay::Paused),
            Phase::GameOver => Some(Overlay::GameOver {
                score: self.snake.score,
                new_high_score: self.new_high_score,
            }),
        };

        DrawList {
            grid_width: width,
            grid_height: height,
            cells,
            hud: Hud {
                score: self.snake.score,
                level: self.level.level,
                high_score: self.high_score,
                speed: self.level.speed(),
            },
            overlay,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn big_food(&self) -> &BigFood {
        &self.big_food
    }

    pub fn big_food_mut(&mut self) -> &mut BigFood {
        &mut self.big_food
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn score(&self) -> u32 {
        self.snake.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> u32 {
        self.level.speed()
    }

    pub fn frame_interval(&self) -> Duration {
        self.level.frame_interval()
    }

    pub fn foods_eaten_since_big_food(&self) -> u32 {
        self.foods_eaten_since_big_food
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Snake cells plus an optional extra cell to keep free
    fn occupied_cells(&self, extra: Option<Position>) -> Vec<Position> {
        let mut cells = self.snake.positions.clone();
        cells.extend(extra);
        cells
    }

    fn check_level_up(&mut self) -> bool {
        let score = self.snake.score;
        if score == 0 || score % self.config.level_up_score_step != 0 {
            return false;
        }

        self.level.increase_level();
        debug!(
            "Level {} reached at score {}, speed {}",
            self.level.level,
            score,
            self.level.speed()
        );
        true
    }

    fn game_over(&mut self, kind: CollisionType) {
        let score = self.snake.score;
        self.set_phase(Phase::GameOver);
        self.new_high_score = score > self.high_score;

        info!(
            "Game over ({:?}) with score {} at level {}",
            kind, score, self.level.level
        );

        if self.new_high_score {
            self.high_score = score;
            info!("New high score: {}", score);
            if let Err(err) = self.store.save(score) {
                warn!("Failed to persist high score: {:#}", err);
            }
        }
    }

    fn replay(&mut self) {
        let center = Position::center_of(&self.config);
        self.snake.reset(center, &mut self.rng);
        self.food
            .randomize_position(&self.config, &self.snake.positions, &mut self.rng);
        self.big_food.clear();
        self.level.reset();
        self.foods_eaten_since_big_food = 0;
        self.pending_turns.clear();
        self.new_high_score = false;
        self.set_phase(Phase::Playing);
    }
}
