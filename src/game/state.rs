use rand::Rng;

use super::action::Direction;
use super::config::GameConfig;

/// A grid-aligned position on the board, in position units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of the cell at (column, row)
    pub fn from_cell(col: i32, row: i32, cell_size: i32) -> Self {
        Self::new(col * cell_size, row * cell_size)
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }

    /// The (column, row) of the cell this position sits on
    pub fn cell(&self, cell_size: i32) -> (i32, i32) {
        (self.x / cell_size, self.y / cell_size)
    }

    /// Centre cell of the board
    pub fn center_of(config: &GameConfig) -> Self {
        Self::from_cell(
            config.grid_width / 2,
            config.grid_height / 2,
            config.cell_size,
        )
    }

    /// Uniformly random cell of the board
    pub fn random<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        Self::from_cell(
            rng.gen_range(0..config.grid_width),
            rng.gen_range(0..config.grid_height),
            config.cell_size,
        )
    }

    /// Check if the position lies within the board
    pub fn is_in_bounds(&self, config: &GameConfig) -> bool {
        self.x >= 0
            && self.x < config.pixel_width()
            && self.y >= 0
            && self.y < config.pixel_height()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Result of a single snake move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        new_head: Position,
        /// Cell vacated by the tail, if the snake did not grow
        old_tail: Option<Position>,
    },
    Collided(CollisionType),
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Occupied cells, with head at index 0
    pub positions: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Growth target; the body trims its tail only while longer than this
    pub length: usize,
    pub score: u32,
}

impl Snake {
    /// Create a one-cell snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self::from_positions(vec![head], direction)
    }

    /// Create a snake occupying exactly `positions`, head first
    pub fn from_positions(positions: Vec<Position>, direction: Direction) -> Self {
        let length = positions.len().max(1);
        Self {
            positions,
            direction,
            length,
            score: 0,
        }
    }

    /// Back to a one-cell snake at `center` facing a random way
    pub fn reset<R: Rng + ?Sized>(&mut self, center: Position, rng: &mut R) {
        self.length = 1;
        self.positions = vec![center];
        self.direction = Direction::random(rng);
        self.score = 0;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.positions[0]
    }

    /// Change direction; reversing into the neck is ignored once longer than one
    pub fn turn(&mut self, new_direction: Direction) {
        if self.length > 1 && self.direction.is_opposite(new_direction) {
            return;
        }
        self.direction = new_direction;
    }

    /// Advance one cell in the current direction
    ///
    /// The segment right behind the head is not checked for self-collision,
    /// so short snakes can turn without hitting their own neck. On collision
    /// the body is left untouched.
    pub fn move_step(&mut self, config: &GameConfig) -> MoveOutcome {
        let new_head = self
            .head()
            .moved_in_direction(self.direction, config.cell_size);

        if !new_head.is_in_bounds(config) {
            return MoveOutcome::Collided(CollisionType::Wall);
        }
        if self.positions.iter().skip(2).any(|p| *p == new_head) {
            return MoveOutcome::Collided(CollisionType::SelfCollision);
        }

        self.positions.insert(0, new_head);
        let old_tail = if self.positions.len() > self.length {
            self.positions.pop()
        } else {
            None
        };

        MoveOutcome::Moved { new_head, old_tail }
    }

    /// Raise the growth target
    pub fn grow(&mut self, amount: usize) {
        self.length += amount;
    }

    /// Check if a position is occupied by the snake
    pub fn occupies(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const CELL: i32 = 20;

    fn cell(col: i32, row: i32) -> Position {
        Position::from_cell(col, row, CELL)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_in_direction(Direction::Right, CELL), Position::new(120, 100));
        assert_eq!(pos.moved_in_direction(Direction::Left, CELL), Position::new(80, 100));
        assert_eq!(pos.moved_in_direction(Direction::Down, CELL), Position::new(100, 120));
        assert_eq!(pos.moved_in_direction(Direction::Up, CELL), Position::new(100, 80));
        assert_eq!(pos.cell(CELL), (5, 5));
    }

    #[test]
    fn test_center_and_bounds() {
        let config = GameConfig::default();
        assert_eq!(Position::center_of(&config), Position::new(240, 240));

        assert!(Position::new(0, 0).is_in_bounds(&config));
        assert!(Position::new(460, 460).is_in_bounds(&config));
        assert!(!Position::new(-20, 0).is_in_bounds(&config));
        assert!(!Position::new(480, 0).is_in_bounds(&config));
        assert!(!Position::new(0, 480).is_in_bounds(&config));
    }

    #[test]
    fn test_center_is_grid_aligned_on_odd_grid() {
        let config = GameConfig::new(25, 25);
        let center = Position::center_of(&config);
        assert_eq!(center.x % config.cell_size, 0);
        assert_eq!(center.y % config.cell_size, 0);
    }

    #[test]
    fn test_reset() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut snake = Snake::from_positions(vec![cell(3, 3), cell(2, 3)], Direction::Right);
        snake.score = 12;
        snake.length = 7;

        snake.reset(cell(12, 12), &mut rng);

        assert_eq!(snake.positions, vec![Position::new(240, 240)]);
        assert_eq!(snake.length, 1);
        assert_eq!(snake.score, 0);
    }

    #[test]
    fn test_reverse_turn_ignored_when_longer_than_one() {
        let mut snake = Snake::from_positions(vec![cell(5, 5), cell(4, 5)], Direction::Right);
        for d in Direction::ALL {
            snake.direction = d;
            snake.turn(d.opposite());
            assert_eq!(snake.direction, d);
        }
    }

    #[test]
    fn test_reverse_turn_allowed_at_length_one() {
        let mut snake = Snake::new(cell(5, 5), Direction::Right);
        snake.turn(Direction::Left);
        assert_eq!(snake.direction, Direction::Left);
    }

    #[test]
    fn test_move_without_growth_keeps_size() {
        let config = GameConfig::default();
        let mut snake = Snake::new(cell(5, 5), Direction::Right);

        let outcome = snake.move_step(&config);

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                new_head: cell(6, 5),
                old_tail: Some(cell(5, 5)),
            }
        );
        assert_eq!(snake.positions, vec![cell(6, 5)]);
    }

    #[test]
    fn test_growth_target_enforced_by_move() {
        let config = GameConfig::default();
        let mut snake = Snake::new(cell(5, 5), Direction::Right);
        snake.grow(2);

        assert_eq!(snake.move_step(&config), MoveOutcome::Moved {
            new_head: cell(6, 5),
            old_tail: None,
        });
        snake.move_step(&config);
        assert_eq!(snake.len(), 3);

        snake.move_step(&config);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.positions, vec![cell(8, 5), cell(7, 5), cell(6, 5)]);
    }

    #[test]
    fn test_wall_collision_leaves_body_unchanged() {
        let config = GameConfig::default();
        for (head, dir) in [
            (cell(0, 5), Direction::Left),
            (cell(23, 5), Direction::Right),
            (cell(5, 0), Direction::Up),
            (cell(5, 23), Direction::Down),
        ] {
            let mut snake = Snake::new(head, dir);
            let before = snake.clone();
            assert_eq!(
                snake.move_step(&config),
                MoveOutcome::Collided(CollisionType::Wall)
            );
            assert_eq!(snake, before);
        }
    }

    #[test]
    fn test_self_collision() {
        let config = GameConfig::default();
        // Head at (5,5) heading up into (5,4), which is the fourth segment
        let mut snake = Snake::from_positions(
            vec![cell(5, 5), cell(6, 5), cell(6, 4), cell(5, 4), cell(4, 4)],
            Direction::Up,
        );
        let before = snake.positions.clone();

        assert_eq!(
            snake.move_step(&config),
            MoveOutcome::Collided(CollisionType::SelfCollision)
        );
        assert_eq!(snake.positions, before);
    }

    #[test]
    fn test_neck_is_excluded_from_self_collision() {
        let config = GameConfig::default();
        // Length two snake forced to step back onto its neck
        let mut snake = Snake::from_positions(vec![cell(5, 5), cell(4, 5)], Direction::Left);
        let outcome = snake.move_step(&config);
        assert!(outcome.is_success());
        assert_eq!(snake.head(), cell(4, 5));
    }

    #[test]
    fn test_moving_onto_vacating_tail_is_a_collision_when_beyond_neck() {
        let config = GameConfig::default();
        // Square loop: the tail cell is positions[3], still checked
        let mut snake = Snake::from_positions(
            vec![cell(5, 5), cell(5, 6), cell(4, 6), cell(4, 5)],
            Direction::Left,
        );
        assert_eq!(
            snake.move_step(&config),
            MoveOutcome::Collided(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_straight_line_eventually_hits_wall() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut snake = Snake::new(Position::center_of(&config), Direction::Up);
        snake.reset(Position::center_of(&config), &mut rng);
        assert_eq!(snake.head(), Position::new(240, 240));

        let mut moves = 0;
        while snake.move_step(&config).is_success() {
            moves += 1;
            assert!(moves <= 24);
        }
        assert!(moves >= 11 && moves <= 12);
    }
}
