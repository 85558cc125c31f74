//! Declarative frame description handed to renderers
//!
//! The core never touches a screen. Each frame it describes what is on the
//! board in cell coordinates, back to front, plus the HUD numbers and the
//! overlay for the current phase.

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Checkerboard background, `dark` on every other cell
    Background { dark: bool },
    SnakeHead,
    SnakeBody,
    Food,
    BigFood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCell {
    pub col: i32,
    pub row: i32,
    pub kind: CellKind,
}

/// Numbers shown around the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub speed: u32,
}

/// Text layer drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Start,
    Paused,
    GameOver { score: u32, new_high_score: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawList {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Ordered back to front; later cells cover earlier ones
    pub cells: Vec<DrawCell>,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

impl DrawList {
    /// Topmost kind drawn at (col, row)
    pub fn kind_at(&self, col: i32, row: i32) -> Option<CellKind> {
        self.cells
            .iter()
            .rev()
            .find(|c| c.col == col && c.row == row)
            .map(|c| c.kind)
    }

    /// Resolve the layers into one kind per cell, row-major
    pub fn flatten(&self) -> Vec<Vec<CellKind>> {
        let width = self.grid_width.max(0) as usize;
        let height = self.grid_height.max(0) as usize;
        let mut grid = vec![vec![CellKind::Background { dark: false }; width]; height];

        for cell in &self.cells {
            if (0..self.grid_width).contains(&cell.col) && (0..self.grid_height).contains(&cell.row) {
                grid[cell.row as usize][cell.col as usize] = cell.kind;
            }
        }

        grid
    }
}
