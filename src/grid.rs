//! Cell grid the floor plan is carved into

use itertools::Itertools;

/// Location in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// State of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Base,
}

/// Fixed-size cell array with a solid wall around the outside
///
/// The outer ring (first and last row, first and last column) is always
/// [Cell::Wall]; nothing in the generator ever carves into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Default arena width in cells
    pub const WIDTH: usize = 250;
    /// Default arena height in cells
    pub const HEIGHT: usize = 200;

    const S_EMPTY: char = '🟩';
    const S_WALL: char = '🟫';
    const S_BASE: char = '🟦';

    /// Create an empty grid with a wall around the border
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        Cell::Wall
                    } else {
                        Cell::Empty
                    }
                })
            })
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell state at `p`
    ///
    /// Panics if `p` lies outside of the grid.
    pub fn get(&self, p: Point) -> Cell {
        self.cells[self.index(p)]
    }

    pub(crate) fn set(&mut self, p: Point, cell: Cell) {
        debug_assert!(
            cell == Cell::Wall || !self.is_border(p),
            "border cell {p:?} must stay a wall"
        );
        let idx = self.index(p);
        self.cells[idx] = cell;
    }

    /// Whether `p` is on the outer ring of the grid
    pub fn is_border(&self, p: Point) -> bool {
        p.x == 0 || p.y == 0 || p.x == self.width - 1 || p.y == self.height - 1
    }

    /// Whether `p` is strictly inside the border
    pub fn is_interior(&self, p: Point) -> bool {
        p.x > 0 && p.y > 0 && p.x < self.width - 1 && p.y < self.height - 1
    }

    /// Read-only view of the rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Number of cells in the given state
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Emoji snapshot of the grid, one line per row
    pub fn to_emojis(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Cell::Empty => Self::S_EMPTY,
                        Cell::Wall => Self::S_WALL,
                        Cell::Base => Self::S_BASE,
                    })
                    .join("")
            })
            .join("\n")
    }

    fn index(&self, p: Point) -> usize {
        assert!(
            p.x < self.width && p.y < self.height,
            "{p:?} is outside of the {}x{} grid",
            self.width,
            self.height
        );
        p.y * self.width + p.x
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Self::WIDTH, Self::HEIGHT)
    }
}
