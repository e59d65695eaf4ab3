use crate::logic::rules::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Black => 'B',
            Self::White => 'W',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("Black"),
            Self::White => f.write_str("White"),
        }
    }
}

/// Square playing surface. Cells are stored row-major, `None` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    grid: Vec<Option<Color>>,
}

impl Board {
    /// Standard four-disc start: White on the main diagonal of the centre,
    /// Black on the anti-diagonal.
    pub fn new(size: usize) -> Result<Self, RulesError> {
        let mut board = Self::empty(size)?;
        let mid = size / 2;
        board.set(mid - 1, mid - 1, Some(Color::White));
        board.set(mid, mid, Some(Color::White));
        board.set(mid - 1, mid, Some(Color::Black));
        board.set(mid, mid - 1, Some(Color::Black));
        Ok(board)
    }

    pub fn empty(size: usize) -> Result<Self, RulesError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) || size % 2 != 0 {
            return Err(RulesError::UnsupportedSize(size));
        }
        Ok(Self {
            size,
            grid: vec![None; size * size],
        })
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn capacity(&self) -> usize {
        self.size * self.size
    }

    pub const fn contains(&self, row: isize, col: isize) -> bool {
        let n = self.size as isize;
        row >= 0 && row < n && col >= 0 && col < n
    }

    /// Returns the owner of a cell. Off-board coordinates read as empty.
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.grid.get(row * self.size + col).copied().flatten()
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Option<Color>) {
        if row >= self.size || col >= self.size {
            return;
        }
        if let Some(slot) = self.grid.get_mut(row * self.size + col) {
            *slot = cell;
        }
    }

    pub fn count(&self, color: Color) -> usize {
        self.grid.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn total_pieces(&self) -> usize {
        self.grid.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.grid.iter().all(Option::is_some)
    }

    /// Copies `snapshot` back over this board, reusing the allocation.
    pub fn restore(&mut self, snapshot: &Self) {
        self.clone_from(snapshot);
    }

    pub const fn corners(&self) -> [(usize, usize); 4] {
        let last = self.size - 1;
        [(0, 0), (0, last), (last, 0), (last, last)]
    }

    pub const fn is_corner(&self, row: usize, col: usize) -> bool {
        let last = self.size - 1;
        (row == 0 || row == last) && (col == 0 || col == last)
    }

    pub const fn is_edge(&self, row: usize, col: usize) -> bool {
        let last = self.size - 1;
        row == 0 || row == last || col == 0 || col == last
    }

    /// True for the up to three cells touching a corner (X and C squares),
    /// never for the corner itself.
    pub fn is_corner_adjacent(&self, row: usize, col: usize) -> bool {
        !self.is_corner(row, col)
            && self
                .corners()
                .iter()
                .any(|&(cr, cc)| row.abs_diff(cr) <= 1 && col.abs_diff(cc) <= 1)
    }

    /// On-board cells of the 8-neighbourhood around `(row, col)`.
    pub fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        (-1isize..=1)
            .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
            .filter(|&d| d != (0, 0))
            .filter_map(move |(dr, dc)| {
                let r = row as isize + dr;
                let c = col as isize + dc;
                self.contains(r, c).then_some((r as usize, c as usize))
            })
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.size;
        (0..n).flat_map(move |r| (0..n).map(move |c| (r, c)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let line: Vec<String> = (0..self.size)
                .map(|col| self.get(row, col).map_or('.', Color::symbol).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Parses the diagram produced by `Display`: one line per row, `B`/`X` for
/// Black, `W`/`O` for White, `.`/`-` for empty. Whitespace inside a row is
/// ignored and blank lines are skipped.
impl FromStr for Board {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<Option<Color>>> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .filter(|ch| !ch.is_whitespace())
                    .map(|ch| match ch {
                        'B' | 'X' => Ok(Some(Color::Black)),
                        'W' | 'O' => Ok(Some(Color::White)),
                        '.' | '-' => Ok(None),
                        other => Err(RulesError::InvalidDiagram(format!(
                            "unexpected cell '{other}'"
                        ))),
                    })
                    .collect()
            })
            .collect::<Result<_, _>>()?;

        let size = rows.len();
        let mut board = Self::empty(size)?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(RulesError::InvalidDiagram(format!(
                    "row {r} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (c, &cell) in row.iter().enumerate() {
                board.set(r, c, cell);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_setup() {
        let board = Board::new(8).unwrap();
        assert_eq!(board.get(3, 3), Some(Color::White));
        assert_eq!(board.get(4, 4), Some(Color::White));
        assert_eq!(board.get(3, 4), Some(Color::Black));
        assert_eq!(board.get(4, 3), Some(Color::Black));
        assert_eq!(board.total_pieces(), 4);
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.capacity(), 64);
    }

    #[test]
    fn test_unsupported_sizes() {
        assert_eq!(Board::new(3), Err(RulesError::UnsupportedSize(3)));
        assert_eq!(Board::new(7), Err(RulesError::UnsupportedSize(7)));
        assert_eq!(Board::new(14), Err(RulesError::UnsupportedSize(14)));
        assert!(Board::new(12).is_ok());
    }

    #[test]
    fn test_diagram_roundtrip() {
        let board = Board::new(6).unwrap();
        let text = board.to_string();
        assert_eq!(
            text,
            ". . . . . .\n. . . . . .\n. . W B . .\n. . B W . .\n. . . . . .\n. . . . . .\n"
        );
        let parsed: Board = text.parse().unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_diagram_rejects_ragged_rows() {
        let result = "....\n...\n....\n....".parse::<Board>();
        assert!(matches!(result, Err(RulesError::InvalidDiagram(_))));
        let result = "..Z.\n....\n....\n....".parse::<Board>();
        assert!(matches!(result, Err(RulesError::InvalidDiagram(_))));
    }

    #[test]
    fn test_cell_classification() {
        let board = Board::empty(6).unwrap();
        assert!(board.is_corner(0, 5));
        assert!(board.is_corner(5, 0));
        assert!(!board.is_corner(0, 4));

        assert!(board.is_corner_adjacent(0, 1));
        assert!(board.is_corner_adjacent(1, 1));
        assert!(board.is_corner_adjacent(4, 5));
        assert!(!board.is_corner_adjacent(0, 0));
        assert!(!board.is_corner_adjacent(0, 2));
        assert!(!board.is_corner_adjacent(2, 2));

        assert!(board.is_edge(0, 2));
        assert!(board.is_edge(3, 5));
        assert!(!board.is_edge(2, 3));
    }

    #[test]
    fn test_neighbours_clip_at_edges() {
        let board = Board::empty(6).unwrap();
        let mut corner: Vec<_> = board.neighbours(0, 0).collect();
        corner.sort_unstable();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(board.neighbours(2, 2).count(), 8);
    }

    #[test]
    fn test_restore_undoes_mutation() {
        let mut board = Board::new(6).unwrap();
        let snapshot = board.clone();
        board.set(0, 0, Some(Color::Black));
        board.set(2, 2, None);
        board.restore(&snapshot);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_out_of_bounds_reads_empty() {
        let mut board = Board::new(4).unwrap();
        assert_eq!(board.get(4, 0), None);
        board.set(9, 9, Some(Color::White));
        assert_eq!(board.total_pieces(), 4);
    }
}
