// Strands – A word game
// Copyright (C) 2024  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::grid::{self, Cell, Grid};
use std::collections::HashSet;
use std::fmt;

// A route through the grid. The cells are kept in order along with a
// set of the same cells so that checking whether a cell has already
// been used doesn’t need to walk the whole route.
#[derive(Debug, Clone, Default)]
pub struct Path {
    cells: Vec<Cell>,
    visited: HashSet<Cell>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    RepeatedCell(Cell),
    NotAdjacent(Cell, Cell),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::RepeatedCell(cell) => {
                write!(f, "cell {} is used twice", cell)
            },
            Error::NotAdjacent(a, b) => {
                write!(f, "cells {} and {} are not adjacent", a, b)
            },
        }
    }
}

impl std::error::Error for Error {}

pub fn can_extend(path: &Path, next: Cell) -> bool {
    match path.last() {
        None => true,
        Some(last) => {
            !path.contains(next) && grid::is_adjacent(last, next)
        },
    }
}

impl Path {
    pub fn new() -> Path {
        Path::default()
    }

    pub fn from_cells<I>(cells: I) -> Result<Path, Error>
        where I: IntoIterator<Item = Cell>
    {
        let mut path = Path::new();

        for cell in cells {
            if path.contains(cell) {
                return Err(Error::RepeatedCell(cell));
            }

            if let Some(last) = path.last() {
                if !grid::is_adjacent(last, cell) {
                    return Err(Error::NotAdjacent(last, cell));
                }
            }

            path.push_unchecked(cell);
        }

        Ok(path)
    }

    fn push_unchecked(&mut self, cell: Cell) {
        self.cells.push(cell);
        self.visited.insert(cell);
    }

    // Append the cell if it is a legal next step. Returns whether the
    // path was changed.
    pub fn push(&mut self, cell: Cell) -> bool {
        if can_extend(self, cell) {
            self.push_unchecked(cell);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<Cell> {
        let cell = self.cells.pop()?;
        self.visited.remove(&cell);
        Some(cell)
    }

    pub fn truncate(&mut self, len: usize) {
        while self.cells.len() > len {
            self.pop();
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.visited.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    pub fn second_to_last(&self) -> Option<Cell> {
        self.cells.len().checked_sub(2).map(|i| self.cells[i])
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    pub fn position(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            self.cells.iter().position(|&c| c == cell)
        } else {
            None
        }
    }

    // Read the letters along the path. Cells outside of the grid
    // don’t contribute anything.
    pub fn word(&self, grid: &Grid) -> String {
        self.cells.iter()
            .filter(|&&cell| grid.contains(cell))
            .map(|&cell| grid.at(cell))
            .collect()
    }

    #[cfg(test)]
    pub fn is_legal(&self) -> bool {
        self.visited.len() == self.cells.len() &&
            self.cells.windows(2)
            .all(|pair| grid::is_adjacent(pair[0], pair[1]))
    }
}

// Equality only depends on the order of the cells
impl PartialEq for Path {
    fn eq(&self, other: &Path) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Path {}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", cell)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cells(coords: &[(u32, u32)]) -> Vec<Cell> {
        coords.iter().map(|&(row, col)| Cell::new(row, col)).collect()
    }

    #[test]
    fn extend_rules() {
        let mut path = Path::new();

        // Anything can start a path
        assert!(can_extend(&path, Cell::new(7, 3)));

        assert!(path.push(Cell::new(1, 1)));
        assert!(!can_extend(&path, Cell::new(1, 1)));
        assert!(can_extend(&path, Cell::new(0, 0)));
        assert!(can_extend(&path, Cell::new(2, 2)));
        assert!(!can_extend(&path, Cell::new(1, 3)));

        assert!(path.push(Cell::new(1, 2)));
        // Adjacent to the last cell but already used
        assert!(!can_extend(&path, Cell::new(1, 1)));
        // Adjacent to the first cell but not the last
        assert!(!can_extend(&path, Cell::new(1, 0)));
        assert!(can_extend(&path, Cell::new(0, 3)));

        assert!(!path.push(Cell::new(3, 3)));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn pop_and_truncate() {
        let mut path = Path::from_cells(
            cells(&[(0, 0), (0, 1), (1, 2), (2, 2)])
        ).unwrap();

        assert_eq!(path.second_to_last(), Some(Cell::new(1, 2)));
        assert_eq!(path.pop(), Some(Cell::new(2, 2)));
        assert!(!path.contains(Cell::new(2, 2)));
        assert!(path.push(Cell::new(2, 2)));

        assert_eq!(path.position(Cell::new(0, 1)), Some(1));
        assert_eq!(path.position(Cell::new(5, 5)), None);

        path.truncate(1);
        assert_eq!(path.cells(), &cells(&[(0, 0)])[..]);
        assert!(!path.contains(Cell::new(0, 1)));
        assert_eq!(path.second_to_last(), None);

        path.clear();
        assert!(path.is_empty());
        assert_eq!(path.pop(), None);
    }

    #[test]
    fn from_cells_errors() {
        assert_eq!(
            Path::from_cells(cells(&[(0, 0), (0, 1), (0, 0)])).unwrap_err(),
            Error::RepeatedCell(Cell::new(0, 0)),
        );
        assert_eq!(
            Path::from_cells(cells(&[(0, 0), (0, 2)])).unwrap_err(),
            Error::NotAdjacent(Cell::new(0, 0), Cell::new(0, 2)),
        );
        assert_eq!(
            &Path::from_cells(cells(&[(0, 0), (0, 2)]))
                .unwrap_err()
                .to_string(),
            "cells 0,0 and 0,2 are not adjacent",
        );
        assert!(Path::from_cells(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn word() {
        let grid = Grid::new("cat\nxox").unwrap();
        let path = Path::from_cells(cells(&[(0, 0), (1, 1), (0, 2)])).unwrap();

        assert_eq!(&path.word(&grid), "COT");
        assert!(path.is_legal());
        assert_eq!(&path.to_string(), "0,0 1,1 0,2");

        assert_eq!(&Path::new().word(&grid), "");
    }

    #[test]
    fn equality() {
        let a = Path::from_cells(cells(&[(0, 0), (0, 1)])).unwrap();
        let b = Path::from_cells(cells(&[(0, 1), (0, 0)])).unwrap();
        let mut c = Path::new();
        c.push(Cell::new(0, 0));
        c.push(Cell::new(0, 1));

        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
